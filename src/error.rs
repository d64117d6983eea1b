//! Errors surfaced by the zoom service and its browser shell.
//!
//! None of these are fatal to the page. Callers log them and leave the
//! affected diagram un-enhanced.

/// Errors produced while configuring or driving diagram zoom.
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    /// The configuration JSON could not be parsed or failed validation.
    #[error("config parse failed: {0}")]
    Config(String),

    /// No global `window` object is available.
    #[error("no window available")]
    MissingWindow,

    /// The document has no `<body>` to observe or append to.
    #[error("document has no body")]
    MissingBody,

    /// A DOM call threw.
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for ZoomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
