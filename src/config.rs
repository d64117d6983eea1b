//! Zoom configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock behavior. The browser shell reads optional overrides from
//! a `<script id="diagram-zoom-config" type="application/json">` element.

use std::str::FromStr;

use serde::Deserialize;

use crate::consts::{
    ADJUST_DELAYS_MS, DARK_FILTER, DARK_SCHEME, DIAGNOSTIC_DELAYS_MS, DIAGRAM_CLASS, MARKER_ATTRIBUTE,
    OVERLAY_Z_INDEX, READINESS_RETRY_MS, THEME_ATTRIBUTE, ZOOM_FRACTION, ZOOM_PADDING_PX,
};
use crate::error::ZoomError;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    /// Class that marks diagram placeholders.
    pub diagram_class: String,
    /// Attribute written on enhanced diagrams.
    pub marker_attribute: String,
    /// Document-element attribute carrying the color scheme.
    pub theme_attribute: String,
    /// Value of `theme_attribute` that means dark.
    pub dark_scheme: String,
    pub readiness_retry_ms: u32,
    pub adjust_delays_ms: Vec<u32>,
    /// Fraction of the viewport the zoomed box covers, in `(0, 1]`.
    pub zoom_fraction: f64,
    pub padding_px: f64,
    pub dark_filter: String,
    pub overlay_z_index: i32,
    /// Log a structure report for every diagram after load.
    pub diagnostics: bool,
    pub diagnostic_delays_ms: Vec<u32>,
    pub log_level: String,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            diagram_class: DIAGRAM_CLASS.to_string(),
            marker_attribute: MARKER_ATTRIBUTE.to_string(),
            theme_attribute: THEME_ATTRIBUTE.to_string(),
            dark_scheme: DARK_SCHEME.to_string(),
            readiness_retry_ms: READINESS_RETRY_MS,
            adjust_delays_ms: ADJUST_DELAYS_MS.to_vec(),
            zoom_fraction: ZOOM_FRACTION,
            padding_px: ZOOM_PADDING_PX,
            dark_filter: DARK_FILTER.to_string(),
            overlay_z_index: OVERLAY_Z_INDEX,
            diagnostics: false,
            diagnostic_delays_ms: DIAGNOSTIC_DELAYS_MS.to_vec(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ZoomConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError::Config`] on malformed JSON, unknown fields, or a
    /// value outside its allowed range.
    pub fn from_json(raw: &str) -> Result<Self, ZoomError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.diagram_class.trim().is_empty() {
            return Err(ZoomError::Config("diagram_class must not be empty".into()));
        }
        if !is_plain_class(&self.diagram_class) {
            return Err(ZoomError::Config(format!(
                "diagram_class must be a single class name, got {:?}",
                self.diagram_class
            )));
        }
        if self.marker_attribute.trim().is_empty() {
            return Err(ZoomError::Config("marker_attribute must not be empty".into()));
        }
        if !(self.zoom_fraction > 0.0 && self.zoom_fraction <= 1.0) {
            return Err(ZoomError::Config(format!(
                "zoom_fraction must be in (0, 1], got {}",
                self.zoom_fraction
            )));
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(ZoomError::Config(format!("padding_px must be >= 0, got {}", self.padding_px)));
        }
        parse_log_level(&self.log_level)?;
        Ok(())
    }

    /// The configured console log level.
    #[must_use]
    pub fn level(&self) -> log::Level {
        parse_log_level(&self.log_level).unwrap_or(log::Level::Info)
    }
}

fn parse_log_level(raw: &str) -> Result<log::Level, ZoomError> {
    log::Level::from_str(raw).map_err(|_| ZoomError::Config(format!("unknown log_level: {raw}")))
}

/// A class name whose `.name` selector form matches exactly the elements
/// carrying that class: letters, digits, `-` and `_`, not starting with a digit.
fn is_plain_class(name: &str) -> bool {
    let starts_ok = name.chars().next().is_some_and(|c| !c.is_ascii_digit());
    starts_ok && name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
