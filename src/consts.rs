//! Shared constants for the zoom crate.

// ── Detection ───────────────────────────────────────────────────

/// Class that marks an element as a diagram placeholder.
pub const DIAGRAM_CLASS: &str = "mermaid";

/// Attribute written once on every diagram whose click listener is installed.
pub const MARKER_ATTRIBUTE: &str = "data-zoom-enabled";

/// Tag name of the rendered vector root.
pub const VECTOR_TAG: &str = "svg";

/// Attribute that identifies the overlay element.
pub const OVERLAY_ATTRIBUTE: &str = "data-zoom-overlay";

// ── Timing ──────────────────────────────────────────────────────

/// Delay before the single readiness retry, in milliseconds.
pub const READINESS_RETRY_MS: u32 = 100;

/// Delays after zoom-in at which the vector root is adjusted again.
pub const ADJUST_DELAYS_MS: [u32; 2] = [100, 300];

/// Delays after full load at which diagnostic reports are logged.
pub const DIAGNOSTIC_DELAYS_MS: [u32; 3] = [1000, 3000, 5000];

// ── Theme ───────────────────────────────────────────────────────

/// Document-element attribute written by the theme switcher.
pub const THEME_ATTRIBUTE: &str = "data-md-color-scheme";

/// Value of [`THEME_ATTRIBUTE`] that means dark presentation.
pub const DARK_SCHEME: &str = "slate";

/// Filter applied to the vector root in dark theme.
pub const DARK_FILTER: &str = "invert(0.85) hue-rotate(180deg) brightness(1.2)";

// ── Zoomed presentation ─────────────────────────────────────────

/// Fraction of the viewport the zoomed diagram box occupies.
pub const ZOOM_FRACTION: f64 = 0.9;

/// Inner padding of the zoomed box, in CSS pixels.
pub const ZOOM_PADDING_PX: f64 = 20.0;

/// Stacking level of the overlay. The diagram sits one above it.
pub const OVERLAY_Z_INDEX: i32 = 10_000;

/// Scrim color of the overlay.
pub const OVERLAY_BACKGROUND: &str = "rgba(0, 0, 0, 0.95)";

/// Inline properties captured on a diagram at attach time and restored on close.
pub const DIAGRAM_PROPERTIES: [&str; 17] = [
    "position",
    "transform",
    "left",
    "top",
    "z-index",
    "padding",
    "margin",
    "background",
    "box-shadow",
    "border-radius",
    "max-width",
    "max-height",
    "overflow",
    "width",
    "height",
    "filter",
    "display",
];

/// Inline properties touched on the vector root while zoomed.
pub const VECTOR_PROPERTIES: [&str; 10] = [
    "margin",
    "max-width",
    "max-height",
    "width",
    "height",
    "object-fit",
    "display",
    "filter",
    "image-rendering",
    "shape-rendering",
];
