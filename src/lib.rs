//! Click-to-zoom overlay for asynchronously rendered diagrams.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Diagram
//! placeholders are filled by an external renderer at an unpredictable time,
//! sometimes inside a shadow root. The crate finds them as they appear,
//! wires each one exactly once, and on click turns the diagram into a
//! centered full-screen view that is fully reverted on close.
//!
//! All decision-making lives in host-agnostic modules that talk to the page
//! through the [`dom`] traits and hand back [`watcher::Action`]s. The
//! `browser` module (feature `browser`) is the only code that touches
//! `web_sys`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`watcher`] | Per-page service: scans, mutation batches, input, timers |
//! | [`zoom`] | Idle/Zoomed state machine for one diagram |
//! | [`registry`] | At-most-once enhancement (claims + marker attribute) |
//! | [`readiness`] | Waits for a non-zero layout box, one bounded retry |
//! | [`locator`] | Finds the vector root in light tree or shadow roots |
//! | [`snapshot`] | Inline style capture/restore |
//! | [`fit`] | `viewBox` parsing and aspect-preserving fit |
//! | [`inspect`] | Read-only diagnostic reports |
//! | [`dom`] | DOM capability traits |
//! | [`config`] | Settings and defaults |
//! | [`consts`] | Shared constants (selectors, delays, tracked properties) |
//! | [`error`] | [`error::ZoomError`] |

#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod fit;
pub mod inspect;
pub mod locator;
pub mod readiness;
pub mod registry;
pub mod snapshot;
pub mod watcher;
pub mod zoom;

#[cfg(test)]
#[path = "fake_dom_test.rs"]
pub(crate) mod fake_dom;
