//! Defers enhancement until a diagram has a real layout box.
//!
//! Detection can fire while the renderer is still computing layout. The gate
//! lets a zero-sized diagram through on one bounded retry and otherwise
//! drops it silently; a later mutation can bring it back.

use crate::dom::Element;

#[cfg(test)]
#[path = "readiness_test.rs"]
mod readiness_test;

/// Outcome of a first readiness check.
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness<E> {
    /// Laid out; proceed now.
    Ready(E),
    /// Not laid out yet; check again after `delay_ms`.
    Retry { diagram: E, delay_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessGate {
    retry_delay_ms: u32,
}

impl ReadinessGate {
    #[must_use]
    pub fn new(retry_delay_ms: u32) -> Self {
        Self { retry_delay_ms }
    }

    /// First look at `diagram`.
    pub fn check<E: Element>(&self, diagram: E) -> Readiness<E> {
        if diagram.layout_size().is_empty() {
            Readiness::Retry { diagram, delay_ms: self.retry_delay_ms }
        } else {
            Readiness::Ready(diagram)
        }
    }

    /// The single retry. `None` means give up.
    pub fn recheck<E: Element>(&self, diagram: E) -> Option<E> {
        if diagram.layout_size().is_empty() {
            log::debug!("diagram still has no layout after {}ms, skipping", self.retry_delay_ms);
            return None;
        }
        Some(diagram)
    }
}
