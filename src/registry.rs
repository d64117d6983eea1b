//! At-most-once enhancement bookkeeping.
//!
//! A diagram passes through two marks. An in-memory claim covers the window
//! between discovery and listener installation (the readiness retry); the
//! persistent marker attribute is written when the listener goes in and is
//! never removed. Either mark turns later discoveries into no-ops.

use crate::dom::Element;

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

#[derive(Debug)]
pub struct EnhancementRegistry<E> {
    marker: String,
    claimed: Vec<E>,
}

impl<E: Element> EnhancementRegistry<E> {
    #[must_use]
    pub fn new(marker: &str) -> Self {
        Self { marker: marker.to_string(), claimed: Vec::new() }
    }

    /// Claim `diagram` for enhancement. Only the first caller gets `true`.
    pub fn try_enhance(&mut self, diagram: &E) -> bool {
        if self.is_enhanced(diagram) || self.is_claimed(diagram) {
            return false;
        }
        self.claimed.push(diagram.clone());
        true
    }

    /// Write the persistent marker and drop the claim.
    pub fn commit(&mut self, diagram: &E) {
        diagram.set_attribute(&self.marker, "true");
        self.release(diagram);
    }

    /// Drop a claim without marking, so the diagram can be rediscovered.
    pub fn release(&mut self, diagram: &E) {
        self.claimed.retain(|claimed| claimed != diagram);
    }

    #[must_use]
    pub fn is_enhanced(&self, diagram: &E) -> bool {
        diagram.has_attribute(&self.marker)
    }

    #[must_use]
    pub fn is_claimed(&self, diagram: &E) -> bool {
        self.claimed.contains(diagram)
    }

    /// Diagrams claimed but not yet committed. For inspection.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.claimed.len()
    }
}
