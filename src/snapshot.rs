//! Capture and restore of a fixed set of inline style properties.

use crate::dom::Element;

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

/// Inline values of a fixed property list, in list order.
///
/// Unset properties are recorded as empty strings, so restoring them clears
/// whatever was written in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSnapshot {
    values: Vec<(&'static str, String)>,
}

impl StyleSnapshot {
    /// Record the current inline value of every property in `properties`.
    pub fn capture<E: Element>(el: &E, properties: &[&'static str]) -> Self {
        let values = properties.iter().map(|&name| (name, el.style(name))).collect();
        Self { values }
    }

    /// Write every captured value back onto `el`.
    pub fn restore<E: Element>(&self, el: &E) {
        for (name, value) in &self.values {
            el.set_style(name, value);
        }
    }

    /// The captured value for `property`, if it is tracked. For inspection.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Whether every tracked property on `el` still holds its captured value.
    pub fn matches<E: Element>(&self, el: &E) -> bool {
        self.values.iter().all(|(name, value)| el.style(name) == *value)
    }

    /// Number of tracked properties. For inspection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
