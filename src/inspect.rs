//! Read-only structure reports for troubleshooting diagram detection.
//!
//! Uses the same candidate rule as the watcher and never mutates the page.

use serde::Serialize;

use crate::dom::{Element, Page, Selector};
use crate::locator;

#[cfg(test)]
#[path = "inspect_test.rs"]
mod inspect_test;

/// What one diagram candidate looks like right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramReport {
    pub index: usize,
    pub tag: String,
    pub children: usize,
    pub first_child: Option<String>,
    pub width: f64,
    pub height: f64,
    pub enhanced: bool,
    pub has_vector: bool,
    /// Declared `width` / `height` attributes of the vector root.
    pub vector_width: Option<String>,
    pub vector_height: Option<String>,
}

/// Report every candidate matching `selector`, in document order.
pub fn inspect<P: Page>(page: &P, selector: &Selector, marker: &str) -> Vec<DiagramReport> {
    page.query_all(selector)
        .iter()
        .enumerate()
        .map(|(index, el)| report(index, el, marker))
        .collect()
}

fn report<E: Element>(index: usize, el: &E, marker: &str) -> DiagramReport {
    let children = el.children();
    let vector = locator::locate(el);
    let size = el.layout_size();
    DiagramReport {
        index,
        tag: el.tag_name(),
        children: children.len(),
        first_child: children.first().map(Element::tag_name),
        width: size.width,
        height: size.height,
        enhanced: el.has_attribute(marker),
        has_vector: vector.is_some(),
        vector_width: vector.as_ref().and_then(|v| v.attribute("width")),
        vector_height: vector.as_ref().and_then(|v| v.attribute("height")),
    }
}

/// Emit reports at debug level, one JSON line per diagram.
pub fn log_reports(reports: &[DiagramReport]) {
    log::debug!("diagram inspection: {} candidate(s)", reports.len());
    for report in reports {
        match serde_json::to_string(report) {
            Ok(line) => log::debug!("{line}"),
            Err(err) => log::warn!("diagram report {} not serializable: {err}", report.index),
        }
    }
}
