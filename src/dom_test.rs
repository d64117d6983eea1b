use super::*;
use crate::fake_dom::{FakeElement, FakePage, diagram, svg};

// --- Size ---

#[test]
fn size_with_both_dimensions_is_not_empty() {
    assert!(!Size::new(10.0, 5.0).is_empty());
}

#[test]
fn size_with_a_zero_dimension_is_empty() {
    assert!(Size::new(0.0, 5.0).is_empty());
    assert!(Size::new(10.0, 0.0).is_empty());
    assert!(Size::default().is_empty());
}

#[test]
fn size_nan_is_empty() {
    assert!(Size::new(f64::NAN, 5.0).is_empty());
}

// --- Selector ---

#[test]
fn selector_css_forms() {
    assert_eq!(Selector::class("mermaid").to_string(), ".mermaid");
    assert_eq!(Selector::tag("svg").to_string(), "svg");
    assert_eq!(Selector::Any.to_string(), "*");
}

#[test]
fn tag_selector_ignores_case() {
    let el = FakeElement::new("SVG");
    assert!(Selector::tag("svg").matches(&el));
}

#[test]
fn class_selector_matches_any_listed_class() {
    let el = FakeElement::new("div").with_class("highlight").with_class("mermaid");
    assert!(Selector::class("mermaid").matches(&el));
    assert!(!Selector::class("other").matches(&el));
}

// --- LightTree ---

#[test]
fn light_tree_finds_nested_descendant() {
    let host = diagram(100.0, 100.0);
    let wrapper = FakeElement::new("div");
    let graphic = svg("0 0 10 10");
    host.append(&wrapper);
    wrapper.append(&graphic);

    let found = LightTree(&host).find_descendant(&Selector::tag("svg"));
    assert_eq!(found, Some(graphic));
}

#[test]
fn light_tree_does_not_match_itself() {
    let graphic = svg("0 0 10 10");
    assert!(LightTree(&graphic).find_descendant(&Selector::tag("svg")).is_none());
}

#[test]
fn light_tree_does_not_cross_shadow_boundary() {
    let host = diagram(100.0, 100.0);
    let inner = FakeElement::new("div");
    host.append(&inner);
    inner.attach_shadow().append(&svg("0 0 10 10"));

    assert!(LightTree(&host).find_descendant(&Selector::tag("svg")).is_none());
}

// --- ReadyState ---

#[test]
fn ready_state_parse() {
    assert_eq!(ReadyState::parse("loading"), ReadyState::Loading);
    assert_eq!(ReadyState::parse("interactive"), ReadyState::Interactive);
    assert_eq!(ReadyState::parse("complete"), ReadyState::Complete);
    assert_eq!(ReadyState::parse("bogus"), ReadyState::Loading);
}

// --- Fake DOM connectivity ---

#[test]
fn element_under_body_is_connected_until_removed() {
    let page = FakePage::new();
    let el = diagram(10.0, 10.0);
    assert!(!el.is_connected());
    page.body.append(&el);
    assert!(el.is_connected());
    el.remove();
    assert!(!el.is_connected());
    assert!(page.body.children().is_empty());
}

#[test]
fn shadow_content_is_connected_through_host() {
    let page = FakePage::new();
    let host = FakeElement::new("div");
    page.body.append(&host);
    let graphic = svg("0 0 1 1");
    host.attach_shadow().append(&graphic);
    assert!(graphic.is_connected());
    assert!(graphic.parent_element().is_none());
}

#[test]
fn empty_style_value_clears_property() {
    let el = FakeElement::new("div").with_style("width", "10px");
    assert_eq!(el.style("width"), "10px");
    el.set_style("width", "");
    assert_eq!(el.style("width"), "");
    assert!(el.inline_styles().is_empty());
}
