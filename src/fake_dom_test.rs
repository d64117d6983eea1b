//! In-memory DOM used by the unit tests.
//!
//! Just enough tree to exercise the zoom core: tags, classes, attributes,
//! inline styles, a settable layout size, open shadow roots, and a document
//! root for connectivity checks.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::consts::OVERLAY_ATTRIBUTE;
use crate::dom::{Element, MarkupContainer, Page, Selector, Size};
use crate::error::ZoomError;

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    size: Size,
    children: Vec<FakeElement>,
    parent: Option<Weak<RefCell<Node>>>,
    shadow: Option<FakeElement>,
    host: Option<Weak<RefCell<Node>>>,
    fragment: bool,
    document_root: bool,
}

#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<Node>>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        write!(f, "<{}", node.tag)?;
        if !node.classes.is_empty() {
            write!(f, " class=\"{}\"", node.classes.join(" "))?;
        }
        f.write_str(">")
    }
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node { tag: tag.to_string(), ..Node::default() })))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.set_size(width, height);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_style(self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.push(class.to_string());
    }

    pub fn set_size(&self, width: f64, height: f64) {
        self.0.borrow_mut().size = Size::new(width, height);
    }

    pub fn append(&self, child: &FakeElement) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn attach_shadow(&self) -> FakeShadow {
        let root = FakeElement::new("#shadow-root");
        {
            let mut node = root.0.borrow_mut();
            node.fragment = true;
            node.host = Some(Rc::downgrade(&self.0));
        }
        self.0.borrow_mut().shadow = Some(root.clone());
        FakeShadow(root)
    }

    /// Every inline style currently set, for whole-map comparisons.
    pub fn inline_styles(&self) -> BTreeMap<String, String> {
        self.0.borrow().style.clone()
    }

    fn descendants(&self, out: &mut Vec<FakeElement>) {
        for child in &self.0.borrow().children {
            out.push(child.clone());
            child.descendants(out);
        }
    }
}

impl Element for FakeElement {
    type Shadow = FakeShadow;

    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.0.borrow().parent.as_ref()?.upgrade()?;
        if parent.borrow().fragment {
            return None;
        }
        Some(FakeElement(parent))
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn query_all(&self, selector: &Selector) -> Vec<Self> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.into_iter().filter(|el| selector.matches(el)).collect()
    }

    fn shadow_root(&self) -> Option<FakeShadow> {
        self.0.borrow().shadow.clone().map(FakeShadow)
    }

    fn style(&self, property: &str) -> String {
        self.0.borrow().style.get(property).cloned().unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if value.is_empty() {
            node.style.remove(property);
        } else {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    fn layout_size(&self) -> Size {
        self.0.borrow().size
    }

    fn is_connected(&self) -> bool {
        let mut current = self.0.clone();
        loop {
            let next = {
                let node = current.borrow();
                if node.document_root {
                    return true;
                }
                let up = if node.fragment { node.host.as_ref() } else { node.parent.as_ref() };
                match up.and_then(Weak::upgrade) {
                    Some(next) => next,
                    None => return false,
                }
            };
            current = next;
        }
    }

    fn remove(&self) {
        let parent = self.0.borrow_mut().parent.take().and_then(|w| w.upgrade());
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
    }
}

/// An attached shadow root.
#[derive(Debug, Clone)]
pub struct FakeShadow(FakeElement);

impl FakeShadow {
    pub fn append(&self, child: &FakeElement) {
        self.0.append(child);
    }
}

impl MarkupContainer<FakeElement> for FakeShadow {
    fn find_descendant(&self, selector: &Selector) -> Option<FakeElement> {
        self.0.query_first(selector)
    }
}

pub struct FakePage {
    pub html: FakeElement,
    pub body: FakeElement,
    viewport: Cell<Size>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePage {
    pub fn new() -> Self {
        let html = FakeElement::new("html");
        html.0.borrow_mut().document_root = true;
        let body = FakeElement::new("body");
        html.append(&body);
        Self { html, body, viewport: Cell::new(Size::new(1000.0, 800.0)) }
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        self.viewport.set(Size::new(width, height));
    }

    pub fn set_theme(&self, attribute: &str, value: &str) {
        self.html.set_attribute(attribute, value);
    }

    pub fn overlays(&self) -> Vec<FakeElement> {
        self.html
            .query_all(&Selector::Any)
            .into_iter()
            .filter(|el| el.has_attribute(OVERLAY_ATTRIBUTE))
            .collect()
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn query_all(&self, selector: &Selector) -> Vec<FakeElement> {
        self.html.query_all(selector)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.html.attribute(name)
    }

    fn viewport(&self) -> Size {
        self.viewport.get()
    }

    fn create_element(&self, tag: &str) -> Result<FakeElement, ZoomError> {
        Ok(FakeElement::new(tag))
    }

    fn append_to_body(&self, el: &FakeElement) -> Result<(), ZoomError> {
        self.body.append(el);
        Ok(())
    }
}

/// A laid-out diagram placeholder with the default class.
pub fn diagram(width: f64, height: f64) -> FakeElement {
    FakeElement::new("div").with_class("mermaid").with_size(width, height)
}

/// A vector root declaring `viewBox`.
pub fn svg(view_box: &str) -> FakeElement {
    FakeElement::new("svg").with_attr("viewBox", view_box)
}
