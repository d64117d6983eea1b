//! DOM capability seam.
//!
//! The zoom core never touches a concrete DOM. It works against the traits
//! here: [`Element`] for the handful of per-node operations it needs,
//! [`MarkupContainer`] for "search inside me" (implemented once for light
//! trees and once for shadow roots), and [`Page`] for document-wide queries.
//! The browser shell implements them over `web_sys`; tests use an in-memory
//! fake.

use std::fmt;

use crate::error::ZoomError;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// Layout dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are strictly positive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The small selector vocabulary the core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Elements carrying a class.
    Class(String),
    /// Elements with a tag name (case-insensitive).
    Tag(String),
    /// Every element.
    Any,
}

impl Selector {
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::Class(name.to_string())
    }

    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self::Tag(name.to_string())
    }

    /// Whether `el` itself matches.
    pub fn matches<E: Element>(&self, el: &E) -> bool {
        match self {
            Self::Class(class) => el.has_class(class),
            Self::Tag(tag) => el.tag_name().eq_ignore_ascii_case(tag),
            Self::Any => true,
        }
    }
}

impl fmt::Display for Selector {
    /// CSS form, for hosts that query with selector strings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => f.write_str(tag),
            Self::Any => f.write_str("*"),
        }
    }
}

/// Something that can be searched for a descendant element.
pub trait MarkupContainer<E> {
    /// First descendant matching `selector`, in document order.
    fn find_descendant(&self, selector: &Selector) -> Option<E>;
}

/// A DOM element handle.
///
/// Handles are cheap reference-like values; mutation goes through `&self`
/// the same way it does on a live DOM node. Equality is node identity.
pub trait Element: Clone + PartialEq + fmt::Debug {
    /// The element's attached shadow root type.
    type Shadow: MarkupContainer<Self>;

    fn tag_name(&self) -> String;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn parent_element(&self) -> Option<Self>;
    /// Direct element children.
    fn children(&self) -> Vec<Self>;
    /// Light-tree descendants matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self>;
    /// The open shadow root attached to this element, if any.
    fn shadow_root(&self) -> Option<Self::Shadow>;
    /// Inline style value, or an empty string if unset.
    fn style(&self, property: &str) -> String;
    /// Set an inline style. An empty value removes the property.
    fn set_style(&self, property: &str, value: &str);
    /// Rendered layout size.
    fn layout_size(&self) -> Size;
    /// Whether the element is still attached to the document.
    fn is_connected(&self) -> bool;
    /// Detach the element from its parent.
    fn remove(&self);

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn query_first(&self, selector: &Selector) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }
}

/// An element's own light tree, viewed as a container.
#[derive(Debug)]
pub struct LightTree<'a, E>(pub &'a E);

impl<E: Element> MarkupContainer<E> for LightTree<'_, E> {
    fn find_descendant(&self, selector: &Selector) -> Option<E> {
        self.0.query_first(selector)
    }
}

/// Document-level operations.
pub trait Page {
    type Element: Element;

    /// All elements in the document matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// An attribute on the document element (`<html>`).
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Size;

    /// Create a detached element.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError::Dom`] if the host refuses the tag.
    fn create_element(&self, tag: &str) -> Result<Self::Element, ZoomError>;

    /// Append an element to `<body>`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError::MissingBody`] or [`ZoomError::Dom`].
    fn append_to_body(&self, el: &Self::Element) -> Result<(), ZoomError>;
}

/// One record from a mutation batch, reduced to what detection needs.
#[derive(Debug, Clone)]
pub enum Mutation<E> {
    /// Nodes were inserted somewhere in the observed subtree. Only element
    /// nodes are listed, in document order.
    ChildList { added: Vec<E> },
    /// An attribute on `target` changed.
    Attribute { target: E, name: String },
}

/// Document loading phase, as reported by `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse the `document.readyState` string. Unknown values count as loading.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "interactive" => Self::Interactive,
            "complete" => Self::Complete,
            _ => Self::Loading,
        }
    }
}
