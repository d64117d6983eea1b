//! Locates the rendered vector root inside a diagram.
//!
//! Renderers either append the graphic straight into the placeholder or
//! mount it inside a shadow root on some descendant. The locator tries the
//! diagram's light tree first, then every descendant shadow root in document
//! order, through the same [`MarkupContainer`] capability. Lookups are
//! read-only, so callers re-run them freely while rendering settles.

use crate::consts::VECTOR_TAG;
use crate::dom::{Element, LightTree, MarkupContainer, Selector};

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;

/// Containers to search for `diagram`, in priority order.
///
/// Descendants are only enumerated once the light tree has come up empty.
fn containers<'a, E>(diagram: &'a E) -> impl Iterator<Item = Box<dyn MarkupContainer<E> + 'a>>
where
    E: Element + 'a,
    E::Shadow: 'a,
{
    let light = std::iter::once(Box::new(LightTree(diagram)) as Box<dyn MarkupContainer<E> + 'a>);
    let shadows = std::iter::once(diagram)
        .flat_map(|host| host.query_all(&Selector::Any))
        .filter_map(|el| el.shadow_root())
        .map(|root| Box::new(root) as Box<dyn MarkupContainer<E> + 'a>);
    light.chain(shadows)
}

/// The first vector root found for `diagram`, if any.
pub fn locate<E: Element>(diagram: &E) -> Option<E> {
    let selector = Selector::tag(VECTOR_TAG);
    containers(diagram).find_map(|container| container.find_descendant(&selector))
}
