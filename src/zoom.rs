//! Per-diagram zoom state machine.
//!
//! A [`ZoomController`] is created when a diagram is enhanced. It captures
//! the diagram's inline styles once, then toggles between Idle and Zoomed:
//!
//! - **open** builds the overlay, turns the diagram itself into a fixed,
//!   centered box, and fits its vector root to that box.
//! - **adjust** re-fits the vector root; it is re-run on timers because the
//!   renderer may still be replacing the graphic.
//! - **close** writes the captured styles back, restores the vector root,
//!   and removes the overlay.
//!
//! Listener and timer wiring is left to the caller.

use crate::config::ZoomConfig;
use crate::consts::{DIAGRAM_PROPERTIES, OVERLAY_ATTRIBUTE, OVERLAY_BACKGROUND, VECTOR_PROPERTIES};
use crate::dom::{Element, Page, Size};
use crate::error::ZoomError;
use crate::fit::{ViewBox, available_box, fitted_size};
use crate::locator;
use crate::snapshot::StyleSnapshot;

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

/// Page color scheme, read when a zoom opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Read the scheme attribute on the document element.
    pub fn detect<P: Page>(page: &P, config: &ZoomConfig) -> Self {
        match page.root_attribute(&config.theme_attribute) {
            Some(value) if value == config.dark_scheme => Self::Dark,
            _ => Self::Light,
        }
    }

    fn background(self) -> &'static str {
        match self {
            Self::Light => "white",
            Self::Dark => "#2b2b2b",
        }
    }

    fn shadow(self) -> &'static str {
        match self {
            Self::Light => "0 0 50px rgba(0,0,0,0.8)",
            Self::Dark => "0 0 50px rgba(0,0,0,0.95)",
        }
    }
}

/// The vector root styled during a session, with its pre-zoom styles.
#[derive(Debug)]
struct StyledVector<E> {
    root: E,
    snapshot: StyleSnapshot,
}

/// Everything owned while Zoomed.
#[derive(Debug)]
pub struct ZoomSession<E> {
    overlay: E,
    theme: Theme,
    vector: Option<StyledVector<E>>,
}

#[derive(Debug)]
pub enum ZoomState<E> {
    Idle,
    Zoomed(ZoomSession<E>),
}

#[derive(Debug)]
pub struct ZoomController<E> {
    diagram: E,
    snapshot: StyleSnapshot,
    state: ZoomState<E>,
}

impl<E: Element> ZoomController<E> {
    /// Capture the diagram's styles and mark it clickable.
    pub fn attach(diagram: E) -> Self {
        let snapshot = StyleSnapshot::capture(&diagram, &DIAGRAM_PROPERTIES);
        diagram.set_style("cursor", "zoom-in");
        Self { diagram, snapshot, state: ZoomState::Idle }
    }

    #[must_use]
    pub fn diagram(&self) -> &E {
        &self.diagram
    }

    /// Styles captured at attach time. Inspection accessors from here to
    /// [`Self::vector_root`] are not used by the zoom cycle itself.
    #[must_use]
    pub fn snapshot(&self) -> &StyleSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        matches!(self.state, ZoomState::Zoomed(_))
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&E> {
        match &self.state {
            ZoomState::Zoomed(session) => Some(&session.overlay),
            ZoomState::Idle => None,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        match &self.state {
            ZoomState::Zoomed(session) => Some(session.theme),
            ZoomState::Idle => None,
        }
    }

    /// The vector root currently styled by this session.
    #[must_use]
    pub fn vector_root(&self) -> Option<&E> {
        match &self.state {
            ZoomState::Zoomed(session) => session.vector.as_ref().map(|v| &v.root),
            ZoomState::Idle => None,
        }
    }

    /// Idle → Zoomed. Returns the new overlay.
    ///
    /// Already zoomed: returns the existing overlay and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the host error if the overlay cannot be created or appended;
    /// the diagram is left untouched in that case.
    pub fn open<P: Page<Element = E>>(&mut self, page: &P, config: &ZoomConfig) -> Result<E, ZoomError> {
        if let ZoomState::Zoomed(session) = &self.state {
            return Ok(session.overlay.clone());
        }

        let theme = Theme::detect(page, config);
        let overlay = build_overlay(page, config)?;
        page.append_to_body(&overlay)?;

        self.apply_zoomed_style(theme, config);
        self.state = ZoomState::Zoomed(ZoomSession { overlay: overlay.clone(), theme, vector: None });
        self.adjust(page, config);
        log::debug!("diagram zoomed ({theme:?})");
        Ok(overlay)
    }

    /// Fit and filter the vector root. Returns whether one was found.
    ///
    /// Inert while Idle.
    pub fn adjust<P: Page<Element = E>>(&mut self, page: &P, config: &ZoomConfig) -> bool {
        let Self { diagram, state, .. } = self;
        let ZoomState::Zoomed(session) = state else {
            return false;
        };
        let Some(root) = locator::locate(diagram) else {
            log::debug!("no vector content in zoomed diagram yet");
            return false;
        };

        let known = session.vector.as_ref().is_some_and(|v| v.root == root);
        if !known {
            // The renderer swapped the graphic: hand the old one back first.
            if let Some(old) = session.vector.take() {
                old.snapshot.restore(&old.root);
            }
            let snapshot = StyleSnapshot::capture(&root, &VECTOR_PROPERTIES);
            session.vector = Some(StyledVector { root: root.clone(), snapshot });
        }

        fit_vector(&root, page.viewport(), config);
        match session.theme {
            Theme::Dark => root.set_style("filter", &config.dark_filter),
            Theme::Light => root.set_style("filter", ""),
        }
        true
    }

    /// Zoomed → Idle. Returns the removed overlay, or `None` if already Idle.
    pub fn close(&mut self) -> Option<E> {
        let ZoomState::Zoomed(session) = std::mem::replace(&mut self.state, ZoomState::Idle) else {
            return None;
        };
        self.snapshot.restore(&self.diagram);
        if let Some(vector) = session.vector {
            vector.snapshot.restore(&vector.root);
        }
        session.overlay.remove();
        log::debug!("diagram zoom closed");
        Some(session.overlay)
    }

    fn apply_zoomed_style(&self, theme: Theme, config: &ZoomConfig) {
        let percent = config.zoom_fraction * 100.0;
        let d = &self.diagram;
        d.set_style("position", "fixed");
        d.set_style("left", "50%");
        d.set_style("top", "50%");
        d.set_style("transform", "translate(-50%, -50%)");
        d.set_style("z-index", &(i64::from(config.overlay_z_index) + 1).to_string());
        d.set_style("padding", &px(config.padding_px));
        d.set_style("margin", "0");
        d.set_style("border-radius", "10px");
        d.set_style("width", &format!("{percent}vw"));
        d.set_style("height", &format!("{percent}vh"));
        d.set_style("max-width", "none");
        d.set_style("max-height", "none");
        d.set_style("overflow", "auto");
        d.set_style("display", "flex");
        d.set_style("background", theme.background());
        d.set_style("box-shadow", theme.shadow());
    }
}

fn build_overlay<P: Page>(page: &P, config: &ZoomConfig) -> Result<P::Element, ZoomError> {
    let overlay = page.create_element("div")?;
    overlay.set_attribute(OVERLAY_ATTRIBUTE, "true");
    for (name, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("background", OVERLAY_BACKGROUND),
        ("cursor", "zoom-out"),
    ] {
        overlay.set_style(name, value);
    }
    overlay.set_style("z-index", &config.overlay_z_index.to_string());
    Ok(overlay)
}

/// Size the vector root inside the zoomed box, preserving aspect ratio.
fn fit_vector<E: Element>(root: &E, viewport: Size, config: &ZoomConfig) {
    // Auto margins center the flex item on both axes.
    root.set_style("margin", "auto");
    root.set_style("max-width", "none");
    root.set_style("max-height", "none");
    root.set_style("display", "block");
    root.set_style("image-rendering", "crisp-edges");
    root.set_style("shape-rendering", "geometricPrecision");

    let declared = root.attribute("viewBox");
    match declared.as_deref().and_then(ViewBox::parse) {
        Some(view_box) => {
            let available = available_box(viewport, config.zoom_fraction, config.padding_px);
            let size = fitted_size(view_box.size(), available);
            root.set_style("width", &px(size.width));
            root.set_style("height", &px(size.height));
            root.set_style("object-fit", "");
        }
        None => {
            root.set_style("width", "100%");
            root.set_style("height", "100%");
            root.set_style("object-fit", "contain");
        }
    }
}

/// CSS pixel length, rounded to two decimals.
fn px(value: f64) -> String {
    format!("{}px", (value * 100.0).round() / 100.0)
}
