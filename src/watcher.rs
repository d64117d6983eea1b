//! Top-level zoom service: discovery, wiring, and event routing.
//!
//! [`DiagramWatcher`] is the single per-page instance that owns the
//! registry, the readiness gate, and one [`ZoomController`] per enhanced
//! diagram. It never talks to the browser's event machinery directly.
//! Every entry point returns the [`Action`]s the host must carry out:
//! install a listener, arm a timer, start observing. The browser shell
//! performs them with `web_sys`; tests inspect them.

use crate::config::ZoomConfig;
use crate::consts::VECTOR_TAG;
use crate::dom::{Element, Mutation, Page, ReadyState, Selector};
use crate::inspect;
use crate::readiness::{Readiness, ReadinessGate};
use crate::registry::EnhancementRegistry;
use crate::zoom::ZoomController;

#[cfg(test)]
#[path = "watcher_test.rs"]
mod watcher_test;

/// Work the host performs on the watcher's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<E> {
    /// Call [`DiagramWatcher::on_ready`] once the DOM is parsed.
    AwaitReady,
    /// Call [`DiagramWatcher::on_load`] on the window load event.
    AwaitLoad,
    /// Start the body subtree observer (child list + `class` attribute).
    ObserveBody,
    /// Route clicks on this diagram to [`DiagramWatcher::on_diagram_click`].
    AttachClick(E),
    /// Prevent default and stop propagation of the event being handled.
    SuppressEvent,
    /// Route clicks on this overlay to [`DiagramWatcher::on_overlay_click`].
    AttachOverlayClick(E),
    /// Drop the click listener held for this overlay.
    DetachOverlayClick(E),
    /// Route document keydown to [`DiagramWatcher::on_key_down`].
    AddEscapeListener,
    RemoveEscapeListener,
    /// Call [`DiagramWatcher::on_timer`] with `task` after `delay_ms`.
    Schedule { delay_ms: u32, task: Task<E> },
}

/// Deferred work carried by [`Action::Schedule`].
#[derive(Debug, Clone, PartialEq)]
pub enum Task<E> {
    /// The single readiness retry for a claimed diagram.
    Readiness(E),
    /// Re-fit the vector root of a zoomed diagram.
    Adjust(E),
    /// Log a diagnostic report.
    Inspect,
}

pub struct DiagramWatcher<P: Page> {
    page: P,
    config: ZoomConfig,
    candidates: Selector,
    registry: EnhancementRegistry<P::Element>,
    gate: ReadinessGate,
    controllers: Vec<ZoomController<P::Element>>,
    /// Index of the controller that owns the overlay.
    active: Option<usize>,
    observing: bool,
}

impl<P: Page> DiagramWatcher<P> {
    pub fn new(page: P, config: ZoomConfig) -> Self {
        Self {
            candidates: Selector::class(&config.diagram_class),
            registry: EnhancementRegistry::new(&config.marker_attribute),
            gate: ReadinessGate::new(config.readiness_retry_ms),
            controllers: Vec::new(),
            active: None,
            observing: false,
            page,
            config,
        }
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Number of diagrams with a click listener.
    #[must_use]
    pub fn enhanced(&self) -> usize {
        self.controllers.len()
    }

    /// The diagram currently zoomed, if any.
    #[must_use]
    pub fn zoomed(&self) -> Option<&P::Element> {
        self.active
            .and_then(|idx| self.controllers.get(idx))
            .map(ZoomController::diagram)
    }

    #[must_use]
    pub fn controller(&self, diagram: &P::Element) -> Option<&ZoomController<P::Element>> {
        self.controllers.iter().find(|c| c.diagram() == diagram)
    }

    // --- Page lifecycle ---

    /// Begin work for a document in `state`.
    pub fn start(&mut self, state: ReadyState) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        if state == ReadyState::Loading {
            out.push(Action::AwaitReady);
        } else {
            out.extend(self.on_ready());
        }
        if state != ReadyState::Complete {
            out.push(Action::AwaitLoad);
        }
        out
    }

    /// DOM parsed: scan, then start observing (once).
    pub fn on_ready(&mut self) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        self.scan(&mut out);
        if !self.observing {
            self.observing = true;
            out.push(Action::ObserveBody);
        }
        out
    }

    /// Full load: rescan for anything timing let slip, and queue diagnostics.
    pub fn on_load(&mut self) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        self.scan(&mut out);
        if self.config.diagnostics {
            for &delay_ms in &self.config.diagnostic_delays_ms {
                out.push(Action::Schedule { delay_ms, task: Task::Inspect });
            }
        }
        out
    }

    /// One mutation-observer batch, in delivery order.
    pub fn on_mutations(&mut self, batch: &[Mutation<P::Element>]) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        for mutation in batch {
            match mutation {
                Mutation::ChildList { added } => {
                    for node in added {
                        if self.is_candidate(node) {
                            self.route(node.clone(), &mut out);
                        }
                        for nested in node.query_all(&self.candidates) {
                            self.route(nested, &mut out);
                        }
                    }
                    // Renderers that drop the graphic straight into the placeholder.
                    for node in added.iter().filter(|n| n.tag_name().eq_ignore_ascii_case(VECTOR_TAG)) {
                        if let Some(parent) = node.parent_element().filter(|p| self.is_candidate(p)) {
                            self.route(parent, &mut out);
                        }
                    }
                }
                Mutation::Attribute { target, name } => {
                    if name == "class" && self.is_candidate(target) {
                        self.route(target.clone(), &mut out);
                    }
                }
            }
        }
        self.close_if_detached(&mut out);
        self.forget_detached();
        out
    }

    // --- User input ---

    pub fn on_diagram_click(&mut self, diagram: &P::Element) -> Vec<Action<P::Element>> {
        let Some(idx) = self.controllers.iter().position(|c| c.diagram() == diagram) else {
            return Vec::new();
        };
        let mut out = vec![Action::SuppressEvent];
        if self.active != Some(idx) {
            self.open(idx, &mut out);
        }
        out
    }

    pub fn on_overlay_click(&mut self) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        self.close_active(&mut out);
        out
    }

    pub fn on_key_down(&mut self, key: &str) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        if key == "Escape" {
            self.close_active(&mut out);
        }
        out
    }

    // --- Timers ---

    pub fn on_timer(&mut self, task: Task<P::Element>) -> Vec<Action<P::Element>> {
        let mut out = Vec::new();
        match task {
            Task::Readiness(diagram) => match self.gate.recheck(diagram.clone()) {
                Some(ready) => self.attach(ready, &mut out),
                None => self.registry.release(&diagram),
            },
            Task::Adjust(diagram) => {
                if let Some(ctl) = self.controllers.iter_mut().find(|c| c.diagram() == &diagram) {
                    ctl.adjust(&self.page, &self.config);
                }
            }
            Task::Inspect => {
                let reports = inspect::inspect(&self.page, &self.candidates, &self.config.marker_attribute);
                inspect::log_reports(&reports);
            }
        }
        out
    }

    // --- Pipeline ---

    fn is_candidate(&self, el: &P::Element) -> bool {
        self.candidates.matches(el)
    }

    fn scan(&mut self, out: &mut Vec<Action<P::Element>>) {
        for diagram in self.page.query_all(&self.candidates) {
            self.route(diagram, out);
        }
    }

    /// Registry → readiness → attach.
    fn route(&mut self, diagram: P::Element, out: &mut Vec<Action<P::Element>>) {
        if !self.registry.try_enhance(&diagram) {
            return;
        }
        match self.gate.check(diagram) {
            Readiness::Ready(diagram) => self.attach(diagram, out),
            Readiness::Retry { diagram, delay_ms } => {
                log::debug!("diagram not laid out yet, retrying in {delay_ms}ms");
                out.push(Action::Schedule { delay_ms, task: Task::Readiness(diagram) });
            }
        }
    }

    fn attach(&mut self, diagram: P::Element, out: &mut Vec<Action<P::Element>>) {
        self.registry.commit(&diagram);
        self.controllers.push(ZoomController::attach(diagram.clone()));
        out.push(Action::AttachClick(diagram));
        log::info!("zoom enabled for diagram #{}", self.controllers.len());
    }

    fn open(&mut self, idx: usize, out: &mut Vec<Action<P::Element>>) {
        // One overlay page-wide: the current owner gives it up first.
        self.close_active(out);
        let Some(ctl) = self.controllers.get_mut(idx) else {
            return;
        };
        match ctl.open(&self.page, &self.config) {
            Ok(overlay) => {
                self.active = Some(idx);
                out.push(Action::AttachOverlayClick(overlay));
                out.push(Action::AddEscapeListener);
                for &delay_ms in &self.config.adjust_delays_ms {
                    out.push(Action::Schedule { delay_ms, task: Task::Adjust(ctl.diagram().clone()) });
                }
            }
            Err(err) => log::warn!("could not open diagram zoom: {err}"),
        }
    }

    fn close_active(&mut self, out: &mut Vec<Action<P::Element>>) {
        let Some(idx) = self.active.take() else {
            return;
        };
        if let Some(overlay) = self.controllers.get_mut(idx).and_then(ZoomController::close) {
            out.push(Action::RemoveEscapeListener);
            out.push(Action::DetachOverlayClick(overlay));
        }
    }

    fn close_if_detached(&mut self, out: &mut Vec<Action<P::Element>>) {
        if self.zoomed().is_some_and(|d| !d.is_connected()) {
            log::debug!("zoomed diagram left the document, closing");
            self.close_active(out);
        }
    }

    /// Drop controllers whose diagram is gone. Runs after
    /// [`Self::close_if_detached`], so the active diagram is still connected.
    fn forget_detached(&mut self) {
        let before = self.controllers.len();
        let active = self.zoomed().cloned();
        self.controllers.retain(|c| c.diagram().is_connected());
        let dropped = before - self.controllers.len();
        if dropped == 0 {
            return;
        }
        self.active = active.and_then(|d| self.controllers.iter().position(|c| c.diagram() == &d));
        log::debug!("forgot {dropped} detached diagram(s)");
    }
}
