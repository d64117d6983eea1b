//! Browser shell: `web_sys` implementation of the DOM seam and the host
//! side of every [`Action`].
//!
//! ARCHITECTURE
//! ============
//! One [`Runtime`] per page sits in an `Rc<RefCell<_>>` shared by every
//! listener, observer and timer closure. Each callback borrows it just long
//! enough to ask the [`DiagramWatcher`] for actions, releases it, and then
//! performs those actions. DOM writes inside the watcher never dispatch our
//! own callbacks synchronously (mutation records arrive as microtasks), so
//! the borrow is never re-entered.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Event, HtmlElement, KeyboardEvent, MutationObserver, MutationObserverInit,
    MutationRecord, NodeList, ShadowRoot, SvgElement, Window,
};

use crate::config::ZoomConfig;
use crate::dom::{self, MarkupContainer, Mutation, Page, ReadyState, Selector, Size};
use crate::error::ZoomError;
use crate::watcher::{Action, DiagramWatcher, Task};

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "diagram-zoom-config";

type El = web_sys::Element;
type Handle = Rc<RefCell<Runtime>>;

fn dom_err(err: JsValue) -> ZoomError {
    ZoomError::Dom(format!("{err:?}"))
}

// =============================================================
// Page
// =============================================================

pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// Bind to the global window and its document.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError::MissingWindow`] outside a browsing context.
    pub fn from_window() -> Result<Self, ZoomError> {
        let window = web_sys::window().ok_or(ZoomError::MissingWindow)?;
        let document = window.document().ok_or(ZoomError::MissingWindow)?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state())
    }

    /// Config from the page, or defaults plus the reason the page's was rejected.
    #[must_use]
    pub fn read_config(&self) -> (ZoomConfig, Option<ZoomError>) {
        let Some(script) = self.document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return (ZoomConfig::default(), None);
        };
        let raw = web_sys::Node::text_content(&script).unwrap_or_default();
        match ZoomConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(err) => (ZoomConfig::default(), Some(err)),
        }
    }

    fn body(&self) -> Result<HtmlElement, ZoomError> {
        self.document.body().ok_or(ZoomError::MissingBody)
    }
}

impl Page for BrowserPage {
    type Element = El;

    fn query_all(&self, selector: &Selector) -> Vec<El> {
        match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => elements(&list),
            Err(err) => {
                log::warn!("query {selector} failed: {err:?}");
                Vec::new()
            }
        }
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn viewport(&self) -> Size {
        let width = self.window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        let height = self.window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        Size::new(width, height)
    }

    fn create_element(&self, tag: &str) -> Result<El, ZoomError> {
        self.document.create_element(tag).map_err(dom_err)
    }

    fn append_to_body(&self, el: &El) -> Result<(), ZoomError> {
        self.body()?.append_child(el).map_err(dom_err)?;
        Ok(())
    }
}

// =============================================================
// Element
// =============================================================

fn elements(list: &NodeList) -> Vec<El> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<El>().cloned())
        .collect()
}

fn inline_style(el: &El) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    el.dyn_ref::<SvgElement>().map(SvgElement::style)
}

impl dom::Element for El {
    type Shadow = ShadowRoot;

    fn tag_name(&self) -> String {
        El::tag_name(self)
    }

    fn has_class(&self, class: &str) -> bool {
        El::class_list(self).contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        El::get_attribute(self, name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = El::set_attribute(self, name, value) {
            log::warn!("set attribute {name} failed: {err:?}");
        }
    }

    fn parent_element(&self) -> Option<El> {
        web_sys::Node::parent_element(self)
    }

    fn children(&self) -> Vec<El> {
        let collection = El::children(self);
        (0..collection.length()).filter_map(|i| collection.item(i)).collect()
    }

    fn query_all(&self, selector: &Selector) -> Vec<El> {
        match El::query_selector_all(self, &selector.to_string()) {
            Ok(list) => elements(&list),
            Err(err) => {
                log::warn!("query {selector} failed: {err:?}");
                Vec::new()
            }
        }
    }

    fn shadow_root(&self) -> Option<ShadowRoot> {
        El::shadow_root(self)
    }

    fn style(&self, property: &str) -> String {
        inline_style(self)
            .map(|style| style.get_property_value(property).unwrap_or_default())
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(style) = inline_style(self) else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            log::warn!("set style {property} failed: {err:?}");
        }
    }

    fn layout_size(&self) -> Size {
        if let Some(html) = self.dyn_ref::<HtmlElement>() {
            return Size::new(f64::from(html.offset_width()), f64::from(html.offset_height()));
        }
        let rect = El::get_bounding_client_rect(self);
        Size::new(rect.width(), rect.height())
    }

    fn is_connected(&self) -> bool {
        web_sys::Node::is_connected(self)
    }

    fn remove(&self) {
        El::remove(self);
    }
}

impl MarkupContainer<El> for ShadowRoot {
    fn find_descendant(&self, selector: &Selector) -> Option<El> {
        match self.query_selector(&selector.to_string()) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("shadow query {selector} failed: {err:?}");
                None
            }
        }
    }
}

/// Reduce observer records to the mutations detection cares about.
fn mutations(records: &Array) -> Vec<Mutation<El>> {
    let mut batch = Vec::new();
    for value in records.iter() {
        let Some(record) = value.dyn_ref::<MutationRecord>() else {
            continue;
        };
        match record.type_().as_str() {
            "childList" => batch.push(Mutation::ChildList { added: elements(&record.added_nodes()) }),
            "attributes" => {
                let target = record.target().and_then(|node| node.dyn_ref::<El>().cloned());
                if let (Some(target), Some(name)) = (target, record.attribute_name()) {
                    batch.push(Mutation::Attribute { target, name });
                }
            }
            _ => {}
        }
    }
    batch
}

// =============================================================
// Runtime
// =============================================================

struct Runtime {
    watcher: DiagramWatcher<BrowserPage>,
    escape: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    overlay: Option<(El, Closure<dyn FnMut(Event)>)>,
    observer: Option<(MutationObserver, Closure<dyn FnMut(Array, MutationObserver)>)>,
}

/// Drop a listener closure after the current event finishes dispatching.
///
/// A closure must not be freed while it is running, and close paths run
/// inside the very listener being removed.
fn release_later<T: 'static>(value: T) {
    Timeout::new(0, move || drop(value)).forget();
}

fn perform(handle: &Handle, actions: Vec<Action<El>>) {
    for action in actions {
        if let Err(err) = perform_one(handle, action) {
            log::warn!("diagram zoom action failed: {err}");
        }
    }
}

fn perform_one(handle: &Handle, action: Action<El>) -> Result<(), ZoomError> {
    match action {
        Action::AwaitReady => {
            let document = handle.borrow().watcher.page().document.clone();
            let h = Rc::clone(handle);
            let cb = Closure::once_into_js(move || {
                let actions = h.borrow_mut().watcher.on_ready();
                perform(&h, actions);
            });
            document
                .add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
                .map_err(dom_err)
        }
        Action::AwaitLoad => {
            let window = handle.borrow().watcher.page().window.clone();
            let h = Rc::clone(handle);
            let cb = Closure::once_into_js(move || {
                let actions = h.borrow_mut().watcher.on_load();
                perform(&h, actions);
            });
            window.add_event_listener_with_callback("load", cb.unchecked_ref()).map_err(dom_err)
        }
        Action::ObserveBody => observe_body(handle),
        Action::AttachClick(diagram) => {
            let h = Rc::clone(handle);
            let target = diagram.clone();
            let cb = Closure::wrap(Box::new(move |event: Event| {
                let actions = h.borrow_mut().watcher.on_diagram_click(&target);
                if actions.contains(&Action::SuppressEvent) {
                    event.prevent_default();
                    event.stop_propagation();
                }
                perform(&h, actions);
            }) as Box<dyn FnMut(Event)>);
            diagram
                .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            // Lives as long as the page.
            cb.forget();
            Ok(())
        }
        Action::SuppressEvent => Ok(()),
        Action::AttachOverlayClick(overlay) => {
            let h = Rc::clone(handle);
            let cb = Closure::wrap(Box::new(move |_event: Event| {
                let actions = h.borrow_mut().watcher.on_overlay_click();
                perform(&h, actions);
            }) as Box<dyn FnMut(Event)>);
            overlay
                .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            let previous = handle.borrow_mut().overlay.replace((overlay, cb));
            if let Some(previous) = previous {
                release_later(previous);
            }
            Ok(())
        }
        Action::DetachOverlayClick(overlay) => {
            let held = handle.borrow_mut().overlay.take();
            let Some((el, cb)) = held else {
                return Ok(());
            };
            let removed = if el == overlay {
                el.remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            } else {
                Ok(())
            };
            release_later(cb);
            removed.map_err(dom_err)
        }
        Action::AddEscapeListener => {
            if handle.borrow().escape.is_some() {
                return Ok(());
            }
            let document = handle.borrow().watcher.page().document.clone();
            let h = Rc::clone(handle);
            let cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let actions = h.borrow_mut().watcher.on_key_down(&event.key());
                perform(&h, actions);
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document
                .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            handle.borrow_mut().escape = Some(cb);
            Ok(())
        }
        Action::RemoveEscapeListener => {
            let held = handle.borrow_mut().escape.take();
            let Some(cb) = held else {
                return Ok(());
            };
            let document = handle.borrow().watcher.page().document.clone();
            let removed = document.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
            release_later(cb);
            removed.map_err(dom_err)
        }
        Action::Schedule { delay_ms, task } => {
            schedule(handle, delay_ms, task);
            Ok(())
        }
    }
}

fn schedule(handle: &Handle, delay_ms: u32, task: Task<El>) {
    let h = Rc::clone(handle);
    Timeout::new(delay_ms, move || {
        let actions = h.borrow_mut().watcher.on_timer(task);
        perform(&h, actions);
    })
    .forget();
}

fn observe_body(handle: &Handle) -> Result<(), ZoomError> {
    if handle.borrow().observer.is_some() {
        return Ok(());
    }
    let body = handle.borrow().watcher.page().body()?;

    let h = Rc::clone(handle);
    let cb = Closure::wrap(Box::new(move |records: Array, _observer: MutationObserver| {
        let batch = mutations(&records);
        let actions = h.borrow_mut().watcher.on_mutations(&batch);
        perform(&h, actions);
    }) as Box<dyn FnMut(Array, MutationObserver)>);
    let observer = MutationObserver::new(cb.as_ref().unchecked_ref()).map_err(dom_err)?;

    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    init.set_attributes(true);
    init.set_attribute_filter(&Array::of1(&JsValue::from_str("class")));
    observer.observe_with_options(&body, &init).map_err(dom_err)?;

    handle.borrow_mut().observer = Some((observer, cb));
    log::debug!("watching document body for diagrams");
    Ok(())
}

// =============================================================
// Entry points
// =============================================================

fn init_logging(level: log::Level) {
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}

/// Start zoom support on `page` with `config`.
pub fn start(page: BrowserPage, config: ZoomConfig) {
    let state = page.ready_state();
    let handle = Rc::new(RefCell::new(Runtime {
        watcher: DiagramWatcher::new(page, config),
        escape: None,
        overlay: None,
        observer: None,
    }));
    let actions = handle.borrow_mut().watcher.start(state);
    perform(&handle, actions);
}

/// Module entry: runs once when the WASM module is instantiated.
#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    let page = match BrowserPage::from_window() {
        Ok(page) => page,
        Err(err) => {
            init_logging(log::Level::Warn);
            log::warn!("diagram zoom disabled: {err}");
            return;
        }
    };
    let (config, rejected) = page.read_config();
    init_logging(config.level());
    if let Some(err) = rejected {
        log::warn!("ignoring page config, using defaults: {err}");
    }
    start(page, config);
}
