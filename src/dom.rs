//! Browser-side helpers shared by the behavior units.
//!
//! Only compiled with the `hydrate` feature. The helpers return `Option` or
//! `Result<_, SetupError>` so units can bail out with a guard clause instead
//! of sprinkling `JsValue` handling through their logic.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::SetupError;

/// An event subscription that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Js`] if the browser refuses the registration.
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }

    /// Like [`Listener::new`] but marked passive, for scroll and resize.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Js`] if the browser refuses the registration.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("failed to remove {} listener: {err:?}", self.event);
        }
    }
}

/// # Errors
///
/// Returns [`SetupError::MissingElement`] outside a document context.
pub fn window() -> Result<Window, SetupError> {
    web_sys::window().ok_or(SetupError::MissingElement("window"))
}

/// # Errors
///
/// Returns [`SetupError::MissingElement`] outside a document context.
pub fn document() -> Result<Document, SetupError> {
    window()?.document().ok_or(SetupError::MissingElement("document"))
}

/// Milliseconds on the most monotonic clock available.
///
/// `performance.now()` when the page has it, wall-clock time otherwise.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |perf| perf.now())
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .map_or(0.0, |value| value.as_f64().unwrap_or(0.0))
}

pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// All elements under `document` matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(_) => Vec::new(),
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The closest ancestor-or-self of the event target matching `selector`.
pub fn closest_from_event(event: &Event, selector: &str) -> Option<Element> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    element.closest(selector).ok().flatten()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        log::debug!("class toggle {class} failed: {err:?}");
    }
}

pub fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::debug!("set {name} failed: {err:?}");
    }
}

pub fn remove_attr(element: &Element, name: &str) {
    if let Err(err) = element.remove_attribute(name) {
        log::debug!("remove {name} failed: {err:?}");
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::debug!("style {property} failed: {err:?}");
    }
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    if let Err(err) = element.style().remove_property(property) {
        log::debug!("clear style {property} failed: {err:?}");
    }
}

pub fn focus(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = html.focus() {
            log::debug!("focus failed: {err:?}");
        }
    }
}

pub fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// Fragment id named by an in-page `href`, without the leading `#`.
pub fn href_fragment(link: &Element) -> Option<String> {
    let href = link.get_attribute("href")?;
    crate::anchor::fragment_id(&href).map(str::to_owned)
}
