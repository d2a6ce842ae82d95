//! Burger menu: overlay, focus trap and scroll auto-close.
//!
//! The checkbox `#menu_checkbox` is the source of truth for open/closed. Every
//! other close path (Escape, overlay click, nav link click, scrolling away)
//! unchecks it and then re-syncs. [`MenuCore`] holds the state that survives
//! between events; the browser half applies its transitions to the DOM.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::config::MenuConfig;

/// Open/closed state plus what is needed to undo an open.
///
/// `F` is whatever identifies a focus target. The browser passes DOM
/// elements; tests pass plain labels.
#[derive(Debug)]
pub struct MenuCore<F> {
    open: bool,
    open_scroll_y: f64,
    guard_until_ms: f64,
    last_focused: Option<F>,
    config: MenuConfig,
}

impl<F> MenuCore<F> {
    #[must_use]
    pub fn new(config: MenuConfig) -> Self {
        Self { open: false, open_scroll_y: 0.0, guard_until_ms: 0.0, last_focused: None, config }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Record an open. Returns `false` if the menu was already open, in which
    /// case the originally focused element is kept.
    pub fn open(&mut self, focused: Option<F>, scroll_y: f64, now_ms: f64) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.last_focused = focused;
        self.open_scroll_y = scroll_y;
        self.guard_until_ms = now_ms + self.config.open_guard_ms;
        true
    }

    /// Record a close and hand back the element that should regain focus.
    ///
    /// Closing an already closed menu restores nothing.
    pub fn close(&mut self) -> Option<F> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.last_focused.take()
    }

    /// Whether a scroll to `scroll_y` at `now_ms` should close the menu.
    ///
    /// Momentum and rubber-band scrolling right after opening are ignored
    /// until the guard window passes.
    #[must_use]
    pub fn should_close_on_scroll(&self, scroll_y: f64, now_ms: f64) -> bool {
        if !self.open || now_ms < self.guard_until_ms {
            return false;
        }
        (scroll_y - self.open_scroll_y).abs() > self.config.close_delta_px
    }
}

/// Where Tab should send focus inside a region of `count` focusables.
///
/// `active` is the index of the focused element within the region, or `None`
/// if focus is outside it. Returns `None` when the browser's default move is
/// already correct.
#[must_use]
pub fn trap_target(count: usize, active: Option<usize>, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (active, shift) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{MenuHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent};

    use super::{MenuCore, trap_target};
    use crate::config::MenuConfig;
    use crate::consts;
    use crate::dom::{self, Listener};
    use crate::error::SetupError;

    struct Elements {
        header: Element,
        burger: HtmlInputElement,
        nav: Element,
        overlay: Element,
    }

    struct Menu {
        core: MenuCore<Element>,
        els: Elements,
        trap: Option<Listener>,
    }

    /// Keeps the menu's listeners alive. Dropping it detaches the menu.
    pub struct MenuHandle {
        _listeners: Vec<Listener>,
        _menu: Rc<RefCell<Menu>>,
    }

    /// Wire the burger menu.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] if any of the header, toggle,
    /// nav or overlay is absent.
    pub fn install(config: &MenuConfig) -> Result<MenuHandle, SetupError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let header = dom::query(&document, consts::HEADER_SELECTOR)
            .ok_or(SetupError::MissingElement(consts::HEADER_SELECTOR))?;
        let burger = document
            .get_element_by_id(consts::MENU_TOGGLE_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or(SetupError::MissingElement(consts::MENU_TOGGLE_ID))?;
        let nav = document
            .get_element_by_id(consts::NAV_ID)
            .ok_or(SetupError::MissingElement(consts::NAV_ID))?;
        let overlay = document
            .get_element_by_id(consts::OVERLAY_ID)
            .ok_or(SetupError::MissingElement(consts::OVERLAY_ID))?;

        dom::set_attr(&burger, "aria-expanded", "false");

        let menu = Rc::new(RefCell::new(Menu {
            core: MenuCore::new(config.clone()),
            els: Elements { header, burger: burger.clone(), nav: nav.clone(), overlay: overlay.clone() },
            trap: None,
        }));

        let mut listeners = Vec::with_capacity(5);

        let m = Rc::clone(&menu);
        listeners.push(Listener::new(&burger, "change", move |_| sync(&m))?);

        let m = Rc::clone(&menu);
        listeners.push(Listener::new(&overlay, "click", move |_| force_close(&m))?);

        let m = Rc::clone(&menu);
        listeners.push(Listener::new(&nav, "click", move |event: Event| {
            if dom::closest_from_event(&event, "a").is_some() {
                force_close(&m);
            }
        })?);

        let m = Rc::clone(&menu);
        listeners.push(Listener::new(&window, "keydown", move |event: Event| {
            let is_escape = event.dyn_ref::<KeyboardEvent>().is_some_and(|e| e.key() == "Escape");
            if is_escape && m.borrow().core.is_open() {
                force_close(&m);
            }
        })?);

        let m = Rc::clone(&menu);
        let win = window.clone();
        listeners.push(Listener::passive(&window, "scroll", move |_| {
            let close = m.borrow().core.should_close_on_scroll(dom::scroll_y(&win), dom::now_ms());
            if close {
                force_close(&m);
            }
        })?);

        // Restored form state can leave the box checked on reload.
        if burger.checked() {
            open(&menu);
        }

        Ok(MenuHandle { _listeners: listeners, _menu: menu })
    }

    fn force_close(menu: &Rc<RefCell<Menu>>) {
        menu.borrow().els.burger.set_checked(false);
        sync(menu);
    }

    fn sync(menu: &Rc<RefCell<Menu>>) {
        if menu.borrow().els.burger.checked() {
            open(menu);
        } else {
            close(menu);
        }
    }

    fn open(menu: &Rc<RefCell<Menu>>) {
        let Ok(window) = dom::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let mut state = menu.borrow_mut();
        let focused = document.active_element();
        if !state.core.open(focused, dom::scroll_y(&window), dom::now_ms()) {
            return;
        }

        dom::set_class(&state.els.header, consts::CLASS_OPEN, true);
        dom::set_attr(&state.els.burger, "aria-expanded", "true");
        dom::remove_attr(&state.els.overlay, "hidden");
        dom::set_attr(&state.els.overlay, "aria-modal", "true");
        if let Some(body) = document.body() {
            dom::set_style(&body, "overflow", "hidden");
        }
        if let Some(first) = dom::query_in(&state.els.nav, consts::FOCUSABLE_SELECTOR) {
            dom::focus(&first);
        }

        let nav = state.els.nav.clone();
        let doc = document.clone();
        match Listener::new(&document, "keydown", move |event: Event| trap_focus(&doc, &nav, &event)) {
            Ok(listener) => state.trap = Some(listener),
            Err(err) => log::debug!("focus trap not installed: {err}"),
        }
    }

    fn close(menu: &Rc<RefCell<Menu>>) {
        let mut state = menu.borrow_mut();
        let restore = state.core.close();

        dom::set_class(&state.els.header, consts::CLASS_OPEN, false);
        dom::set_attr(&state.els.burger, "aria-expanded", "false");
        dom::set_attr(&state.els.overlay, "hidden", "");
        dom::remove_attr(&state.els.overlay, "aria-modal");
        if let Some(body) = dom::document().ok().and_then(|d| d.body()) {
            dom::clear_style(&body, "overflow");
        }
        state.trap = None;
        drop(state);

        if let Some(target) = restore {
            dom::focus(&target);
        }
    }

    fn trap_focus(document: &web_sys::Document, nav: &Element, event: &Event) {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.key() != "Tab" {
            return;
        }
        let focusables: Vec<Element> = dom::query_all_in(nav, consts::FOCUSABLE_SELECTOR)
            .into_iter()
            .filter(|el| dom::as_html(el).is_some_and(|h| h.offset_parent().is_some()))
            .collect();
        let active = document
            .active_element()
            .and_then(|current| focusables.iter().position(|el| *el == current));
        if let Some(index) = trap_target(focusables.len(), active, key.shift_key()) {
            event.prevent_default();
            dom::focus(&focusables[index]);
        }
    }
}
