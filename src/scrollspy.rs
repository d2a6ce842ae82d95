//! Scrollspy: highlight the nav link of the section currently being read.
//!
//! ARCHITECTURE
//! ============
//! Sections are tracked in the order their nav links appear. The reference
//! point is the activation line, a fixed fraction of the viewport below the
//! header. Two strategies feed [`Scrollspy`]:
//!
//! * Observer: `IntersectionObserver` entries are turned into a hybrid score
//!   (mostly visible ratio, partly proximity to the activation line) and the
//!   best-scoring section wins each batch.
//! * Polling: on frame-throttled scroll/resize, the section whose interval
//!   contains the activation line wins, else the one nearest to it.
//!
//! Link clicks and hash changes activate a section directly. Activation is
//! exclusive: exactly one link carries the active state at a time.

#[cfg(test)]
#[path = "scrollspy_test.rs"]
mod scrollspy_test;

use crate::config::ScrollspyConfig;
use crate::reveal::parse_leading_int;

/// Vertical extent of a section, viewport-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }

    /// Distance from `y` to the nearest edge, zero when inside.
    #[must_use]
    pub fn distance_to(&self, y: f64) -> f64 {
        if self.contains(y) {
            0.0
        } else {
            (self.top - y).abs().min((self.bottom - y).abs())
        }
    }
}

/// Header height: its rendered height, else the CSS variable, else the fallback.
///
/// A zero rendered height counts as unknown, as happens before layout.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn resolve_header_height(offset_height: f64, css_var: Option<&str>, fallback: f64) -> f64 {
    let height = if offset_height > 0.0 {
        offset_height
    } else {
        css_var
            .map(str::trim)
            .and_then(parse_leading_int)
            .map_or(fallback, |px| px as f64)
    };
    height.max(0.0)
}

/// Viewport-relative y of the activation line.
#[must_use]
pub fn activation_line(header_height: f64, viewport_height: f64, ratio: f64) -> f64 {
    header_height + (viewport_height * ratio).round()
}

/// Observer root margin that moves the observed box below the activation line.
#[must_use]
pub fn root_margin(activation_line: f64, bottom_margin: &str) -> String {
    format!("-{activation_line}px 0px {bottom_margin} 0px")
}

/// Hybrid visibility score for one observer entry.
///
/// Non-intersecting sections score zero. Otherwise the score blends the
/// visible ratio with an inverse-distance proximity term in (0, 1].
#[must_use]
pub fn hybrid_score(
    intersecting: bool,
    ratio: f64,
    top: f64,
    activation_line: f64,
    config: &ScrollspyConfig,
) -> f64 {
    if !intersecting {
        return 0.0;
    }
    let proximity = 1.0 / (1.0 + (top - activation_line).abs());
    ratio * config.ratio_weight + proximity * config.proximity_weight
}

/// The section the activation line falls in, or the nearest one.
///
/// Ties go to the first section in iteration order.
pub fn closest_by_geometry<'a, I>(sections: I, activation_line: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, SectionBounds)>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for (id, bounds) in sections {
        let dist = bounds.distance_to(activation_line);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Latest score per section for one observer lifetime.
///
/// Scores persist across batches because an observer only reports the
/// sections whose visibility changed.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    scores: Vec<(String, f64)>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: &str, score: f64) {
        match self.scores.iter_mut().find(|(known, _)| known == id) {
            Some((_, slot)) => *slot = score,
            None => self.scores.push((id.to_owned(), score)),
        }
    }

    /// Highest-scoring section; the first recorded wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (id, score) in &self.scores {
            if best.is_none_or(|(_, top)| *score > top) {
                best = Some((id.as_str(), *score));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

/// Tracked section ids and the one currently active.
#[derive(Debug)]
pub struct Scrollspy {
    ids: Vec<String>,
    active: Option<String>,
}

impl Scrollspy {
    /// Build from the fragment ids of the nav links, keeping first-seen order
    /// and dropping duplicates.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracked: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !tracked.contains(&id) {
                tracked.push(id);
            }
        }
        Self { ids: tracked, active: None }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn tracks(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make `id` the active section.
    ///
    /// Returns `true` when the active section changed. Untracked ids are
    /// ignored so the current highlight is never lost.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.tracks(id) || self.active.as_deref() == Some(id) {
            return false;
        }
        self.active = Some(id.to_owned());
        true
    }

    /// Initial section: the URL fragment if tracked, else the geometric pick.
    #[must_use]
    pub fn initial<'a>(&self, hash: &'a str, geometric: Option<&'a str>) -> Option<&'a str> {
        let from_hash = hash.strip_prefix('#').unwrap_or(hash);
        if !from_hash.is_empty() && self.tracks(from_hash) {
            return Some(from_hash);
        }
        geometric.filter(|id| self.tracks(id))
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{ScrollspyHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::Array;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{
        Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
    };

    use super::{ScoreBoard, Scrollspy, SectionBounds, activation_line, closest_by_geometry, hybrid_score};
    use super::{resolve_header_height, root_margin};
    use crate::config::ScrollspyConfig;
    use crate::consts;
    use crate::dom::{self, Listener};
    use crate::env::{Capabilities, Strategy};
    use crate::error::SetupError;
    use crate::frame::{FrameThrottle, request_frame};

    type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

    struct Tracked {
        id: String,
        section: Element,
        link: Element,
    }

    struct Spy {
        window: Window,
        header: Option<Element>,
        css_header_px: Option<String>,
        config: ScrollspyConfig,
        core: Scrollspy,
        tracked: Vec<Tracked>,
        throttle: FrameThrottle,
        observer: Option<(IntersectionObserver, ObserverCallback)>,
    }

    impl Spy {
        fn header_height(&self) -> f64 {
            let offset = self
                .header
                .as_ref()
                .and_then(dom::as_html)
                .map_or(0.0, |h| f64::from(h.offset_height()));
            resolve_header_height(offset, self.css_header_px.as_deref(), self.config.fallback_header_px)
        }

        fn activation_line(&self) -> f64 {
            activation_line(
                self.header_height(),
                dom::viewport_height(&self.window),
                self.config.activation_ratio,
            )
        }

        fn geometric_pick(&self) -> Option<String> {
            let line = self.activation_line();
            let measured: Vec<(&str, SectionBounds)> = self
                .tracked
                .iter()
                .map(|t| {
                    let rect = t.section.get_bounding_client_rect();
                    (t.id.as_str(), SectionBounds::new(rect.top(), rect.bottom()))
                })
                .collect();
            closest_by_geometry(measured, line).map(str::to_owned)
        }

        fn activate(&mut self, id: &str) {
            if !self.core.activate(id) {
                return;
            }
            for t in &self.tracked {
                let on = t.id == id;
                dom::set_class(&t.link, consts::CLASS_ACTIVE, on);
                if on {
                    dom::set_attr(&t.link, "aria-current", "page");
                } else {
                    dom::remove_attr(&t.link, "aria-current");
                }
            }
        }

        fn disconnect(&mut self) {
            if let Some((observer, _)) = self.observer.take() {
                observer.disconnect();
            }
        }
    }

    /// Keeps the scrollspy's listeners and observer alive.
    pub struct ScrollspyHandle {
        _listeners: Vec<Listener>,
        spy: Rc<RefCell<Spy>>,
    }

    impl Drop for ScrollspyHandle {
        fn drop(&mut self) {
            self.spy.borrow_mut().disconnect();
        }
    }

    /// Track nav sections and highlight the active link.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] without `#primary-nav` or when
    /// no nav link resolves to a section on the page.
    pub fn install(config: &ScrollspyConfig, caps: Capabilities) -> Result<ScrollspyHandle, SetupError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let nav = document
            .get_element_by_id(consts::NAV_ID)
            .ok_or(SetupError::MissingElement(consts::NAV_ID))?;
        let header = dom::query(&document, consts::HEADER_SELECTOR);
        let css_header_px = document.document_element().and_then(|root| {
            window
                .get_computed_style(&root)
                .ok()
                .flatten()
                .and_then(|style| style.get_property_value(consts::VAR_HEADER_HEIGHT).ok())
                .filter(|v| !v.trim().is_empty())
        });

        let mut tracked: Vec<Tracked> = Vec::new();
        for link in dom::query_all_in(&nav, consts::NAV_LINK_SELECTOR) {
            let Some(id) = dom::href_fragment(&link) else {
                continue;
            };
            let Some(section) = document.get_element_by_id(&id) else {
                continue;
            };
            match tracked.iter_mut().find(|t| t.id == id) {
                Some(existing) => existing.link = link,
                None => tracked.push(Tracked { id, section, link }),
            }
        }
        if tracked.is_empty() {
            return Err(SetupError::MissingElement(consts::NAV_LINK_SELECTOR));
        }

        let core = Scrollspy::new(tracked.iter().map(|t| t.id.clone()));
        let strategy = caps.strategy();
        let spy = Rc::new(RefCell::new(Spy {
            window: window.clone(),
            header,
            css_header_px,
            config: config.clone(),
            core,
            tracked,
            throttle: FrameThrottle::new(),
            observer: None,
        }));
        log::debug!("scrollspy tracking {} sections ({strategy:?})", spy.borrow().tracked.len());

        let mut listeners = Vec::with_capacity(4);

        let s = Rc::clone(&spy);
        listeners.push(Listener::new(&nav, "click", move |event: Event| {
            let Some(link) = dom::closest_from_event(&event, consts::NAV_LINK_SELECTOR) else {
                return;
            };
            if let Some(id) = dom::href_fragment(&link) {
                s.borrow_mut().activate(&id);
            }
        })?);

        let s = Rc::clone(&spy);
        let win = window.clone();
        listeners.push(Listener::new(&window, "hashchange", move |_| {
            let hash = win.location().hash().unwrap_or_default();
            let id = hash.trim_start_matches('#');
            if !id.is_empty() {
                s.borrow_mut().activate(id);
            }
        })?);

        match strategy {
            Strategy::Observer => {
                build_observer(&spy)?;
                let s = Rc::clone(&spy);
                listeners.push(Listener::passive(&window, "resize", move |_| schedule_rebuild(&s))?);

                let hash = window.location().hash().unwrap_or_default();
                let mut state = spy.borrow_mut();
                let geometric = state.geometric_pick();
                if let Some(initial) = state.core.initial(&hash, geometric.as_deref()).map(str::to_owned) {
                    state.activate(&initial);
                }
            }
            Strategy::Polling => {
                let s = Rc::clone(&spy);
                listeners.push(Listener::passive(&window, "scroll", move |_| schedule_poll(&s))?);
                let s = Rc::clone(&spy);
                listeners.push(Listener::passive(&window, "resize", move |_| schedule_poll(&s))?);
                schedule_poll(&spy);
            }
        }

        Ok(ScrollspyHandle { _listeners: listeners, spy })
    }

    fn build_observer(spy: &Rc<RefCell<Spy>>) -> Result<(), SetupError> {
        let mut state = spy.borrow_mut();
        state.disconnect();

        let line = state.activation_line();
        let config = state.config.clone();
        let thresholds: Array = config.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&root_margin(line, &config.bottom_margin));
        init.set_threshold(&thresholds);

        let s = Rc::clone(spy);
        let header_px = state.header_height();
        let mut scores = ScoreBoard::new();
        let callback: ObserverCallback = Closure::new(move |entries: Array, _observer: IntersectionObserver| {
            let mut state = s.borrow_mut();
            let line = activation_line(header_px, dom::viewport_height(&state.window), config.activation_ratio);
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let score = hybrid_score(
                    entry.is_intersecting(),
                    entry.intersection_ratio(),
                    entry.bounding_client_rect().top(),
                    line,
                    &config,
                );
                scores.record(&entry.target().id(), score);
            }
            if let Some(best) = scores.best().map(str::to_owned) {
                state.activate(&best);
            }
        });

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for t in &state.tracked {
            observer.observe(&t.section);
        }
        state.observer = Some((observer, callback));
        Ok(())
    }

    fn schedule_rebuild(spy: &Rc<RefCell<Spy>>) {
        if !spy.borrow_mut().throttle.try_schedule() {
            return;
        }
        let s = Rc::clone(spy);
        request_frame(move || {
            s.borrow_mut().throttle.complete();
            if let Err(err) = build_observer(&s) {
                log::warn!("scrollspy observer rebuild failed: {err}");
            }
        });
    }

    fn schedule_poll(spy: &Rc<RefCell<Spy>>) {
        if !spy.borrow_mut().throttle.try_schedule() {
            return;
        }
        let s = Rc::clone(spy);
        request_frame(move || {
            let mut state = s.borrow_mut();
            state.throttle.complete();
            if let Some(id) = state.geometric_pick() {
                state.activate(&id);
            }
        });
    }
}
