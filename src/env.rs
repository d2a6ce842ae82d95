//! Capability probing.
//!
//! The browser is asked once, at start, whether it has `IntersectionObserver`
//! and whether the visitor prefers reduced motion. Units receive the answers
//! as plain values and pick a [`Strategy`] from them instead of re-probing.

#[cfg(test)]
#[path = "env_test.rs"]
mod env_test;

/// What the current browser offers, captured once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub intersection_observer: bool,
    pub reduced_motion: bool,
}

/// How a scroll-driven unit tracks visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Let `IntersectionObserver` deliver visibility changes.
    Observer,
    /// Measure geometry on frame-throttled scroll and resize events.
    Polling,
}

impl Capabilities {
    /// Observation is used only when it is available and motion is welcome.
    #[must_use]
    pub fn strategy(self) -> Strategy {
        if self.intersection_observer && !self.reduced_motion {
            Strategy::Observer
        } else {
            Strategy::Polling
        }
    }

    /// Probe the running browser. Any failure reads as "not supported".
    #[cfg(feature = "hydrate")]
    pub fn probe(window: &web_sys::Window) -> Self {
        Self {
            intersection_observer: has_intersection_observer(window),
            reduced_motion: prefers_reduced_motion(window),
        }
    }
}

#[cfg(feature = "hydrate")]
fn has_intersection_observer(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &wasm_bindgen::JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

#[cfg(feature = "hydrate")]
fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
    matches!(
        window.match_media("(prefers-reduced-motion: reduce)"),
        Ok(Some(query)) if query.matches()
    )
}
