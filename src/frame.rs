//! Animation-frame batching.
//!
//! Scroll and resize fire far more often than the page paints. Each unit keeps
//! its own [`FrameThrottle`] so a burst of events collapses into a single
//! recompute on the next frame.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

/// Tracks whether a frame callback is already queued.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next frame. Returns `false` if one is already queued.
    pub fn try_schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Release the claim once the queued frame has run.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Run `f` on the next animation frame.
///
/// If the frame cannot be requested the callback runs synchronously so the
/// page never gets stuck with a stale state.
#[cfg(feature = "hydrate")]
pub fn request_frame(f: impl FnOnce() + 'static) {
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        f();
        return;
    };
    let slot = Rc::new(Cell::new(Some(f)));
    let slot_for_cb = Rc::clone(&slot);
    let cb = Closure::once_into_js(move |_ts: f64| {
        if let Some(f) = slot_for_cb.take() {
            f();
        }
    });
    if let Err(err) = window.request_animation_frame(cb.unchecked_ref()) {
        log::debug!("requestAnimationFrame failed: {err:?}");
        if let Some(f) = slot.take() {
            f();
        }
    }
}
