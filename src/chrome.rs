//! Header elevation and floating action button visibility.
//!
//! Both states hang off one frame-throttled scroll listener.

#[cfg(test)]
#[path = "chrome_test.rs"]
mod chrome_test;

use crate::config::ChromeConfig;

/// Visual state derived from the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChromeState {
    pub elevated: bool,
    pub fab_visible: bool,
}

impl ChromeState {
    #[must_use]
    pub fn at(scroll_y: f64, viewport_height: f64, config: &ChromeConfig) -> Self {
        Self {
            elevated: scroll_y > config.elevate_after_px,
            fab_visible: scroll_y > viewport_height * config.fab_viewport_ratio,
        }
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{ChromeHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Element, Window};

    use super::ChromeState;
    use crate::config::ChromeConfig;
    use crate::consts;
    use crate::dom::{self, Listener};
    use crate::env::Capabilities;
    use crate::error::SetupError;
    use crate::frame::{FrameThrottle, request_frame};

    struct Chrome {
        window: Window,
        header: Option<Element>,
        fab: Option<Element>,
        config: ChromeConfig,
        throttle: FrameThrottle,
        last_y: f64,
    }

    /// Holds the scroll listener; absent under reduced motion.
    pub struct ChromeHandle {
        _scroll: Option<Listener>,
    }

    /// Wire header elevation and FAB visibility.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] when neither the header nor the
    /// floating button exists.
    pub fn install(config: &ChromeConfig, caps: Capabilities) -> Result<ChromeHandle, SetupError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let header = dom::query(&document, consts::HEADER_SELECTOR);
        let fab = dom::query(&document, consts::FAB_SELECTOR);
        if header.is_none() && fab.is_none() {
            return Err(SetupError::MissingElement(consts::FAB_SELECTOR));
        }

        if caps.reduced_motion {
            if let Some(fab) = &fab {
                dom::set_class(fab, consts::CLASS_VISIBLE, true);
            }
            return Ok(ChromeHandle { _scroll: None });
        }

        let chrome = Rc::new(RefCell::new(Chrome {
            window: window.clone(),
            header,
            fab,
            config: config.clone(),
            throttle: FrameThrottle::new(),
            last_y: 0.0,
        }));

        let c = Rc::clone(&chrome);
        let listener = Listener::passive(&window, "scroll", move |_| on_scroll(&c))?;
        on_scroll(&chrome);

        Ok(ChromeHandle { _scroll: Some(listener) })
    }

    fn on_scroll(chrome: &Rc<RefCell<Chrome>>) {
        let mut state = chrome.borrow_mut();
        state.last_y = dom::scroll_y(&state.window);
        if !state.throttle.try_schedule() {
            return;
        }
        drop(state);

        let c = Rc::clone(chrome);
        request_frame(move || {
            let mut state = c.borrow_mut();
            let view = ChromeState::at(state.last_y, dom::viewport_height(&state.window), &state.config);
            if let Some(header) = &state.header {
                dom::set_class(header, consts::CLASS_ELEVATED, view.elevated);
            }
            if let Some(fab) = &state.fab {
                dom::set_class(fab, consts::CLASS_VISIBLE, view.fab_visible);
            }
            state.throttle.complete();
        });
    }
}
