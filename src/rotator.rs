//! Hero word rotator with a "loading dots" suffix.
//!
//! The label cycles through a fixed word list. Each change is wrapped in a
//! short CSS fade (`is-hiding` on the container) and the word swaps while
//! hidden. Independently, a faster timer cycles one to `max_dots` dots.

#[cfg(test)]
#[path = "rotator_test.rs"]
mod rotator_test;

/// Word index and dot count, advanced by the timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatorCore {
    words: Vec<String>,
    index: usize,
    dots: usize,
    max_dots: usize,
}

impl RotatorCore {
    /// Start on the first word with a single dot.
    ///
    /// Returns `None` for an empty word list or a zero dot limit, since
    /// neither can be rendered.
    #[must_use]
    pub fn new(words: Vec<String>, max_dots: usize) -> Option<Self> {
        if words.is_empty() || max_dots == 0 {
            return None;
        }
        Some(Self { words, index: 0, dots: 1, max_dots })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.words[self.index]
    }

    #[must_use]
    pub fn dots(&self) -> usize {
        self.dots
    }

    /// The label text: current word followed by the dots.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}", self.word(), ".".repeat(self.dots))
    }

    /// Cycle the dot count 1, 2, .., `max_dots`, 1.
    pub fn tick_dots(&mut self) {
        self.dots = self.dots % self.max_dots + 1;
    }

    /// Move to the next word and restart the dots.
    pub fn advance_word(&mut self) {
        self.index = (self.index + 1) % self.words.len();
        self.dots = 1;
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{RotatorHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::{Interval, Timeout};
    use web_sys::Element;

    use super::RotatorCore;
    use crate::config::RotatorConfig;
    use crate::consts;
    use crate::dom;
    use crate::env::Capabilities;
    use crate::error::SetupError;

    struct Rotator {
        core: RotatorCore,
        container: Element,
        label: Element,
        transition_ms: u32,
    }

    impl Rotator {
        fn render(&self) {
            self.label.set_text_content(Some(&self.core.text()));
        }
    }

    #[derive(Default)]
    struct Timers {
        dots: Option<Interval>,
        kickoff: Option<Timeout>,
        word: Option<Interval>,
        swap: Option<Timeout>,
    }

    /// Owns the rotator's timers. Dropping it stops the animation.
    pub struct RotatorHandle {
        timers: Rc<RefCell<Timers>>,
    }

    impl Drop for RotatorHandle {
        fn drop(&mut self) {
            // Timer callbacks hold the shared state; clearing breaks the cycle.
            *self.timers.borrow_mut() = Timers::default();
        }
    }

    /// Start the hero rotator.
    ///
    /// # Errors
    ///
    /// * [`SetupError::MissingElement`] without `.hero__rotator` or its label span.
    /// * [`SetupError::Disabled`] under reduced motion or when already started.
    pub fn install(config: &RotatorConfig, caps: Capabilities) -> Result<RotatorHandle, SetupError> {
        let document = dom::document()?;
        let container = dom::query(&document, consts::ROTATOR_SELECTOR)
            .ok_or(SetupError::MissingElement(consts::ROTATOR_SELECTOR))?;
        if caps.reduced_motion {
            return Err(SetupError::Disabled("reduced motion preferred"));
        }
        if container.get_attribute(consts::ATTR_ROTATOR_INIT).as_deref() == Some("1") {
            return Err(SetupError::Disabled("rotator already initialized"));
        }
        dom::set_attr(&container, consts::ATTR_ROTATOR_INIT, "1");

        let label = dom::query_in(&container, "span").ok_or(SetupError::MissingElement("hero__rotator span"))?;
        let core = RotatorCore::new(config.words.clone(), config.max_dots)
            .ok_or(SetupError::Disabled("no words to rotate"))?;

        let rotator = Rc::new(RefCell::new(Rotator { core, container, label, transition_ms: config.transition_ms }));
        rotator.borrow().render();

        let timers = Rc::new(RefCell::new(Timers::default()));
        start_dots(&rotator, &timers, config.dot_interval_ms);
        start_words(&rotator, &timers, config.word_interval_ms);

        Ok(RotatorHandle { timers })
    }

    fn start_dots(rotator: &Rc<RefCell<Rotator>>, timers: &Rc<RefCell<Timers>>, every_ms: u32) {
        let mut slots = timers.borrow_mut();
        if slots.dots.is_some() {
            return;
        }
        let r = Rc::clone(rotator);
        slots.dots = Some(Interval::new(every_ms, move || {
            let mut state = r.borrow_mut();
            state.core.tick_dots();
            state.render();
        }));
    }

    fn start_words(rotator: &Rc<RefCell<Rotator>>, timers: &Rc<RefCell<Timers>>, every_ms: u32) {
        let mut slots = timers.borrow_mut();
        if slots.kickoff.is_some() || slots.word.is_some() {
            return;
        }
        // First change after a full period so the page does not flicker on load.
        let r = Rc::clone(rotator);
        let t = Rc::clone(timers);
        slots.kickoff = Some(Timeout::new(every_ms, move || {
            cycle_word(&r, &t);
            let r = Rc::clone(&r);
            let t_for_tick = Rc::clone(&t);
            t.borrow_mut().word = Some(Interval::new(every_ms, move || cycle_word(&r, &t_for_tick)));
        }));
    }

    fn cycle_word(rotator: &Rc<RefCell<Rotator>>, timers: &Rc<RefCell<Timers>>) {
        let transition_ms = {
            let state = rotator.borrow();
            dom::set_class(&state.container, consts::CLASS_HIDING, true);
            state.transition_ms
        };
        let r = Rc::clone(rotator);
        timers.borrow_mut().swap = Some(Timeout::new(transition_ms, move || {
            let mut state = r.borrow_mut();
            state.core.advance_word();
            state.render();
            dom::set_class(&state.container, consts::CLASS_HIDING, false);
        }));
    }
}
