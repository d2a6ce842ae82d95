//! One-shot reveal of `.reveal` elements as they scroll into view.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::config::RevealConfig;

/// Stagger delay for the element at `index`, in milliseconds.
///
/// An explicit `data-reveal-delay` wins whenever it starts with an integer;
/// otherwise the delay grows with document order up to a cap.
#[must_use]
pub fn stagger_delay(index: usize, explicit: Option<&str>, config: &RevealConfig) -> i64 {
    if let Some(ms) = explicit.and_then(parse_leading_int) {
        return ms;
    }
    let index = i64::try_from(index).unwrap_or(i64::MAX);
    index.saturating_mul(config.stagger_step_ms).min(config.stagger_max_ms)
}

/// Parse a base-10 integer prefix the way HTML authors expect attribute
/// numbers to work: leading whitespace and trailing units are ignored.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Which elements have already been revealed.
///
/// Marking is one-way: an element is reported as newly revealed at most once
/// and is never un-revealed.
#[derive(Debug, Default)]
pub struct RevealLedger {
    revealed: Vec<bool>,
}

impl RevealLedger {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { revealed: vec![false; count] }
    }

    /// Mark `index` revealed. Returns `true` only the first time.
    pub fn mark(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    /// Mark everything, returning the indices that were still hidden.
    pub fn mark_all(&mut self) -> Vec<usize> {
        (0..self.revealed.len()).filter(|&i| self.mark(i)).collect()
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{RevealHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::Array;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use super::{RevealLedger, stagger_delay};
    use crate::config::RevealConfig;
    use crate::consts;
    use crate::dom;
    use crate::env::{Capabilities, Strategy};
    use crate::error::SetupError;

    type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

    /// Owns the observer while elements are still waiting to be revealed.
    pub struct RevealHandle {
        observer: Option<(IntersectionObserver, ObserverCallback)>,
    }

    impl Drop for RevealHandle {
        fn drop(&mut self) {
            if let Some((observer, _)) = &self.observer {
                observer.disconnect();
            }
        }
    }

    /// Attach reveal behavior to every `.reveal` element.
    ///
    /// Without an observer, or when reduced motion is preferred, everything
    /// is revealed at once and no observer is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] when the page has no `.reveal`
    /// elements.
    pub fn install(config: &RevealConfig, caps: Capabilities) -> Result<RevealHandle, SetupError> {
        let document = dom::document()?;
        let nodes = dom::query_all(&document, consts::REVEAL_SELECTOR);
        if nodes.is_empty() {
            return Err(SetupError::MissingElement(consts::REVEAL_SELECTOR));
        }
        let ledger = Rc::new(RefCell::new(RevealLedger::new(nodes.len())));

        if caps.strategy() == Strategy::Polling {
            for index in ledger.borrow_mut().mark_all() {
                dom::set_class(&nodes[index], consts::CLASS_REVEALED, true);
            }
            return Ok(RevealHandle { observer: None });
        }

        let targets = Rc::new(nodes);
        let targets_for_cb = Rc::clone(&targets);
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Some(index) = targets_for_cb.iter().position(|el: &Element| *el == target) {
                    if ledger.borrow_mut().mark(index) {
                        dom::set_class(&target, consts::CLASS_REVEALED, true);
                    }
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&config.root_margin);
        init.set_threshold(&JsValue::from_f64(config.threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for (index, element) in targets.iter().enumerate() {
            let explicit = element.get_attribute(consts::ATTR_REVEAL_DELAY);
            let delay = stagger_delay(index, explicit.as_deref(), config);
            if let Some(html) = dom::as_html(element) {
                dom::set_style(html, consts::VAR_REVEAL_DELAY, &delay.to_string());
            }
            observer.observe(element);
        }
        log::debug!("reveal observing {} elements", targets.len());

        Ok(RevealHandle { observer: Some((observer, callback)) })
    }
}
