//! Summary labels for the expandable team cards.
//!
//! A `<details class="pro-card__details">` swaps its summary text between a
//! closed and an open label and mirrors the state in `aria-expanded`.

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

use crate::config::DisclosureConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureLabels {
    pub closed: String,
    pub open: String,
}

/// Text and accessibility state to render for one summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView<'a> {
    pub label: &'a str,
    pub aria_expanded: &'static str,
}

impl DisclosureLabels {
    /// Labels from the summary's `data-closed` / `data-open`, with blank or
    /// missing attributes falling back to the configured defaults.
    #[must_use]
    pub fn resolve(closed: Option<&str>, open: Option<&str>, defaults: &DisclosureConfig) -> Self {
        Self { closed: pick(closed, &defaults.closed_label), open: pick(open, &defaults.open_label) }
    }

    /// Rendering is a pure function of `is_open`, so re-applying it is a no-op.
    #[must_use]
    pub fn view(&self, is_open: bool) -> SummaryView<'_> {
        if is_open {
            SummaryView { label: &self.open, aria_expanded: "true" }
        } else {
            SummaryView { label: &self.closed, aria_expanded: "false" }
        }
    }
}

fn pick(attr: Option<&str>, fallback: &str) -> String {
    attr.filter(|s| !s.is_empty()).unwrap_or(fallback).to_owned()
}

#[cfg(feature = "hydrate")]
pub use browser::{DisclosureHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use web_sys::{Document, Element};

    use super::DisclosureLabels;
    use crate::config::DisclosureConfig;
    use crate::consts;
    use crate::dom::{self, Listener};
    use crate::error::{SetupError, install_each};

    pub struct DisclosureHandle {
        _toggles: Vec<Listener>,
    }

    struct Card {
        details: Element,
        summary: Element,
        label: Element,
        labels: DisclosureLabels,
    }

    impl Card {
        fn apply(&self) {
            let view = self.labels.view(self.details.has_attribute("open"));
            self.label.set_text_content(Some(view.label));
            dom::set_attr(&self.summary, "aria-expanded", view.aria_expanded);
        }
    }

    /// Sync every card's summary label with its open state.
    ///
    /// Cards without a `<summary>`, or whose setup fails, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] when the page has no cards.
    pub fn install(config: &DisclosureConfig) -> Result<DisclosureHandle, SetupError> {
        let document = dom::document()?;
        let cards = dom::query_all(&document, consts::DETAILS_SELECTOR);
        if cards.is_empty() {
            return Err(SetupError::MissingElement(consts::DETAILS_SELECTOR));
        }

        let toggles = install_each("disclosure", cards, |details| {
            let summary = dom::query_in(&details, "summary").ok_or(SetupError::MissingElement("summary"))?;
            let labels = DisclosureLabels::resolve(
                summary.get_attribute(consts::ATTR_LABEL_CLOSED).as_deref(),
                summary.get_attribute(consts::ATTR_LABEL_OPEN).as_deref(),
                config,
            );
            let label = ensure_label(&document, &summary)?;
            let card = Card { details: details.clone(), summary, label, labels };
            card.apply();
            Listener::new(&details, "toggle", move |_| card.apply())
        });
        Ok(DisclosureHandle { _toggles: toggles })
    }

    fn ensure_label(document: &Document, summary: &Element) -> Result<Element, SetupError> {
        let selector = format!(".{}", consts::SUMMARY_LABEL_CLASS);
        if let Some(label) = dom::query_in(summary, &selector) {
            return Ok(label);
        }
        let label = document.create_element("span")?;
        label.set_class_name(consts::SUMMARY_LABEL_CLASS);
        summary.set_text_content(None);
        summary.append_child(&label)?;
        Ok(label)
    }
}
