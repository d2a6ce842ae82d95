//! Smooth scrolling for in-page anchors, offset for the fixed header.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

/// The id an in-page `href` points at.
///
/// `"#contact"` yields `"contact"`; a bare `"#"` or any off-page URL yields
/// `None`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Document-relative scroll position that lands `target` just below the header.
///
/// `rect_top` is the target's viewport-relative top, as reported by
/// `getBoundingClientRect`.
#[must_use]
pub fn scroll_target(rect_top: f64, scroll_y: f64, header_height: f64, adjust_px: f64) -> f64 {
    rect_top + scroll_y - header_height + adjust_px
}

#[cfg(feature = "hydrate")]
pub use browser::{AnchorHandle, install};

#[cfg(feature = "hydrate")]
mod browser {
    use web_sys::{Element, Event, ScrollBehavior, ScrollToOptions};

    use super::scroll_target;
    use crate::config::AnchorConfig;
    use crate::consts;
    use crate::dom::{self, Listener};
    use crate::error::{SetupError, install_each};

    pub struct AnchorHandle {
        _clicks: Vec<Listener>,
    }

    /// Intercept clicks on every in-page anchor link.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] without a header or without any
    /// in-page links.
    pub fn install(config: &AnchorConfig) -> Result<AnchorHandle, SetupError> {
        let document = dom::document()?;
        let header = dom::query(&document, consts::HEADER_SELECTOR)
            .ok_or(SetupError::MissingElement(consts::HEADER_SELECTOR))?;
        let links = dom::query_all(&document, consts::ANCHOR_LINK_SELECTOR);
        if links.is_empty() {
            return Err(SetupError::MissingElement(consts::ANCHOR_LINK_SELECTOR));
        }

        let clicks = install_each("anchor", links, |link| {
            let header = header.clone();
            let adjust_px = config.adjust_px;
            let target_link = link.clone();
            Listener::new(&link, "click", move |event: Event| {
                on_click(&target_link, &header, adjust_px, &event);
            })
        });
        Ok(AnchorHandle { _clicks: clicks })
    }

    fn on_click(link: &Element, header: &Element, adjust_px: f64, event: &Event) {
        let Some(id) = dom::href_fragment(link) else {
            return;
        };
        let Ok(window) = dom::window() else {
            return;
        };
        let Some(target) = window.document().and_then(|d| d.get_element_by_id(&id)) else {
            return;
        };
        event.prevent_default();

        let header_height = dom::as_html(header).map_or(0.0, |h| f64::from(h.offset_height()));
        let top = scroll_target(
            target.get_bounding_client_rect().top(),
            dom::scroll_y(&window),
            header_height,
            adjust_px,
        );

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
