//! # laesther-site
//!
//! Browser behavior layer for the La'Esther marketing site, compiled to
//! WebAssembly. It attaches to server-rendered markup and turns scroll, click,
//! keyboard and timer input into CSS class and attribute changes.
//!
//! Each behavior unit splits into a pure core, tested natively, and a
//! `hydrate`-gated `install` that wires the core to the DOM. Units are
//! independent: a missing element leaves only that unit inert.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`menu`] | Burger menu, overlay, focus trap, scroll auto-close |
//! | [`reveal`] | One-shot reveal with staggered delays |
//! | [`chrome`] | Header elevation and floating button visibility |
//! | [`anchor`] | Offset-aware smooth scrolling for in-page links |
//! | [`scrollspy`] | Active nav link tracking |
//! | [`disclosure`] | Expandable card summary labels |
//! | [`rotator`] | Hero word rotator |
//! | [`config`] | Typed tunables with embedded JSON overrides |
//! | [`env`] | Capability probing and strategy selection |
//! | [`frame`] | Animation-frame throttling |
//! | [`consts`] | Selectors, class names and default values |

pub mod anchor;
pub mod chrome;
pub mod config;
pub mod consts;
pub mod disclosure;
pub mod env;
pub mod error;
pub mod frame;
pub mod menu;
pub mod reveal;
pub mod rotator;
pub mod scrollspy;

#[cfg(feature = "hydrate")]
pub mod dom;

#[cfg(feature = "hydrate")]
pub use site::{start, teardown};

#[cfg(feature = "hydrate")]
mod site {
    use std::cell::RefCell;

    use log::{Level, debug, info};
    use wasm_bindgen::prelude::wasm_bindgen;

    use crate::config::SiteConfig;
    use crate::env::Capabilities;
    use crate::error::SetupError;
    use crate::{anchor, chrome, disclosure, dom, menu, reveal, rotator, scrollspy};

    /// Every installed unit. Dropping it detaches all listeners and timers.
    struct Site {
        _menu: Option<menu::MenuHandle>,
        _reveal: Option<reveal::RevealHandle>,
        _chrome: Option<chrome::ChromeHandle>,
        _anchor: Option<anchor::AnchorHandle>,
        _scrollspy: Option<scrollspy::ScrollspyHandle>,
        _disclosure: Option<disclosure::DisclosureHandle>,
        _rotator: Option<rotator::RotatorHandle>,
    }

    thread_local! {
        static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
    }

    fn keep<T>(unit: &str, result: Result<T, SetupError>) -> Option<T> {
        match result {
            Ok(handle) => Some(handle),
            Err(err) => {
                debug!("{unit} inactive: {err}");
                None
            }
        }
    }

    /// Module entry point, run once when the wasm module loads.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(Level::Info) {
            log::warn!("logger already installed: {err}");
        }

        let Ok(window) = dom::window() else {
            return;
        };
        let Ok(document) = dom::document() else {
            return;
        };
        let config = SiteConfig::load(&document);
        let caps = Capabilities::probe(&window);
        info!("site behaviors starting ({:?}, reduced motion: {})", caps.strategy(), caps.reduced_motion);

        let site = Site {
            _menu: keep("menu", menu::install(&config.menu)),
            _reveal: keep("reveal", reveal::install(&config.reveal, caps)),
            _chrome: keep("chrome", chrome::install(&config.chrome, caps)),
            _anchor: keep("anchor", anchor::install(&config.anchor)),
            _scrollspy: keep("scrollspy", scrollspy::install(&config.scrollspy, caps)),
            _disclosure: keep("disclosure", disclosure::install(&config.disclosure)),
            _rotator: keep("rotator", rotator::install(&config.rotator, caps)),
        };
        SITE.with(|slot| *slot.borrow_mut() = Some(site));
    }

    /// Detach every behavior from the page.
    #[wasm_bindgen]
    pub fn teardown() {
        let site = SITE.with(|slot| slot.borrow_mut().take());
        if site.is_some() {
            info!("site behaviors detached");
        }
    }
}
