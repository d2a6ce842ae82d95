//! Selectors, class names and default tunables shared across the behavior units.
//!
//! The markup contract lives here so the page template and this crate can be
//! compared side by side. Numeric values are defaults; `SiteConfig` may
//! override any of them.

// ── Markup: header and menu ─────────────────────────────────────

pub const HEADER_SELECTOR: &str = ".site-header";
pub const MENU_TOGGLE_ID: &str = "menu_checkbox";
pub const NAV_ID: &str = "primary-nav";
pub const OVERLAY_ID: &str = "navOverlay";

/// Elements that can take keyboard focus inside the open navigation.
pub const FOCUSABLE_SELECTOR: &str = r#"a[href], button:not([disabled]), [tabindex]:not([tabindex="-1"])"#;

pub const CLASS_OPEN: &str = "is-open";
pub const CLASS_ELEVATED: &str = "is-elevated";
pub const CLASS_VISIBLE: &str = "is-visible";
pub const CLASS_ACTIVE: &str = "is-active";
pub const CLASS_HIDING: &str = "is-hiding";

// ── Markup: reveal ──────────────────────────────────────────────

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const CLASS_REVEALED: &str = "reveal-in";
pub const ATTR_REVEAL_DELAY: &str = "data-reveal-delay";
pub const VAR_REVEAL_DELAY: &str = "--reveal-delay";

// ── Markup: floating button and anchors ─────────────────────────

pub const FAB_SELECTOR: &str = ".fab-whatsapp";
pub const ANCHOR_LINK_SELECTOR: &str = r##"a[href^="#"]:not([href="#"])"##;

// ── Markup: scrollspy ───────────────────────────────────────────

pub const NAV_LINK_SELECTOR: &str = r##".nav__link[href^="#"]"##;
pub const VAR_HEADER_HEIGHT: &str = "--h-header";

// ── Markup: disclosure and rotator ──────────────────────────────

pub const DETAILS_SELECTOR: &str = ".pro-card__details";
pub const SUMMARY_LABEL_CLASS: &str = "summary__label";
pub const ATTR_LABEL_OPEN: &str = "data-open";
pub const ATTR_LABEL_CLOSED: &str = "data-closed";

pub const ROTATOR_SELECTOR: &str = ".hero__rotator";
pub const ATTR_ROTATOR_INIT: &str = "data-rotator-init";

pub const CONFIG_SCRIPT_ID: &str = "site-config";

// ── Menu ────────────────────────────────────────────────────────

/// Scroll displacement tolerated while the menu is open, in pixels.
pub const MENU_CLOSE_DELTA_PX: f64 = 24.0;

/// Window after opening during which scrolling never closes the menu.
pub const MENU_OPEN_GUARD_MS: f64 = 250.0;

// ── Reveal ──────────────────────────────────────────────────────

pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -5% 0px";
pub const REVEAL_STAGGER_STEP_MS: i64 = 60;
pub const REVEAL_STAGGER_MAX_MS: i64 = 360;

// ── Header chrome ───────────────────────────────────────────────

pub const ELEVATE_AFTER_PX: f64 = 8.0;

/// Fraction of the viewport height the page must scroll before the FAB shows.
pub const FAB_VIEWPORT_RATIO: f64 = 0.4;

// ── Anchor scroll ───────────────────────────────────────────────

pub const ANCHOR_ADJUST_PX: f64 = 4.0;

// ── Scrollspy ───────────────────────────────────────────────────

/// Activation line position below the header, as a fraction of viewport height.
pub const ACTIVATION_RATIO: f64 = 0.3;
pub const SPY_BOTTOM_MARGIN: &str = "-45%";
pub const SPY_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
pub const SPY_RATIO_WEIGHT: f64 = 0.8;
pub const SPY_PROXIMITY_WEIGHT: f64 = 0.2;
pub const FALLBACK_HEADER_PX: f64 = 84.0;

// ── Disclosure ──────────────────────────────────────────────────

pub const LABEL_CLOSED: &str = "Ler história completa";
pub const LABEL_OPEN: &str = "Ler menos";

// ── Rotator ─────────────────────────────────────────────────────

pub const ROTATOR_WORDS: [&str; 3] = ["Fisioterapia", "Pilates", "Reabilitação"];
pub const WORD_INTERVAL_MS: u32 = 3500;
pub const DOT_INTERVAL_MS: u32 = 450;
pub const MAX_DOTS: usize = 3;

/// Must match the CSS transition on `.hero__rotator > span`.
pub const WORD_TRANSITION_MS: u32 = 260;
