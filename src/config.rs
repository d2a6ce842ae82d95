//! Typed site configuration.
//!
//! Every tunable has a default taken from [`crate::consts`]. A page may embed
//! `<script type="application/json" id="site-config">` to override any subset;
//! missing sections and fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub menu: MenuConfig,
    pub reveal: RevealConfig,
    pub chrome: ChromeConfig,
    pub anchor: AnchorConfig,
    pub scrollspy: ScrollspyConfig,
    pub disclosure: DisclosureConfig,
    pub rotator: RotatorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub close_delta_px: f64,
    pub open_guard_ms: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self { close_delta_px: consts::MENU_CLOSE_DELTA_PX, open_guard_ms: consts::MENU_OPEN_GUARD_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_step_ms: i64,
    pub stagger_max_ms: i64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: consts::REVEAL_THRESHOLD,
            root_margin: consts::REVEAL_ROOT_MARGIN.to_owned(),
            stagger_step_ms: consts::REVEAL_STAGGER_STEP_MS,
            stagger_max_ms: consts::REVEAL_STAGGER_MAX_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub elevate_after_px: f64,
    pub fab_viewport_ratio: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self { elevate_after_px: consts::ELEVATE_AFTER_PX, fab_viewport_ratio: consts::FAB_VIEWPORT_RATIO }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub adjust_px: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self { adjust_px: consts::ANCHOR_ADJUST_PX }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollspyConfig {
    pub activation_ratio: f64,
    pub bottom_margin: String,
    pub thresholds: Vec<f64>,
    pub ratio_weight: f64,
    pub proximity_weight: f64,
    pub fallback_header_px: f64,
}

impl Default for ScrollspyConfig {
    fn default() -> Self {
        Self {
            activation_ratio: consts::ACTIVATION_RATIO,
            bottom_margin: consts::SPY_BOTTOM_MARGIN.to_owned(),
            thresholds: consts::SPY_THRESHOLDS.to_vec(),
            ratio_weight: consts::SPY_RATIO_WEIGHT,
            proximity_weight: consts::SPY_PROXIMITY_WEIGHT,
            fallback_header_px: consts::FALLBACK_HEADER_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    pub closed_label: String,
    pub open_label: String,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self { closed_label: consts::LABEL_CLOSED.to_owned(), open_label: consts::LABEL_OPEN.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    pub words: Vec<String>,
    pub word_interval_ms: u32,
    pub dot_interval_ms: u32,
    pub max_dots: usize,
    pub transition_ms: u32,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            words: consts::ROTATOR_WORDS.iter().map(|w| (*w).to_owned()).collect(),
            word_interval_ms: consts::WORD_INTERVAL_MS,
            dot_interval_ms: consts::DOT_INTERVAL_MS,
            max_dots: consts::MAX_DOTS,
            transition_ms: consts::WORD_TRANSITION_MS,
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override document and validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would leave a unit in a nonsensical state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("menu.close_delta_px", self.menu.close_delta_px)?;
        check_non_negative("menu.open_guard_ms", self.menu.open_guard_ms)?;
        check_unit_interval("reveal.threshold", self.reveal.threshold)?;
        if self.reveal.stagger_step_ms < 0 || self.reveal.stagger_max_ms < 0 {
            return Err(invalid("reveal stagger values must be non-negative"));
        }
        check_non_negative("chrome.elevate_after_px", self.chrome.elevate_after_px)?;
        check_unit_interval("chrome.fab_viewport_ratio", self.chrome.fab_viewport_ratio)?;
        check_unit_interval("scrollspy.activation_ratio", self.scrollspy.activation_ratio)?;
        check_non_negative("scrollspy.ratio_weight", self.scrollspy.ratio_weight)?;
        check_non_negative("scrollspy.proximity_weight", self.scrollspy.proximity_weight)?;
        check_non_negative("scrollspy.fallback_header_px", self.scrollspy.fallback_header_px)?;
        if self.scrollspy.thresholds.is_empty() {
            return Err(invalid("scrollspy.thresholds must not be empty"));
        }
        for t in &self.scrollspy.thresholds {
            check_unit_interval("scrollspy.thresholds", *t)?;
        }
        if self.rotator.words.is_empty() {
            return Err(invalid("rotator.words must not be empty"));
        }
        if self.rotator.max_dots == 0 {
            return Err(invalid("rotator.max_dots must be at least 1"));
        }
        if self.rotator.word_interval_ms == 0 || self.rotator.dot_interval_ms == 0 {
            return Err(invalid("rotator intervals must be positive"));
        }
        Ok(())
    }

    /// Read the embedded config block, falling back to defaults.
    ///
    /// Absence is normal. A block that fails to parse or validate is logged
    /// and ignored so a typo never disables the site.
    #[cfg(feature = "hydrate")]
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(consts::CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring #{}: {err}", consts::CONFIG_SCRIPT_ID);
                Self::default()
            }
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_owned())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be a non-negative number, got {value}")))
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must lie in [0, 1], got {value}")))
    }
}
