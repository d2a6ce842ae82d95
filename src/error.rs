//! Error types for unit installation and configuration loading.
//!
//! None of these ever reach the visitor. A failed install leaves that one unit
//! inert and the entry point logs the reason.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Why a behavior unit did not attach to the page.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("required element missing: {0}")]
    MissingElement(&'static str),
    #[error("unit disabled: {0}")]
    Disabled(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Run `setup` for each element of a unit, keeping every success.
///
/// A failing element is logged and skipped; elements already set up stay
/// attached.
pub fn install_each<I, T>(
    unit: &str,
    items: impl IntoIterator<Item = I>,
    mut setup: impl FnMut(I) -> Result<T, SetupError>,
) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match setup(item) {
            Ok(installed) => Some(installed),
            Err(err) => {
                log::debug!("{unit}: element skipped: {err}");
                None
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config rejected: {0}")]
    Invalid(String),
}
