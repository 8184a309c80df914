//! Crate error type.
//!
//! Mount functions return `Result<(), SiteError>`. A [`SiteError::MissingElement`]
//! means the page does not carry that widget and is not a failure; everything
//! else is logged and the remaining widgets keep mounting. Event handlers
//! cannot propagate, so they hand their result to [`report`].

use wasm_bindgen::JsValue;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("dom call failed: {0}")]
    Js(String),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] gloo_net::Error),
}

impl SiteError {
    /// Whether this error only means the widget is absent from the page.
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Log a handler failure; handlers have nowhere to propagate to.
pub fn report(context: &str, result: Result<(), SiteError>) {
    if let Err(err) = result {
        log::warn!("{context}: {err}");
    }
}

/// Turn "widget absent" into `Ok(None)`, keeping real failures.
///
/// # Errors
///
/// Passes through every error except [`SiteError::MissingElement`].
pub fn tolerate_missing<T>(result: Result<T, SiteError>) -> Result<Option<T>, SiteError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_ignorable() => {
            log::debug!("skipping: {err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
