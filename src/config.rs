//! Page-level configuration.
//!
//! A page may embed overrides as JSON:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "contact_endpoint": "/api/contact", "has_server": true }
//! </script>
//! ```
//!
//! Every field is optional; missing fields take the defaults from
//! [`crate::consts`].

use serde::Deserialize;
use web_sys::Document;

use crate::consts::{
    CAROUSEL_INTERVAL_MS, DEFAULT_BRAND, DEFAULT_MAILTO_ADDRESS, MOBILE_BREAKPOINT_PX, NAV_CLOSE_DELAY_MS,
    SMALL_DEVICE_MAX_WIDTH_PX,
};
use crate::error::SiteError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Id of the inline JSON element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Recipient of the mailto fallback.
    pub mailto_address: String,
    /// Brand name used in the mailto subject.
    pub brand: String,
    /// Contact endpoint used when the form has no usable `action`.
    pub contact_endpoint: Option<String>,
    /// Whether `/contact` is served by a real backend.
    pub has_server: bool,
    pub nav_close_delay_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub small_device_max_width_px: u32,
    pub carousel_interval_ms: u32,
    /// Opening one FAQ item closes the others.
    pub faq_single_open: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mailto_address: DEFAULT_MAILTO_ADDRESS.to_owned(),
            brand: DEFAULT_BRAND.to_owned(),
            contact_endpoint: None,
            has_server: false,
            nav_close_delay_ms: NAV_CLOSE_DELAY_MS,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            small_device_max_width_px: SMALL_DEVICE_MAX_WIDTH_PX,
            carousel_interval_ms: CAROUSEL_INTERVAL_MS,
            faq_single_open: false,
        }
    }
}

impl SiteConfig {
    /// Parse overrides from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] if the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Media query matching devices too small for the background video.
    #[must_use]
    pub fn small_device_query(&self) -> String {
        format!("(max-width:{}px)", self.small_device_max_width_px)
    }

    /// Read the inline config element, falling back to defaults.
    pub fn load(doc: &Document) -> Self {
        let Some(el) = doc.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let text = el.text_content().unwrap_or_default();
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring site config: {err}");
                Self::default()
            }
        }
    }
}
