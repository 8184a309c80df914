//! Contact form: inline validation, JSON POST, mailto fallback.
//!
//! Without a usable endpoint the form opens the visitor's mail client with
//! the inquiry prefilled. With one, the fields are POSTed as JSON once; a
//! failure is reported inline and never retried.

use std::rc::Rc;
use std::sync::LazyLock;

use gloo_net::http::Request;
use regex::Regex;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

use crate::config::SiteConfig;
use crate::consts::{ERROR_COLOR, SUCCESS_COLOR};
use crate::dom;
use crate::error::{SiteError, report};

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

/// Non-blank local part, `@`, non-blank host with at least one dot.
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

pub const MSG_NAME_REQUIRED: &str = "Please enter your name";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email";
pub const MSG_SENT: &str = "Thanks — we received your inquiry. We will contact you shortly.";
pub const MSG_REJECTED: &str = "Sorry, something went wrong. Please try again or email us directly.";
pub const MSG_NETWORK: &str = "Network error. Please try again or use \"Open email client\" button.";

// =============================================================================
// TYPES
// =============================================================================

/// The JSON body POSTed to the contact endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub budget: String,
    /// Desired delivery date, exactly as the date input reports it.
    pub date: String,
    pub consent: bool,
}

/// A validation failure bound to its inline error element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub element_id: &'static str,
    pub message: &'static str,
}

/// Where a valid submission goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Mailto,
    Post(String),
}

// =============================================================================
// RULES
// =============================================================================

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(value))
}

/// Validate a submission; an empty result means it may be sent.
#[must_use]
pub fn validate(submission: &ContactSubmission) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if submission.name.is_empty() {
        errors.push(FieldError { element_id: "err-name", message: MSG_NAME_REQUIRED });
    }
    if submission.email.is_empty() || !is_email(&submission.email) {
        errors.push(FieldError { element_id: "err-email", message: MSG_EMAIL_INVALID });
    }
    errors
}

/// Pick the delivery for a form whose `action` attribute is `action`.
#[must_use]
pub fn resolve_delivery(action: Option<&str>, config: &SiteConfig) -> Delivery {
    let endpoint = action
        .filter(|a| !a.is_empty())
        .or(config.contact_endpoint.as_deref())
        .unwrap_or("#");
    match endpoint {
        "" | "#" => Delivery::Mailto,
        "/contact" if !config.has_server => Delivery::Mailto,
        other => Delivery::Post(other.to_owned()),
    }
}

/// `mailto:` URL with percent-encoded subject and body.
#[must_use]
pub fn mailto_url(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{address}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// Mail client fallback for a full, validated submission.
#[must_use]
pub fn inquiry_mailto(submission: &ContactSubmission, config: &SiteConfig) -> String {
    let s = submission;
    let subject = format!("{} inquiry from {}", config.brand, s.name);
    let body = format!(
        "Name: {}\nCompany: {}\nEmail: {}\nPhone: {}\nBudget: {}\nDesired delivery: {}\n\nProject details:\n{}",
        s.name, s.company, s.email, s.phone, s.budget, s.date, s.project
    );
    mailto_url(&config.mailto_address, &subject, &body)
}

/// The "Open email client" button: a short greeting from `name`.
#[must_use]
pub fn greeting_mailto(name: &str, config: &SiteConfig) -> String {
    let name = if name.is_empty() { "Customer" } else { name };
    let body = format!(
        "Hello {},\n\nI would like to enquire about... \n\nRegards,\n{name}",
        config.brand
    );
    mailto_url(&config.mailto_address, &format!("Inquiry from {name}"), &body)
}

// =============================================================================
// DOM
// =============================================================================

struct ContactForm {
    window: Window,
    doc: Document,
    form: HtmlFormElement,
    message: HtmlElement,
    config: SiteConfig,
}

impl ContactForm {
    fn field(&self, name: &str) -> Result<String, SiteError> {
        let Some(el) = self.form.query_selector(&format!("[name=\"{name}\"]"))? else {
            return Ok(String::new());
        };
        let value = js_sys::Reflect::get(&el, &JsValue::from_str("value"))?;
        Ok(value.as_string().unwrap_or_default())
    }

    fn checked(&self, name: &str) -> Result<bool, SiteError> {
        let el = self.form.query_selector(&format!("[name=\"{name}\"]"))?;
        Ok(el.and_then(|el| el.dyn_into::<HtmlInputElement>().ok()).is_some_and(|input| input.checked()))
    }

    fn collect(&self) -> Result<ContactSubmission, SiteError> {
        let trimmed = |name: &str| self.field(name).map(|v| v.trim().to_owned());
        Ok(ContactSubmission {
            name: trimmed("name")?,
            company: trimmed("company")?,
            email: trimmed("email")?,
            phone: trimmed("phone")?,
            project: trimmed("project")?,
            budget: trimmed("budget")?,
            date: self.field("date")?,
            consent: self.checked("consent")?,
        })
    }

    fn clear_errors(&self) -> Result<(), SiteError> {
        for el in dom::query_all(&self.doc, ".error")? {
            el.set_text_content(Some(""));
        }
        self.message.set_text_content(Some(""));
        Ok(())
    }

    fn show_field_error(&self, error: FieldError) {
        if let Some(el) = self.doc.get_element_by_id(error.element_id) {
            el.set_text_content(Some(error.message));
        }
    }

    fn show_message(&self, text: &str, color: &str) -> Result<(), SiteError> {
        dom::set_style(&self.message, "color", color)?;
        self.message.set_text_content(Some(text));
        Ok(())
    }

    fn open_mail_client(&self, url: &str) -> Result<(), SiteError> {
        self.window.location().set_href(url)?;
        Ok(())
    }

    fn submit(self: &Rc<Self>) -> Result<(), SiteError> {
        self.clear_errors()?;
        let submission = self.collect()?;
        let errors = validate(&submission);
        if !errors.is_empty() {
            errors.into_iter().for_each(|e| self.show_field_error(e));
            return Ok(());
        }
        match resolve_delivery(self.form.get_attribute("action").as_deref(), &self.config) {
            Delivery::Mailto => self.open_mail_client(&inquiry_mailto(&submission, &self.config)),
            Delivery::Post(endpoint) => {
                let form = Rc::clone(self);
                wasm_bindgen_futures::spawn_local(async move {
                    let shown = match post(&endpoint, &submission).await {
                        Ok(true) => {
                            form.form.reset();
                            form.show_message(MSG_SENT, SUCCESS_COLOR)
                        }
                        Ok(false) => form.show_message(MSG_REJECTED, ERROR_COLOR),
                        Err(err) => {
                            log::error!("contact form: {err}");
                            form.show_message(MSG_NETWORK, ERROR_COLOR)
                        }
                    };
                    report("contact result", shown);
                });
                Ok(())
            }
        }
    }
}

/// POST the submission. `Ok(false)` means the server answered with an error.
async fn post(endpoint: &str, submission: &ContactSubmission) -> Result<bool, SiteError> {
    let resp = Request::post(endpoint).json(submission)?.send().await?;
    if resp.ok() {
        return Ok(true);
    }
    let body = resp.text().await.unwrap_or_default();
    log::error!("contact form rejected: {} {body}", resp.status());
    Ok(false)
}

/// Wire `#contactForm` and its `#mailtoBtn`.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when the form or its message slot is absent.
pub fn mount(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let contact = Rc::new(ContactForm {
        window: window.clone(),
        doc: doc.clone(),
        form: dom::by_id(doc, "contactForm")?,
        message: dom::by_id(doc, "formMessage")?,
        config: config.clone(),
    });

    let c = Rc::clone(&contact);
    dom::listen(&contact.form, "submit", move |e: Event| {
        e.prevent_default();
        report("contact submit", c.submit());
    })?;

    if let Ok(button) = dom::by_id::<Element>(doc, "mailtoBtn") {
        let c = Rc::clone(&contact);
        dom::listen(&button, "click", move |_| {
            let opened = c
                .field("name")
                .map(|name| greeting_mailto(name.trim(), &c.config))
                .and_then(|url| c.open_mail_client(&url));
            report("open mail client", opened);
        })?;
    }
    Ok(())
}
