use super::*;

fn submission(name: &str, email: &str) -> ContactSubmission {
    ContactSubmission { name: name.to_owned(), email: email.to_owned(), ..ContactSubmission::default() }
}

// =============================================================
// Email
// =============================================================

#[test]
fn accepts_ordinary_addresses() {
    assert!(is_email("ada@example.com"));
    assert!(is_email("first.last+tag@mail.example.co.uk"));
}

#[test]
fn rejects_missing_at() {
    assert!(!is_email("ada.example.com"));
    assert!(!is_email("ada"));
}

#[test]
fn rejects_missing_domain_segment() {
    assert!(!is_email("ada@example"));
    assert!(!is_email("ada@"));
    assert!(!is_email("@example.com"));
    assert!(!is_email(""));
}

// =============================================================
// Validation
// =============================================================

#[test]
fn valid_submission_has_no_errors() {
    assert!(validate(&submission("Ada", "ada@example.com")).is_empty());
}

#[test]
fn empty_name_blocks_with_name_error() {
    let errors = validate(&submission("", "ada@example.com"));
    assert_eq!(errors, vec![FieldError { element_id: "err-name", message: MSG_NAME_REQUIRED }]);
}

#[test]
fn invalid_email_blocks_with_email_error() {
    let errors = validate(&submission("Ada", "not-an-email"));
    assert_eq!(errors, vec![FieldError { element_id: "err-email", message: MSG_EMAIL_INVALID }]);
}

#[test]
fn empty_email_blocks_with_email_error() {
    let errors = validate(&submission("Ada", ""));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].element_id, "err-email");
}

#[test]
fn both_errors_reported_together() {
    let errors = validate(&submission("", "nope"));
    let ids: Vec<_> = errors.iter().map(|e| e.element_id).collect();
    assert_eq!(ids, vec!["err-name", "err-email"]);
}

// =============================================================
// Delivery
// =============================================================

#[test]
fn placeholder_actions_use_mailto() {
    let config = SiteConfig::default();
    assert_eq!(resolve_delivery(None, &config), Delivery::Mailto);
    assert_eq!(resolve_delivery(Some(""), &config), Delivery::Mailto);
    assert_eq!(resolve_delivery(Some("#"), &config), Delivery::Mailto);
}

#[test]
fn contact_path_needs_a_server() {
    let config = SiteConfig::default();
    assert_eq!(resolve_delivery(Some("/contact"), &config), Delivery::Mailto);
    let served = SiteConfig { has_server: true, ..SiteConfig::default() };
    assert_eq!(resolve_delivery(Some("/contact"), &served), Delivery::Post("/contact".to_owned()));
}

#[test]
fn real_action_is_posted() {
    let config = SiteConfig::default();
    assert_eq!(
        resolve_delivery(Some("https://forms.example/inbox"), &config),
        Delivery::Post("https://forms.example/inbox".to_owned())
    );
}

#[test]
fn configured_endpoint_fills_missing_action() {
    let config = SiteConfig { contact_endpoint: Some("/api/contact".to_owned()), ..SiteConfig::default() };
    assert_eq!(resolve_delivery(None, &config), Delivery::Post("/api/contact".to_owned()));
    assert_eq!(resolve_delivery(Some(""), &config), Delivery::Post("/api/contact".to_owned()));
    assert_eq!(resolve_delivery(Some("/other"), &config), Delivery::Post("/other".to_owned()));
}

// =============================================================
// Mailto
// =============================================================

#[test]
fn mailto_encodes_subject_and_body() {
    let url = mailto_url("info@stackly.example", "Hi there", "a&b\nc");
    assert_eq!(url, "mailto:info@stackly.example?subject=Hi%20there&body=a%26b%0Ac");
}

#[test]
fn inquiry_mailto_lists_every_field() {
    let s = ContactSubmission {
        name: "Ada".to_owned(),
        company: "Engines".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "555".to_owned(),
        project: "Analytical".to_owned(),
        budget: "10k".to_owned(),
        date: "2026-11-01".to_owned(),
        consent: true,
    };
    let url = inquiry_mailto(&s, &SiteConfig::default());
    assert!(url.starts_with("mailto:info@stackly.example?subject=Stackly%20inquiry%20from%20Ada&body="));
    assert!(url.contains("Company%3A%20Engines"));
    assert!(url.contains("Desired%20delivery%3A%202026-11-01"));
    assert!(url.ends_with("Project%20details%3A%0AAnalytical"));
}

#[test]
fn greeting_defaults_to_customer() {
    let url = greeting_mailto("", &SiteConfig::default());
    assert!(url.contains("subject=Inquiry%20from%20Customer"));
    assert!(url.contains("Regards%2C%0ACustomer"));
}

#[test]
fn greeting_uses_brand_and_name() {
    let config = SiteConfig { brand: "Acme".to_owned(), mailto_address: "hi@acme.test".to_owned(), ..SiteConfig::default() };
    let url = greeting_mailto("Grace", &config);
    assert!(url.starts_with("mailto:hi@acme.test?subject=Inquiry%20from%20Grace"));
    assert!(url.contains("Hello%20Acme"));
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn submission_serializes_with_expected_keys() {
    let s = submission("Ada", "ada@example.com");
    let Ok(json) = serde_json::to_value(&s) else {
        panic!("submission should serialize");
    };
    let keys: Vec<_> = json.as_object().map(|o| o.keys().cloned().collect()).unwrap_or_default();
    for key in ["name", "company", "email", "phone", "project", "budget", "date", "consent"] {
        assert!(keys.iter().any(|k| k == key), "missing {key}");
    }
    assert_eq!(json["consent"], serde_json::json!(false));
}

#[test]
fn email_pattern_compiles_once_and_is_reused() {
    assert!(EMAIL.is_some());
    for _ in 0..3 {
        assert!(is_email("ada@example.com"));
        assert!(!is_email("ada@example"));
    }
}
