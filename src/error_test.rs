use super::*;

#[test]
fn missing_element_is_ignorable() {
    assert!(SiteError::MissingElement("#hamburger").is_ignorable());
}

#[test]
fn js_error_is_not_ignorable() {
    assert!(!SiteError::Js("boom".to_owned()).is_ignorable());
}

#[test]
fn config_error_is_not_ignorable() {
    let Err(err) = serde_json::from_str::<serde_json::Value>("{") else {
        return;
    };
    assert!(!SiteError::from(err).is_ignorable());
}

#[test]
fn missing_element_message_names_the_selector() {
    let err = SiteError::MissingElement("#contactForm");
    assert_eq!(err.to_string(), "element not found: #contactForm");
}

#[test]
fn report_accepts_ok() {
    report("noop", Ok(()));
}

#[test]
fn tolerate_missing_maps_absent_widget_to_none() {
    let result: Result<u8, SiteError> = Err(SiteError::MissingElement("#bgVideo"));
    assert!(matches!(tolerate_missing(result), Ok(None)));
}

#[test]
fn tolerate_missing_keeps_value() {
    assert!(matches!(tolerate_missing(Ok::<u8, SiteError>(7)), Ok(Some(7))));
}

#[test]
fn tolerate_missing_passes_real_failures() {
    let result: Result<(), SiteError> = Err(SiteError::Js("listener rejected".to_owned()));
    assert!(matches!(tolerate_missing(result), Err(SiteError::Js(_))));
}
