use super::*;

#[test]
fn defaults_match_constants() {
    let config = SiteConfig::default();
    assert_eq!(config.mailto_address, "info@stackly.example");
    assert_eq!(config.brand, "Stackly");
    assert_eq!(config.contact_endpoint, None);
    assert!(!config.has_server);
    assert_eq!(config.nav_close_delay_ms, 1500);
    assert!((config.mobile_breakpoint_px - 900.0).abs() < f64::EPSILON);
    assert_eq!(config.carousel_interval_ms, 1500);
    assert!(!config.faq_single_open);
}

#[test]
fn empty_object_yields_defaults() {
    let Ok(config) = SiteConfig::from_json("{}") else {
        panic!("empty object should parse");
    };
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let Ok(config) = SiteConfig::from_json(r#"{"contact_endpoint":"/api/contact","has_server":true}"#) else {
        panic!("partial config should parse");
    };
    assert_eq!(config.contact_endpoint.as_deref(), Some("/api/contact"));
    assert!(config.has_server);
    assert_eq!(config.brand, "Stackly");
    assert_eq!(config.nav_close_delay_ms, 1500);
}

#[test]
fn malformed_json_is_a_config_error() {
    let result = SiteConfig::from_json("{\"brand\": ");
    assert!(matches!(result, Err(SiteError::Config(_))));
}

#[test]
fn wrong_field_type_is_a_config_error() {
    let result = SiteConfig::from_json(r#"{"carousel_interval_ms":"fast"}"#);
    assert!(matches!(result, Err(SiteError::Config(_))));
}

#[test]
fn small_device_query_uses_configured_width() {
    let config = SiteConfig { small_device_max_width_px: 480, ..SiteConfig::default() };
    assert_eq!(config.small_device_query(), "(max-width:480px)");
}
