use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use props_terminal::config::{DEFAULT_API_URL, DEFAULT_HEADSHOT_CDN, Settings, SourceMode};

fn settings_from(pairs: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_without_variables() {
    let settings = settings_from(&[]);
    assert_eq!(settings.api_url, DEFAULT_API_URL);
    assert_eq!(settings.top_limit, 5);
    assert_eq!(settings.min_confidence, 65.0);
    assert!(settings.today_only);
    assert_eq!(settings.headshot_cdn, DEFAULT_HEADSHOT_CDN);
    assert_eq!(settings.source, SourceMode::Api);
    assert_eq!(settings.http_timeout, Duration::from_secs(10));
    assert_eq!(settings.log_dir, None);
}

#[test]
fn variables_override_and_get_normalized() {
    let settings = settings_from(&[
        ("PROPS_API_URL", " http://props.local:8080/ "),
        ("PROPS_TOP_LIMIT", "12"),
        ("PROPS_MIN_CONFIDENCE", "70.5"),
        ("PROPS_TODAY_ONLY", "no"),
        ("PROPS_SOURCE", "Demo"),
        ("PROPS_HTTP_TIMEOUT_SECS", "3"),
        ("PROPS_LOG_DIR", "/tmp/props"),
    ]);
    assert_eq!(settings.api_url, "http://props.local:8080");
    assert_eq!(settings.top_limit, 12);
    assert_eq!(settings.min_confidence, 70.5);
    assert!(!settings.today_only);
    assert_eq!(settings.source, SourceMode::Demo);
    assert_eq!(settings.http_timeout, Duration::from_secs(3));
    assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/props")));
}

#[test]
fn out_of_range_values_are_clamped() {
    let settings = settings_from(&[
        ("PROPS_TOP_LIMIT", "500"),
        ("PROPS_MIN_CONFIDENCE", "140"),
        ("PROPS_HTTP_TIMEOUT_SECS", "0"),
    ]);
    assert_eq!(settings.top_limit, 50);
    assert_eq!(settings.min_confidence, 100.0);
    assert_eq!(settings.http_timeout, Duration::from_secs(1));

    let settings = settings_from(&[("PROPS_TOP_LIMIT", "0")]);
    assert_eq!(settings.top_limit, 1);
}

#[test]
fn malformed_values_keep_defaults() {
    let settings = settings_from(&[
        ("PROPS_TOP_LIMIT", "many"),
        ("PROPS_MIN_CONFIDENCE", "NaN"),
        ("PROPS_TODAY_ONLY", "maybe"),
        ("PROPS_SOURCE", "carrier-pigeon"),
        ("PROPS_API_URL", "   "),
    ]);
    assert_eq!(settings.top_limit, 5);
    assert_eq!(settings.min_confidence, 65.0);
    assert!(settings.today_only);
    assert_eq!(settings.source, SourceMode::Api);
    assert_eq!(settings.api_url, DEFAULT_API_URL);
}
