// Tests for configuration loading

use cerebrova_core::config::{
    Config, DEFAULT_FRAME_MS, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, FRAME_VAR, SERVER_URL_VAR,
    TIMEOUT_VAR,
};
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.frame_interval_ms, DEFAULT_FRAME_MS);
    assert_eq!(Config::from_lookup(lookup(&[])), config);
}

#[test]
fn test_values_from_environment() {
    let config = Config::from_lookup(lookup(&[
        (SERVER_URL_VAR, "https://mri.example.org"),
        (TIMEOUT_VAR, "90"),
        (FRAME_VAR, "33"),
    ]));

    assert_eq!(config.server_url, "https://mri.example.org");
    assert_eq!(config.timeout_secs, 90);
    assert_eq!(config.frame_interval_ms, 33);
}

#[test]
fn test_unusable_values_fall_back_to_defaults() {
    let config = Config::from_lookup(lookup(&[
        (SERVER_URL_VAR, "   "),
        (TIMEOUT_VAR, "0"),
        (FRAME_VAR, "fast"),
    ]));

    assert_eq!(config, Config::default());
}

#[test]
fn test_overrides() {
    let config = Config::default()
        .with_server_url("http://10.0.0.5:5000")
        .with_timeout(5);

    assert_eq!(config.server_url, "http://10.0.0.5:5000");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.frame_interval_ms, DEFAULT_FRAME_MS);
}
