use super::*;

use std::{
    collections::HashMap,
    env,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn temp_config(contents: &str) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    let dir = env::temp_dir().join(format!("phishscan_config_test_{suffix}_{seq}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("phishscan.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_match_page_behavior() {
    let settings = Settings::default();
    assert_eq!(settings.origin, "http://localhost:8000");
    assert_eq!(settings.min_result_latency(), Duration::from_millis(800));
    assert_eq!(settings.request_timeout(), None);
    assert!(settings.color);
}

#[test]
fn normalizes_bare_host_and_trailing_slash() {
    assert_eq!(normalize_origin("scanner.test:8000/"), "http://scanner.test:8000");
    assert_eq!(normalize_origin(" https://scan.example// "), "https://scan.example");
    assert_eq!(normalize_origin("   "), "http://localhost:8000");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
origin = "https://phish.example"
min_result_latency_ms = 250
request_timeout_secs = 15
color = false
"#,
    )
    .expect("valid toml");

    assert_eq!(settings.origin, "https://phish.example");
    assert_eq!(settings.min_result_latency_ms, 250);
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
    assert!(!settings.color);
    assert_eq!(settings.log_level, "info");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "orign = \"typo\"").is_err());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("PHISHSCAN_ORIGIN", "http://first.test"),
            ("APP__ORIGIN", "http://second.test"),
            ("PHISHSCAN_MIN_LATENCY_MS", "0"),
            ("PHISHSCAN_TIMEOUT_SECS", "not-a-number"),
            ("NO_COLOR", "1"),
            ("PHISHSCAN_LOG", "debug"),
        ]),
    );

    assert_eq!(settings.origin, "http://second.test");
    assert_eq!(settings.min_result_latency_ms, 0);
    assert_eq!(settings.request_timeout_secs, None);
    assert!(!settings.color);
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn empty_no_color_keeps_color() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("NO_COLOR", "")]));
    assert!(settings.color);
}

#[test]
fn zero_timeout_means_no_timeout() {
    let settings = Settings {
        request_timeout_secs: Some(0),
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn explicit_config_file_is_loaded() {
    let path = temp_config("origin = \"scanner.internal:9000/\"\nmin_result_latency_ms = 100\n");

    let settings = load_settings_from(Some(&path), env_from(&[])).expect("load");

    assert_eq!(settings.origin, "http://scanner.internal:9000");
    assert_eq!(settings.min_result_latency_ms, 100);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_overrides_config_file() {
    let path = temp_config("origin = \"scanner.internal:9000\"\n");

    let settings = load_settings_from(
        Some(&path),
        env_from(&[("PHISHSCAN_ORIGIN", "https://override.test/")]),
    )
    .expect("load");

    assert_eq!(settings.origin, "https://override.test");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("phishscan_config_test_missing/none.toml");
    let err = load_settings(Some(&path)).expect_err("must fail");
    assert!(err.to_string().contains("failed to read"), "{err}");
}
