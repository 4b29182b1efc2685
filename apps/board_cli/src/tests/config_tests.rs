use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn adds_scheme_and_drops_trailing_slash() {
    assert_eq!(normalize_server_url("localhost:8000/"), "http://localhost:8000");
    assert_eq!(
        normalize_server_url(" https://board.example.com/school/ "),
        "https://board.example.com/school"
    );
}

#[test]
fn empty_server_url_falls_back_to_default() {
    assert_eq!(normalize_server_url("   "), Settings::default().server_url);
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        "server_url = \"http://board.test\"\nmessage_hide_after_ms = 250\n",
    )
    .expect("apply");
    assert_eq!(settings.server_url, "http://board.test");
    assert_eq!(settings.message_hide_after(), Duration::from_millis(250));
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "message_hide_after_ms = 10\n").expect("apply");
    assert_eq!(settings.server_url, Settings::default().server_url);
    assert_eq!(settings.message_hide_after_ms, 10);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, "message_hide_after_ms = \"soon\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env(&[
            ("BOARD_SERVER_URL", "http://plain.test"),
            ("APP__SERVER_URL", "http://app.test"),
            ("APP__MESSAGE_HIDE_AFTER_MS", "1500"),
        ]),
    );
    assert_eq!(settings.server_url, "http://app.test");
    assert_eq!(settings.message_hide_after_ms, 1500);
}

#[test]
fn unparsable_hide_delay_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env(&[("APP__MESSAGE_HIDE_AFTER_MS", "later")]));
    assert_eq!(settings.message_hide_after_ms, 5000);
}

#[test]
fn loads_and_normalizes_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_SETTINGS_FILE);
    fs::write(&path, "server_url = \"board.test:9000/\"\n").expect("write settings");

    let settings = load_settings(&path).expect("load");
    // BOARD_SERVER_URL / APP__SERVER_URL in the test environment would win.
    if std::env::var("BOARD_SERVER_URL").is_err() && std::env::var("APP__SERVER_URL").is_err() {
        assert_eq!(settings.server_url, "http://board.test:9000");
    }
}

#[test]
fn missing_settings_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&dir.path().join("absent.toml")).expect("load");
    assert!(settings.server_url.starts_with("http"));
}
