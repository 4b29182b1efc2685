use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "board.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub message_hide_after_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            message_hide_after_ms: 5000,
        }
    }
}

impl Settings {
    pub fn message_hide_after(&self) -> Duration {
        Duration::from_millis(self.message_hide_after_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    message_hide_after_ms: Option<u64>,
}

/// Defaults, then the settings file (if present), then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.server_url = normalize_server_url(&settings.server_url);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.message_hide_after_ms {
        settings.message_hide_after_ms = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__MESSAGE_HIDE_AFTER_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.message_hide_after_ms = parsed,
            Err(err) => tracing::warn!("ignoring APP__MESSAGE_HIDE_AFTER_MS={v:?}: {err}"),
        }
    }
}

pub fn normalize_server_url(raw_server_url: &str) -> String {
    let raw_server_url = raw_server_url.trim();

    if raw_server_url.is_empty() {
        return Settings::default().server_url;
    }

    let with_scheme = if raw_server_url.contains("://") {
        raw_server_url.to_string()
    } else {
        format!("http://{raw_server_url}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
