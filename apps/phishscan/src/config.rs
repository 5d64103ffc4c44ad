use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "phishscan.toml";
const DEFAULT_ORIGIN: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub origin: String,
    pub min_result_latency_ms: u64,
    /// `None` leaves scan requests without a timeout.
    pub request_timeout_secs: Option<u64>,
    pub color: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.into(),
            min_result_latency_ms: 800,
            request_timeout_secs: None,
            color: true,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn min_result_latency(&self) -> Duration {
        Duration::from_millis(self.min_result_latency_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    origin: Option<String>,
    min_result_latency_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    color: Option<bool>,
    log_level: Option<String>,
}

/// Defaults, then the config file, then environment overrides.
///
/// A missing `phishscan.toml` in the working directory is fine; an explicitly
/// requested file must exist and parse.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_from(config_path, |key| std::env::var(key).ok())
}

fn load_settings_from(
    config_path: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    }

    apply_env(&mut settings, var);
    settings.origin = normalize_origin(&settings.origin);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.origin {
        settings.origin = v;
    }
    if let Some(v) = file_cfg.min_result_latency_ms {
        settings.min_result_latency_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.color {
        settings.color = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PHISHSCAN_ORIGIN") {
        settings.origin = v;
    }
    if let Some(v) = var("APP__ORIGIN") {
        settings.origin = v;
    }

    if let Some(v) = var("PHISHSCAN_MIN_LATENCY_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.min_result_latency_ms = parsed;
        }
    }

    if let Some(v) = var("PHISHSCAN_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    // https://no-color.org: any non-empty value disables color.
    if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        settings.color = false;
    }

    if let Some(v) = var("PHISHSCAN_LOG") {
        settings.log_level = v;
    }
}

pub fn normalize_origin(raw_origin: &str) -> String {
    let raw_origin = raw_origin.trim();

    if raw_origin.is_empty() {
        return DEFAULT_ORIGIN.to_string();
    }

    let origin = if raw_origin.contains("://") {
        raw_origin.to_string()
    } else {
        format!("http://{raw_origin}")
    };

    origin.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
