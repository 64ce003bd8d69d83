use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::RsvpTiming;
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub messaging_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".into(),
            messaging_url: "http://localhost:5001".into(),
            debounce_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn api_base(&self) -> anyhow::Result<Url> {
        parse_base_url("api_url", &self.api_url)
    }

    pub fn messaging_base(&self) -> anyhow::Result<Url> {
        parse_base_url("messaging_url", &self.messaging_url)
    }

    pub fn timing(&self) -> RsvpTiming {
        RsvpTiming {
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Defaults, then `config_path` when it exists, then the environment.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        if let Err(err) = apply_file_overrides(&mut settings, &raw) {
            warn!(path = %config_path.display(), error = %err, "ignoring unreadable config file");
        }
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: toml::Table = toml::from_str(raw).context("config file is not valid TOML")?;
    let value = |key: &str| {
        file_cfg.get(key).and_then(|v| {
            v.as_str()
                .map(str::to_string)
                .or_else(|| v.as_integer().map(|n| n.to_string()))
        })
    };

    if let Some(v) = value("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = value("messaging_url") {
        settings.messaging_url = v;
    }
    if let Some(v) = value("debounce_ms") {
        set_number(&mut settings.debounce_ms, "debounce_ms", &v);
    }
    if let Some(v) = value("request_timeout_secs") {
        set_number(&mut settings.request_timeout_secs, "request_timeout_secs", &v);
    }

    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("RSVP_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("RSVP_MESSAGING_URL") {
        settings.messaging_url = v;
    }
    if let Some(v) = var("APP__MESSAGING_URL") {
        settings.messaging_url = v;
    }

    if let Some(v) = var("APP__DEBOUNCE_MS") {
        set_number(&mut settings.debounce_ms, "APP__DEBOUNCE_MS", &v);
    }
    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        set_number(&mut settings.request_timeout_secs, "APP__REQUEST_TIMEOUT_SECS", &v);
    }
}

fn set_number(target: &mut u64, key: &str, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(parsed) => *target = parsed,
        Err(err) => warn!(key, value = raw, error = %err, "ignoring non-numeric setting"),
    }
}

fn parse_base_url(key: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid {key} '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{key} must use http or https, got '{raw}'");
    }
    Ok(url)
}
