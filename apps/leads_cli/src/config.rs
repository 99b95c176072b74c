use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::domain::fields;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "leads.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub date_field: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://form-backend-2024.onrender.com".into(),
            request_timeout_secs: 30,
            date_field: fields::HEALTH_INSURANCE_EXPIRY.into(),
            email: None,
            password: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    date_field: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl Settings {
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_url.trim())
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api url '{}' must use http or https", self.api_url);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Defaults, then `leads.toml` (or `config_path`), then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(_) if config_path.is_none() => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config '{}'", path.display()))
        }
    };
    settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).context("failed to parse config file")?;
        if let Some(v) = file_cfg.api_url {
            settings.api_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.date_field {
            settings.date_field = v;
        }
        settings.email = file_cfg.email.or(settings.email);
        settings.password = file_cfg.password.or(settings.password);
    }

    if let Some(v) = env("LEADS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("LEADS_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("LEADS_DATE_FIELD") {
        settings.date_field = v;
    }

    if let Some(v) = env("LEADS_EMAIL") {
        settings.email = Some(v);
    }
    if let Some(v) = env("LEADS_PASSWORD") {
        settings.password = Some(v);
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
