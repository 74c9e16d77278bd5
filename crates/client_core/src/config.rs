use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API base URL configured; set VIDEOGAME_API_BASE_URL or api_base_url in client.toml")]
    MissingBaseUrl,
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(Path::new(SETTINGS_FILE)) {
        apply_file_settings(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Later keys win.
const ENV_OVERRIDES: [&str; 2] = ["VIDEOGAME_API_BASE_URL", "APP__API_BASE_URL"];

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ENV_OVERRIDES {
        if let Some(v) = lookup(key) {
            settings.api_base_url = Some(v);
        }
    }
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = Some(v.clone());
            }
        }
        Err(error) => tracing::warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
    }
}

/// Validates the configured endpoint. Called once at startup.
pub fn resolve_base_url(settings: &Settings) -> Result<Url, ConfigError> {
    let raw = settings
        .api_base_url
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingBaseUrl)?;

    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: "must not carry a query or fragment".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(url: &str) -> Settings {
        Settings {
            api_base_url: Some(url.to_string()),
        }
    }

    #[test]
    fn missing_or_blank_base_url_is_a_startup_error() {
        assert_eq!(
            resolve_base_url(&Settings::default()),
            Err(ConfigError::MissingBaseUrl)
        );
        assert_eq!(
            resolve_base_url(&settings_with("   ")),
            Err(ConfigError::MissingBaseUrl)
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = resolve_base_url(&settings_with("ftp://example.com/games")).expect_err("scheme");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_unparsable_urls() {
        let err = resolve_base_url(&settings_with("not a url")).expect_err("parse");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn accepts_http_endpoint_with_path() {
        let url = resolve_base_url(&settings_with(" http://localhost:8080/api/videogames "))
            .expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/videogames");
    }

    #[test]
    fn rejects_query_or_fragment() {
        for raw in [
            "http://localhost:8080/api/videogames?x=1",
            "http://localhost:8080/api/videogames#top",
        ] {
            let err = resolve_base_url(&settings_with(raw)).expect_err("query/fragment");
            assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }), "{raw}");
        }
    }

    #[test]
    fn app_env_override_wins_over_videogame_env() {
        let mut settings = settings_with("http://from-file/games");
        apply_env_overrides(&mut settings, |key| match key {
            "VIDEOGAME_API_BASE_URL" => Some("http://from-videogame-env/games".to_string()),
            "APP__API_BASE_URL" => Some("http://from-app-env/games".to_string()),
            _ => None,
        });
        assert_eq!(
            settings.api_base_url.as_deref(),
            Some("http://from-app-env/games")
        );
    }

    #[test]
    fn single_env_override_replaces_file_value() {
        let mut settings = settings_with("http://from-file/games");
        apply_env_overrides(&mut settings, |key| {
            (key == "VIDEOGAME_API_BASE_URL").then(|| "http://from-env/games".to_string())
        });
        assert_eq!(settings.api_base_url.as_deref(), Some("http://from-env/games"));

        let mut untouched = settings_with("http://from-file/games");
        apply_env_overrides(&mut untouched, |_| None);
        assert_eq!(untouched.api_base_url.as_deref(), Some("http://from-file/games"));
    }

    #[test]
    fn file_settings_set_base_url() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, r#"api_base_url = "http://127.0.0.1:9000/games""#);
        assert_eq!(
            settings.api_base_url.as_deref(),
            Some("http://127.0.0.1:9000/games")
        );
    }

    #[test]
    fn malformed_file_settings_are_ignored() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "api_base_url = [");
        assert_eq!(settings.api_base_url, None);
    }
}
