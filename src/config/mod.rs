//! Configuration module for Tavily-Search-RS
//!
//! Handles loading settings from YAML files and environment variables, and
//! resolving the provider credential.

mod settings;

pub use settings::*;

use crate::error::ConfigurationError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from an explicit path, the search path, or defaults.
///
/// Environment overrides are applied last in every case.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)
                .map_err(|e| ConfigurationError::Load(format!("{}: {}", path.display(), e)))?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("TAVILY_SEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("tavily-search/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}

/// Resolve the API key: the explicit value wins, then TAVILY_API_KEY as
/// read through `lookup`.
///
/// Surrounding whitespace is stripped, so a key pasted with a trailing
/// newline still authenticates.
pub fn resolve_api_key_with<F>(
    explicit: Option<String>,
    lookup: F,
) -> Result<String, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = |key: String| {
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    };
    explicit
        .and_then(trimmed)
        .or_else(|| lookup(crate::API_KEY_ENV).and_then(trimmed))
        .ok_or(ConfigurationError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key_with(Some("explicit".into()), |_| Some("env".into()));
        assert_eq!(key.unwrap(), "explicit");
    }

    #[test]
    fn test_env_fallback() {
        let key = resolve_api_key_with(None, |name| {
            (name == "TAVILY_API_KEY").then(|| "from-env".to_string())
        });
        assert_eq!(key.unwrap(), "from-env");
    }

    #[test]
    fn test_missing_key() {
        let err = resolve_api_key_with(None, |_| None).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingApiKey));

        let err = resolve_api_key_with(Some(String::new()), |_| Some(" ".into())).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingApiKey));
    }

    #[test]
    fn test_key_whitespace_trimmed() {
        let key = resolve_api_key_with(Some("tvly-test\n".into()), |_| None);
        assert_eq!(key.unwrap(), "tvly-test");

        let key = resolve_api_key_with(None, |_| Some("  tvly-env\r\n".into()));
        assert_eq!(key.unwrap(), "tvly-env");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = load(Some(Path::new("/nonexistent/tavily/settings.yml")));
        assert!(result.is_err());
    }
}
