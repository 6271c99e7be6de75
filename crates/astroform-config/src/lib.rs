//! Provider settings for astroform
//!
//! Each value is resolved in order: explicit override (CLI flag), environment
//! variable, settings file, built-in default. Defaults that belong to other
//! crates (API base URL, poll timing) stay `None` here and are applied by the
//! consumer.

pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{PollSettings, Settings};

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV: &str = "ASTRONOMER_API_TOKEN";
pub const ORGANIZATION_ENV: &str = "ASTRONOMER_ORGANIZATION_ID";
pub const API_URL_ENV: &str = "ASTRONOMER_API_URL";
pub const CONFIG_PATH_ENV: &str = "ASTROFORM_CONFIG_PATH";

const LOCAL_FILE: &str = "astroform.yaml";

/// Locate the settings file
///
/// Search order:
/// 1. `ASTROFORM_CONFIG_PATH` (must exist when set)
/// 2. `./astroform.yaml`
/// 3. `<config_dir>/astroform/config.yaml`
///
/// Returns `None` when no file exists; running without one is fine.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir()?;
    find_config_file_from(&current_dir)
}

pub fn find_config_file_from(dir: &Path) -> Result<Option<PathBuf>> {
    if let Some(config_path) = env_value(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    let local = dir.join(LOCAL_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("astroform").join("config.yaml");
        if global.exists() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

/// Load the settings file if there is one
pub fn load_settings() -> Result<Settings> {
    match find_config_file()? {
        Some(path) => Settings::load(&path),
        None => Ok(Settings::default()),
    }
}

/// Values given explicitly by the caller, highest precedence
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub organization_id: Option<String>,
    pub api_url: Option<String>,
}

/// Fully resolved provider settings
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub token: String,
    pub organization_id: String,
    pub api_url: Option<String>,
    pub request_timeout: Option<Duration>,
    pub poll: PollTiming,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("token", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .field("poll", &self.poll)
            .finish()
    }
}

/// Poll timing overrides; `None` keeps the per-kind default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollTiming {
    pub interval: Option<Duration>,
    pub cluster_timeout: Option<Duration>,
    pub deployment_timeout: Option<Duration>,
}

/// Combine overrides, environment and file into provider settings
pub fn resolve(overrides: Overrides, settings: Settings) -> Result<ProviderSettings> {
    let resolved = resolve_unscoped(overrides, settings)?;
    if resolved.organization_id.is_empty() {
        return Err(ConfigError::MissingOrganization);
    }
    Ok(resolved)
}

/// Like [`resolve`], but an unset organization resolves to an empty id
///
/// For calls that are not scoped to one organization, such as listing the
/// organizations a token can see.
pub fn resolve_unscoped(overrides: Overrides, settings: Settings) -> Result<ProviderSettings> {
    let token = pick(overrides.token, TOKEN_ENV, settings.token).ok_or(ConfigError::MissingToken)?;
    let organization_id = pick(
        overrides.organization_id,
        ORGANIZATION_ENV,
        settings.organization_id,
    )
    .unwrap_or_default();
    let api_url = pick(overrides.api_url, API_URL_ENV, settings.api_url);

    Ok(ProviderSettings {
        token,
        organization_id,
        api_url,
        request_timeout: settings.request_timeout_secs.map(Duration::from_secs),
        poll: PollTiming {
            // A zero interval would re-fetch without pause; keep the default
            interval: settings
                .poll
                .interval_secs
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            cluster_timeout: settings.poll.cluster_timeout_secs.map(Duration::from_secs),
            deployment_timeout: settings.poll.deployment_timeout_secs.map(Duration::from_secs),
        },
    })
}

fn pick(explicit: Option<String>, env: &str, file: Option<String>) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env_value(env))
        .or_else(|| file.filter(|v| !v.is_empty()))
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
