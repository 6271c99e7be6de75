use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0} (set by ASTROFORM_CONFIG_PATH)")]
    ConfigFileNotFound(PathBuf),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(
        "no API token configured. Pass --token, set ASTRONOMER_API_TOKEN, \
        or add `token:` to the config file"
    )]
    MissingToken,

    #[error(
        "no organization configured. Pass --organization, set ASTRONOMER_ORGANIZATION_ID, \
        or add `organization_id:` to the config file"
    )]
    MissingOrganization,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
