//! On-disk settings file

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `astroform.yaml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub token: Option<String>,
    pub organization_id: Option<String>,
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub poll: PollSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollSettings {
    pub interval_secs: Option<u64>,
    pub cluster_timeout_secs: Option<u64>,
    pub deployment_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty file deserializes to unit, not to an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let yaml = r#"
token: abc
organization_id: org-1
api_url: http://localhost:8080/organizations
request_timeout_secs: 30
poll:
  interval_secs: 2
  cluster_timeout_secs: 3600
"#;
        let settings = Settings::parse(yaml, Path::new("astroform.yaml")).unwrap();
        assert_eq!(settings.token.as_deref(), Some("abc"));
        assert_eq!(settings.request_timeout_secs, Some(30));
        assert_eq!(settings.poll.interval_secs, Some(2));
        assert_eq!(settings.poll.cluster_timeout_secs, Some(3600));
        assert_eq!(settings.poll.deployment_timeout_secs, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings = Settings::parse("\n", Path::new("astroform.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::parse("tokn: abc\n", Path::new("astroform.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("astroform.yaml"));
    }
}
