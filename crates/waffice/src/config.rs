//! Per-screen settings loaded from an optional YAML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use waffice_listview::{ListSettings, ListViewError};

/// Settings for every list screen.
///
/// ```yaml
/// members:
///   page_size: 20
///   search_fields: [name, email]
/// applications:
///   page_size: 10
/// ```
///
/// Missing sections and keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub members: ListSettings,
    pub applications: ListSettings,
}

impl Config {
    /// Loads the file at `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Config::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_yaml(&text).map_err(|err| err.at(path))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // an empty file deserializes as null
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.members
            .validate()
            .map_err(|source| ConfigError::Invalid {
                section: "members",
                source,
            })?;
        self.applications
            .validate()
            .map_err(|source| ConfigError::Invalid {
                section: "applications",
                source,
            })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file{}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid '{section}' settings")]
    Invalid {
        section: &'static str,
        #[source]
        source: ListViewError,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    fn at(self, path: &Path) -> Self {
        match self {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}
