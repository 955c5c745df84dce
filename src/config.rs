//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Environment variables: `FAMTREE_*` prefix
//! 4. CLI `--store-dir` override (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one JSON document per family
    pub store_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
        }
    }
}

impl Settings {
    /// Load settings from the layered sources. An explicit config file takes
    /// the place of the global one (used by tests).
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        let mut builder = Config::builder().set_default(
            "store_dir",
            default_store_dir().to_string_lossy().to_string(),
        )?;

        match config_file {
            Some(path) => builder = builder.add_source(File::from(path.to_path_buf())),
            None => {
                if let Some(global) = global_config_path() {
                    builder = builder.add_source(File::from(global).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix("FAMTREE"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path of the global config file, when a config dir can be resolved.
    pub fn global_config_path() -> Option<PathBuf> {
        global_config_path()
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(e: config::ConfigError) -> Self {
        ApplicationError::Config {
            message: e.to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sysid", "famtree")
}

fn default_store_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("families"))
        .unwrap_or_else(|| PathBuf::from(".famtree/families"))
}

fn global_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("famtree.toml"))
}
