use std::{fs, path::PathBuf};

use common::fs::{AccessPolicy, DEFAULT_ADMIN};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "jfs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identities allowed to change file permissions
    #[serde(default = "default_admins")]
    pub admins: Vec<String>,
    /// Identity the shell starts as
    #[serde(default = "default_user")]
    pub default_user: String,
    /// Directory the shell starts in
    #[serde(default = "default_dir")]
    pub default_dir: String,
    /// Default log directive (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_admins() -> Vec<String> {
    vec![DEFAULT_ADMIN.to_string()]
}

fn default_user() -> String {
    DEFAULT_ADMIN.to_string()
}

fn default_dir() -> String {
    "/root".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admins: default_admins(),
            default_user: default_user(),
            default_dir: default_dir(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// The access policy described by this config
    pub fn policy(&self) -> AccessPolicy {
        AccessPolicy::with_admins(self.admins.iter().cloned())
    }

    /// First configured admin, used to drive scripted runs
    pub fn primary_admin(&self) -> &str {
        self.admins
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_ADMIN)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the jfs directory (~/.jfs)
    pub jfs_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the jfs directory path (custom or default ~/.jfs)
    pub fn jfs_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new jfs state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let jfs_dir = Self::jfs_dir(custom_path)?;
        let config_path = jfs_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&jfs_dir)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            jfs_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the jfs directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let jfs_dir = Self::jfs_dir(custom_path)?;
        let config_path = jfs_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        if config.admins.is_empty() {
            return Err(StateError::NoAdmins);
        }

        Ok(Self {
            jfs_dir,
            config_path,
            config,
        })
    }

    /// Load state if initialized, otherwise run with the default config
    pub fn load_or_default(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        match Self::load(custom_path.clone()) {
            Err(StateError::NotInitialized) => {
                let jfs_dir = Self::jfs_dir(custom_path)?;
                Ok(Self {
                    config_path: jfs_dir.join(CONFIG_FILE_NAME),
                    jfs_dir,
                    config: AppConfig::default(),
                })
            }
            other => other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("jfs directory not initialized. Run 'jfs init' first")]
    NotInitialized,

    #[error("jfs directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("config must list at least one admin")]
    NoAdmins,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
