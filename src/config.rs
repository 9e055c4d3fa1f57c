//! Configuration constants and settings for the DCS-gRPC Installer
//!
//! This module contains application-wide configuration values including
//! UI settings, window dimensions and the installer settings file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The current application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default window size
pub static WINDOW_SIZE: [f32; 2] = [800.0, 500.0];

/// Minimum window size
pub static MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

/// Maximum number of log files to keep
pub const MAX_LOG_FILES: usize = 10;

// Common file names/paths
pub const CONFIG_FILENAME: &str = "DcsGrpcInstaller.json";
pub const CONFIG_ENV_VAR: &str = "DCS_GRPC_INSTALLER_CONFIG";
pub const APP_DIR_NAME: &str = "DcsGrpcInstaller";
pub const MISSION_SCRIPTING_FILENAME: &str = "MissionScripting.lua";
pub const TEMP_ARCHIVE_PREFIX: &str = "dcs-gRPC";

pub const DEFAULT_RELEASES_URL: &str = "https://api.github.com/repos/DCS-gRPC/rust-server/releases";
pub const DEFAULT_USER_AGENT: &str = "DcsGrpcInstaller";
pub const DEFAULT_RELEASE_COUNT: usize = 5;
pub const DEFAULT_ARCHIVE_EXTENSION: &str = ".zip";

pub const DEFAULT_MARKER: &str = "grpc-mission.lua";
pub const DEFAULT_ANCHOR: &str = "scripts/scriptingSystem.lua";
pub const DEFAULT_DIRECTIVE: &str = r"dofile(lfs.writedir()..[[Scripts\DCS-gRPC\grpc-mission.lua]])";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Installer settings, read from `DcsGrpcInstaller.json` when present.
/// Every field falls back to its default when missing from the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InstallerConfig {
    pub releases_url: String,
    pub user_agent: String,
    pub release_count: usize,
    pub archive_extension: String,
    pub markers: Vec<String>,
    pub anchor: String,
    pub directive: String,
    /// Where the downloaded archive is staged. `None` means the working directory.
    pub temp_dir: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            release_count: DEFAULT_RELEASE_COUNT,
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            markers: vec![DEFAULT_MARKER.to_string()],
            anchor: DEFAULT_ANCHOR.to_string(),
            directive: DEFAULT_DIRECTIVE.to_string(),
            temp_dir: None,
        }
    }
}

impl InstallerConfig {
    /// Path of the settings file: the env override, else the working directory.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings for the running installer, falling back to defaults on error.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Directory the temporary archive is created in.
    pub fn staging_dir(&self) -> PathBuf {
        match &self.temp_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
