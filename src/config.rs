//! Configuration loading module
//!
//! This module loads the tool's JSON configuration file, which lives in the
//! same directory as the running executable. Missing or malformed files are
//! tolerated and fall back to defaults; only a missing API key stops a run,
//! and that check happens before any request is made.

use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the JSON configuration file expected beside the executable.
pub const CONFIG_FILE_NAME: &str = "episode_roulette.json";

/// Errors that can occur while loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The directory of the running executable could not be determined
    #[error("Could not determine the executable's directory")]
    ExecutableDirUnknown,

    /// Failed to read the configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to parse the configuration file
    #[error("Failed to parse configuration file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The API key is missing or empty
    #[error("API key is missing or empty")]
    MissingApiKey,
}

/// Settings controlling where the Sonarr server is reached and where the
/// run log is written.
///
/// Field names match the keys of the JSON configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Directory the run log is written to; the executable's directory
    /// when unset
    #[serde(rename = "loglocation", default)]
    pub log_location: Option<PathBuf>,

    /// Scheme and host of the Sonarr server
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Optional URL base path the server is mounted under
    #[serde(rename = "baseurl", default)]
    pub base_url: String,

    /// TCP port of the Sonarr server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared-secret credential sent with every request
    #[serde(rename = "apikey", default)]
    pub api_key: String,
}

fn default_hostname() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    8989
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log_location: None,
            hostname: default_hostname(),
            base_url: String::new(),
            port: default_port(),
            api_key: String::new(),
        }
    }
}

impl Configuration {
    /// Loads `episode_roulette.json` from the executable's directory.
    ///
    /// Any failure (unknown executable location, unreadable file, malformed
    /// JSON) yields the default configuration together with the error so
    /// the caller can log it. The run then stops at the API key check
    /// instead, since the default key is empty.
    pub fn load_beside_executable() -> (Self, Option<ConfigError>) {
        let dir = match executable_dir() {
            Ok(dir) => dir,
            Err(error) => return (Self::default(), Some(error)),
        };

        Self::load_from(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration from the given file path.
    ///
    /// Read and parse failures fall back to the default configuration and
    /// hand the error back for logging rather than aborting.
    pub fn load_from(path: &Path) -> (Self, Option<ConfigError>) {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) => {
                return (
                    Self::default(),
                    Some(ConfigError::ReadFailed {
                        path: path.to_path_buf(),
                        source,
                    }),
                );
            }
        };

        match serde_json::from_str::<Configuration>(&raw) {
            Ok(config) => (config.normalized(), None),
            Err(source) => (
                Self::default(),
                Some(ConfigError::ParseFailed {
                    path: path.to_path_buf(),
                    source,
                }),
            ),
        }
    }

    /// Applies defaults to fields the file left empty.
    ///
    /// An empty hostname, a zero port, and an empty log location count as
    /// unset, matching the file format's optional fields.
    fn normalized(mut self) -> Self {
        if self.hostname.is_empty() {
            self.hostname = default_hostname();
        }
        if self.port == 0 {
            self.port = default_port();
        }
        if self
            .log_location
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            self.log_location = None;
        }
        self
    }

    /// Root URL every API request is built on:
    /// `<hostname>:<port>[/<baseurl>]/api`.
    ///
    /// A separator is inserted before the base path only when the base path
    /// does not already carry one.
    pub fn api_root(&self) -> String {
        let mut root = format!("{}:{}", self.hostname, self.port);

        if !self.base_url.is_empty() {
            if !self.base_url.contains('/') {
                root.push('/');
            }
            root.push_str(&self.base_url);
        }

        root.push_str("/api");
        root
    }

    /// Directory the run log file is placed in.
    ///
    /// Uses the configured log location when present, otherwise the
    /// executable's own directory, with the current directory as the last
    /// resort.
    pub fn log_directory(&self) -> PathBuf {
        if let Some(dir) = &self.log_location {
            return dir.clone();
        }

        executable_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Fails when the API key is empty. Called before the first request.
    pub fn require_api_key(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

/// Resolves the directory containing the running executable.
fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(|_| ConfigError::ExecutableDirUnknown)?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or(ConfigError::ExecutableDirUnknown)
}
