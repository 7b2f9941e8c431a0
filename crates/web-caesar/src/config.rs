//! Configuration management for the Web Caesar server
//!
//! Settings come from a JSON file (explicit path, `WEB_CAESAR_CONFIG`, or a
//! well-known file in the working directory) with defaults for every field.
//! Command line flags are applied on top by the server binary.

use caesar::DictionarySettings;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "WEB_CAESAR_CONFIG";

/// Files looked up in the working directory, in order
const CONFIG_FILE_NAMES: [&str; 2] = [".web-caesar.json", "web-caesar.json"];

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file {path}: {source}")]
  Io { path: PathBuf, source: std::io::Error },

  #[error("Failed to parse config file {path}: {source}")]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("Invalid configuration: {0}")]
  Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Address the HTTP server binds to
  #[serde(default = "default_bind")]
  pub bind: SocketAddr,
  /// JSONL request log location
  #[serde(default = "default_log_path")]
  pub log_path: PathBuf,
  /// Size at which the request log rotates (0 disables rotation)
  #[serde(default = "default_log_max_bytes")]
  pub log_max_bytes: u64,
  /// Directory of built UI assets served for unmatched GET requests
  #[serde(default)]
  pub static_dir: Option<PathBuf>,
  /// Directory of `<code>.txt` word lists overriding the embedded ones
  #[serde(default)]
  pub dictionaries_dir: Option<PathBuf>,
  /// Threshold applied to /decrypt when the request sets none
  #[serde(default)]
  pub default_threshold: Option<f64>,
  /// Typo tolerance of dictionary lookups
  #[serde(default = "default_max_edit_distance")]
  pub max_edit_distance: usize,
  /// Shortest word that may match with a typo
  #[serde(default = "default_fuzzy_min_length")]
  pub fuzzy_min_length: usize,
}

fn default_bind() -> SocketAddr {
  SocketAddr::from(([127, 0, 0, 1], 5000))
}
fn default_log_path() -> PathBuf {
  dirs::home_dir()
    .unwrap_or_else(std::env::temp_dir)
    .join(".web-caesar")
    .join("server-logs.jsonl")
}
fn default_log_max_bytes() -> u64 {
  scribe::request_log::DEFAULT_MAX_BYTES
}
fn default_max_edit_distance() -> usize {
  DictionarySettings::default().max_edit_distance
}
fn default_fuzzy_min_length() -> usize {
  DictionarySettings::default().fuzzy_min_length
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind: default_bind(),
      log_path: default_log_path(),
      log_max_bytes: default_log_max_bytes(),
      static_dir: None,
      dictionaries_dir: None,
      default_threshold: None,
      max_edit_distance: default_max_edit_distance(),
      fuzzy_min_length: default_fuzzy_min_length(),
    }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content =
      std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: Config =
      serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    config.validate()?;
    Ok(config)
  }

  /// Load the first well-known config file in `dir`, or defaults
  pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
    for name in CONFIG_FILE_NAMES {
      let candidate = dir.as_ref().join(name);
      if candidate.exists() {
        return Self::load_from_file(candidate);
      }
    }

    Ok(Config::default())
  }

  /// Load from `WEB_CAESAR_CONFIG`, then the working directory, then defaults
  pub fn load() -> Result<Self> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
      if !path.trim().is_empty() {
        return Self::load_from_file(path);
      }
    }

    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io { path: PathBuf::from("."), source })?;
    Self::load_from_dir(cwd)
  }

  /// Reject settings the server cannot honour
  pub fn validate(&self) -> Result<()> {
    if self.max_edit_distance > 2 {
      return Err(ConfigError::Invalid(format!(
        "max_edit_distance must be at most 2, got {}",
        self.max_edit_distance
      )));
    }

    if let Some(threshold) = self.default_threshold {
      if !(0.0..=100.0).contains(&threshold) {
        return Err(ConfigError::Invalid(format!("default_threshold must be within 0-100, got {threshold}")));
      }
    }

    Ok(())
  }

  pub fn dictionary_settings(&self) -> DictionarySettings {
    DictionarySettings { max_edit_distance: self.max_edit_distance, fuzzy_min_length: self.fuzzy_min_length }
  }
}
