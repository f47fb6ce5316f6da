//
//  travis-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Optional, file-backed settings for building a
//! [`TravisClient`](crate::api::TravisClient): which API endpoint to talk to,
//! the token to authenticate with, and extra headers.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/travis-client/config.toml`
//! - **macOS**: `~/Library/Application Support/travis-client/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\travis-client\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://api.travis-ci.com/"
//! token = "xxxxxxxxxxxxxxxxxxxxxx"
//! user_agent = "release-bot/1.0"
//!
//! [headers]
//! X-Request-Source = "nightly"
//! ```
//!
//! ## Environment
//!
//! [`Config::apply_env`] overlays `TRAVIS_API_URL` and `TRAVIS_TOKEN`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Base URL of the travis-ci.com API.
pub const API_COM_URL: &str = "https://api.travis-ci.com/";

/// Base URL of the legacy travis-ci.org API.
pub const API_ORG_URL: &str = "https://api.travis-ci.org/";

/// Environment variable overriding the base URL.
pub const ENV_API_URL: &str = "TRAVIS_API_URL";

/// Environment variable providing the API token.
pub const ENV_TOKEN: &str = "TRAVIS_TOKEN";

/// Client settings, serialized as TOML.
///
/// All fields are optional; a default `Config` targets travis-ci.com
/// without authentication.
///
/// # Example
///
/// ```rust
/// use travis_client::config::{Config, API_COM_URL};
///
/// let config = Config::default();
/// assert_eq!(config.base_url(), API_COM_URL);
/// assert!(config.token.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API endpoint; defaults to [`API_COM_URL`].
    #[serde(default)]
    pub base_url: Option<String>,

    /// Travis CI API token.
    #[serde(default)]
    pub token: Option<String>,

    /// Overrides the default `travis-client/<version>` user agent.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Returns the default configuration when no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Path of the configuration file for this platform.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlays `TRAVIS_API_URL` and `TRAVIS_TOKEN` when they are set and
    /// non-empty.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// The API endpoint to use.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_COM_URL)
    }
}
