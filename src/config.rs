// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "LEDGERLY_API_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/".to_string(),
            timeout_secs: 15,
            cache_ttl_secs: 30,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let proj = crate::db::project_dirs()?;
        Ok(proj.config_dir().join("config.toml"))
    }

    /// Defaults, then `config.toml` if present, then the environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut cfg = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                cfg.api_url = url;
            }
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Parse config at {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
