/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::{validate_base_url, DEFAULT_BASE_URL};
use crate::logger::default_log_path;

/// Optional read-only settings file. Nothing is ever written back.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SavedConfig {
    /// Controller endpoint, e.g. "http://ilo-proxy.lan:1234"
    #[serde(default)]
    pub base_url: Option<String>,
    /// Where `--logging` writes its event lines
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        field: String,
        reason: String,
    },
}

/// What the program actually runs with: CLI flag, then config file, then default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub logging: bool,
    pub log_file: PathBuf,
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("ilofan").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("ilofan")
            .join("config.json");
    }
    PathBuf::from("/etc/ilofan/config.json")
}

pub fn validate_config(cfg: &SavedConfig) -> Result<(), ConfigError> {
    if let Some(url) = &cfg.base_url {
        check_base_url(url)?;
    }
    if let Some(path) = &cfg.log_file {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_file".to_string(),
                reason: "path is empty".to_string(),
            });
        }
    }
    Ok(())
}

fn check_base_url(url: &str) -> Result<(), ConfigError> {
    validate_base_url(url.trim_end_matches('/'))
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid {
            field: "base_url".to_string(),
            reason: e.to_string(),
        })
}

pub fn load_config_from(path: &Path) -> Result<SavedConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: SavedConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// An explicitly requested file must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<SavedConfig, ConfigError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => {
            let path = config_path();
            if path.exists() {
                load_config_from(&path)
            } else {
                Ok(SavedConfig::default())
            }
        }
    }
}

pub fn resolve_settings(
    cli_base_url: Option<String>,
    logging: bool,
    cli_log_file: Option<PathBuf>,
    saved: &SavedConfig,
) -> Result<Settings, ConfigError> {
    let base_url = cli_base_url
        .or_else(|| saved.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    check_base_url(&base_url)?;
    let log_file = cli_log_file
        .or_else(|| saved.log_file.clone())
        .unwrap_or_else(default_log_path);
    Ok(Settings {
        base_url,
        logging,
        log_file,
    })
}
