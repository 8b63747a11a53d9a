// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr, time::Duration};

use tokio::fs;

use calclient_api::ApiConfig;
use calclient_core::{APP_NAME, DEFAULT_SUBMIT_DELAY};

const CALCLIENT_CONFIG_ENV: &str = "CALCLIENT_CONFIG";
const CALCLIENT_DEV_ENV: &str = "CALCLIENT_DEV";

const CALCLIENT_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const CALCLIENT_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CALCLIENT_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({CALCLIENT_DEV_ENV} is set): config must be explicitly specified via --config or {CALCLIENT_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the calendar client.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// The user whose calendar is edited.
    pub username: String,

    /// Delay between triggering a submit and sending it, in milliseconds.
    #[serde(default)]
    pub submit_delay_ms: Option<u64>,

    /// Backend connection settings.
    pub api: ApiConfig,
}

impl Config {
    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUBMIT_DELAY)
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s)?;
        if config.username.trim().is_empty() {
            return Err("username must not be empty".into());
        }
        Ok(config)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(CALCLIENT_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if CALCLIENT_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if CALCLIENT_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            CALCLIENT_DEV_ENV,
            val,
            CALCLIENT_DEV_VALID_TRUE.join(", "),
            CALCLIENT_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
