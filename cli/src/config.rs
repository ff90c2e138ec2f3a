// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use davcal_caldav::{AuthMethod, CalDavConfig};
use davcal_core::CoreConfig;
use tokio::fs;

use crate::APP_NAME;

const DAVCAL_CONFIG_ENV: &str = "DAVCAL_CONFIG";

/// Locates and reads the configuration file.
///
/// The path comes from `--config`, then `$DAVCAL_CONFIG`, then
/// `$XDG_CONFIG_HOME/davcal/config.toml`.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(DAVCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    tracing::debug!(path = %path.display(), "reading configuration");
    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration of the davcal command-line host.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Where the calendars live and how to log in.
    pub server: ServerConfig,

    /// Behaviour of the calendar operations.
    #[serde(default)]
    pub core: CoreConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config: Self = toml::from_str(s)?;

        // A login name that is an address doubles as the organizer
        if config.core.organizer_email.is_none() && config.server.username.contains('@') {
            config.core.organizer_email = Some(config.server.username.clone());
        }
        Ok(config)
    }
}

/// The kind of server, which decides how paths are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Nextcloud: `WebDAV` root at `/remote.php/dav`.
    #[default]
    Nextcloud,
    /// Any other `CalDAV` server; `url` points at the `WebDAV` root.
    Generic,
}

/// The `[server]` section.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub url: String,

    /// Login name.
    pub username: String,

    /// Password in clear text. Prefer `password_env`.
    #[serde(default)]
    pub password: Option<String>,

    /// Name of the environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,

    /// Server kind, `nextcloud` unless set.
    #[serde(default)]
    pub flavor: Flavor,

    /// Overrides the calendar home path.
    #[serde(default)]
    pub calendar_home: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// The password, read from the environment if configured so.
    pub fn password(&self) -> Result<String, Box<dyn Error>> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        match &self.password_env {
            Some(var) => std::env::var(var)
                .map_err(|_| format!("Environment variable {var} for the password is not set").into()),
            None => Err("Either server.password or server.password_env must be set".into()),
        }
    }

    /// Settings for the `CalDAV` client.
    pub fn to_caldav_config(&self) -> Result<CalDavConfig, Box<dyn Error>> {
        let password = self.password()?;
        let mut config = match self.flavor {
            Flavor::Nextcloud => CalDavConfig::nextcloud(&self.url, &self.username, &password),
            Flavor::Generic => CalDavConfig {
                base_url: self.url.trim_end_matches('/').to_string(),
                calendar_home: url_path(&self.url),
                auth: AuthMethod::Basic {
                    username: self.username.clone(),
                    password,
                },
                ..Default::default()
            },
        };

        if let Some(home) = &self.calendar_home {
            config.calendar_home.clone_from(home);
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}

/// Path part of `url`, always ending in a slash.
fn url_path(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = rest.find('/').map_or("/", |i| &rest[i..]);
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
