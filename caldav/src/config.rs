// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// `CalDAV` authentication method.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// `CalDAV` server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CalDavConfig {
    /// Base URL of the `CalDAV` server. Hrefs are resolved against its origin.
    pub base_url: String,
    /// Calendar home path (e.g., /dav/calendars/user/).
    pub calendar_home: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Path of the `WebDAV` root on a Nextcloud server.
const NEXTCLOUD_DAV_ROOT: &str = "/remote.php/dav";

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("davcal-caldav/", env!("CARGO_PKG_VERSION")).to_string()
}

impl CalDavConfig {
    /// Configuration for a Nextcloud server with basic authentication.
    ///
    /// `server_url` may be the bare server address or already point at the
    /// `WebDAV` root; either way the base URL ends in `/remote.php/dav` and the
    /// calendar home is `/remote.php/dav/calendars/<username>/`.
    ///
    /// ```
    /// # use davcal_caldav::CalDavConfig;
    /// let config = CalDavConfig::nextcloud("https://cloud.example.com/", "alice", "secret");
    /// assert_eq!(config.base_url, "https://cloud.example.com/remote.php/dav");
    /// assert_eq!(config.calendar_home, "/remote.php/dav/calendars/alice/");
    /// ```
    #[must_use]
    pub fn nextcloud(server_url: &str, username: &str, password: &str) -> Self {
        let server = server_url.trim_end_matches('/');
        let server = server.strip_suffix(NEXTCLOUD_DAV_ROOT).unwrap_or(server);
        Self {
            base_url: format!("{server}{NEXTCLOUD_DAV_ROOT}"),
            calendar_home: format!("{NEXTCLOUD_DAV_ROOT}/calendars/{username}/"),
            auth: AuthMethod::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            ..Default::default()
        }
    }
}

impl Default for CalDavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            calendar_home: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
