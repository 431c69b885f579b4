//! Client configuration.
//!
//! # Design
//! `Config` is the transient input to `Client::new`. Every field is optional
//! and nothing is defaulted here; the defaults are applied once, when the
//! client is built. Empty strings for `base_url` and `user_agent` count as
//! unset, while empty credentials are kept as-is.
//!
//! A `Config` can be assembled in code, deserialized from a JSON settings
//! file (camelCase keys), or read from `GEOCLIENT_*` environment variables.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::GeoclientError;
use crate::format::Format;
use crate::transport::Transport;

pub const ENV_BASE_URL: &str = "GEOCLIENT_BASE_URL";
pub const ENV_APP_ID: &str = "GEOCLIENT_APP_ID";
pub const ENV_APP_KEY: &str = "GEOCLIENT_APP_KEY";
pub const ENV_FORMAT: &str = "GEOCLIENT_FORMAT";
pub const ENV_USER_AGENT: &str = "GEOCLIENT_USER_AGENT";

/// Options for `Client::new`.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub base_url: Option<String>,
    pub app_id: String,
    pub app_key: String,
    pub format: Option<Format>,
    pub user_agent: Option<String>,
    #[serde(skip)]
    pub transport: Option<Arc<dyn Transport>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = app_key.into();
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Read `GEOCLIENT_*` variables from the process environment.
    pub fn from_env() -> Result<Self, GeoclientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GeoclientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup(ENV_FORMAT).filter(|s| !s.is_empty()) {
            Some(name) => Some(name.parse()?),
            None => None,
        };
        Ok(Self {
            base_url: lookup(ENV_BASE_URL),
            app_id: lookup(ENV_APP_ID).unwrap_or_default(),
            app_key: lookup(ENV_APP_KEY).unwrap_or_default(),
            format,
            user_agent: lookup(ENV_USER_AGENT),
            transport: None,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("app_key", &redact(&self.app_key))
            .field("format", &self.format)
            .field("user_agent", &self.user_agent)
            .field("transport", &self.transport.as_ref().map(|_| "custom"))
            .finish()
    }
}

pub(crate) fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
