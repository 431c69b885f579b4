//! Geoclient API client.
//!
//! # Design
//! `Client` holds validated configuration and no mutable state. `new_request`
//! turns a method and a path into an `HttpRequest` without touching the
//! network; `send` and `get` hand requests to the configured `Transport`
//! when the caller wants the client to dispatch as well.
//!
//! The base URL path always ends with `/`. Construction enforces it and
//! `new_request` checks it again before resolving anything.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::{redact, Config};
use crate::endpoint::Endpoint;
use crate::error::GeoclientError;
use crate::format::Format;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, USER_AGENT};
use crate::resolve::{normalize_base, resolve};
use crate::transport::{default_transport, Transport};

pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_BASE_URL: &str = "https://api.cityofnewyork.us/geoclient/v1/";
pub const DEFAULT_USER_AGENT: &str = concat!("geoclient-rs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_FORMAT: Format = Format::Json;

/// Client for the NYC Geoclient v1 API.
///
/// Cheap to clone; clones share the transport. Safe to use from many
/// threads at once.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    user_agent: String,
    app_id: String,
    app_key: String,
    format: Format,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Build a client, applying defaults for every unset option.
    ///
    /// Fails with `GeoclientError::Parse` if the base URL does not parse.
    pub fn new(config: Config) -> Result<Self, GeoclientError> {
        let Config {
            base_url,
            app_id,
            app_key,
            format,
            user_agent,
            transport,
        } = config;

        let transport = transport.unwrap_or_else(default_transport);
        let base_url = match base_url.as_deref() {
            Some(raw) if !raw.is_empty() => normalize_base(raw)?,
            _ => normalize_base(DEFAULT_BASE_URL)?,
        };
        let format = format.unwrap_or(DEFAULT_FORMAT);
        let user_agent = user_agent
            .filter(|ua| !ua.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        tracing::debug!(
            base_url = %base_url,
            format = %format,
            user_agent = %user_agent,
            has_credentials = !app_id.is_empty() && !app_key.is_empty(),
            "geoclient client configured"
        );

        Ok(Self {
            base_url,
            user_agent,
            app_id,
            app_key,
            format,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Build a request for `path` relative to the base URL.
    ///
    /// One leading `/` is stripped from `path`, so `/foo` and `foo` resolve
    /// to the same URL. The request carries a `User-Agent` header and no body.
    pub fn new_request(&self, method: &str, path: &str) -> Result<HttpRequest, GeoclientError> {
        if !self.base_url.path().ends_with('/') {
            return Err(GeoclientError::Configuration {
                base_url: self.base_url.to_string(),
            });
        }

        let url = resolve(&self.base_url, path)?;
        let method = HttpMethod::from_token(method)?;

        let mut headers = Vec::with_capacity(1);
        if !self.user_agent.is_empty() {
            headers.push((USER_AGENT.to_string(), self.user_agent.clone()));
        }

        tracing::trace!(method = %method, url = %url, "built request");
        Ok(HttpRequest {
            method,
            url,
            headers,
        })
    }

    /// Build a GET request for a Geoclient resource.
    ///
    /// `params` are appended to the query string in order, followed by
    /// `app_id` and `app_key` when they are set.
    pub fn new_endpoint_request(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, GeoclientError> {
        let mut request = self.new_request("GET", &endpoint.path(self.format))?;
        {
            let mut query = request.url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            if !self.app_id.is_empty() {
                query.append_pair("app_id", &self.app_id);
            }
            if !self.app_key.is_empty() {
                query.append_pair("app_key", &self.app_key);
            }
        }
        Ok(request)
    }

    /// Execute a request with the configured transport.
    ///
    /// The response is returned as received, whatever its status.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GeoclientError> {
        Ok(self.transport.execute(request)?)
    }

    /// Build and send a GET request for a Geoclient resource.
    pub fn get(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, GeoclientError> {
        let request = self.new_endpoint_request(endpoint, params)?;
        self.send(&request)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("app_id", &self.app_id)
            .field("app_key", &redact(&self.app_key))
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
