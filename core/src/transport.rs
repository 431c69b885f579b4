//! Transport collaborator that actually sends requests.
//!
//! # Design
//! `Client` never performs I/O while building requests. When a caller wants
//! the client to dispatch as well, the request is handed to a `Transport`.
//! The default is a single `UreqTransport` shared by the whole process;
//! callers inject their own through `Config::with_transport`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// Errors raised while executing a request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Ureq(#[from] ureq::Error),

    #[error(transparent)]
    Http(#[from] ureq::http::Error),

    #[error("{0}")]
    Other(String),
}

/// Executes `HttpRequest` values.
///
/// Implementations must be safe to share across threads, since one
/// transport backs every clone of a `Client`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Non-2xx responses are returned as data rather than `Err`, leaving status
/// interpretation to the caller.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an agent the caller configured (timeouts, proxy, TLS).
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let outgoing = builder.body(())?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let mut response = self.agent.run(outgoing)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        tracing::debug!(status, url = %request.url, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// The process-wide transport used when `Config` does not supply one.
pub fn default_transport() -> Arc<dyn Transport> {
    static SHARED: OnceLock<Arc<dyn Transport>> = OnceLock::new();
    SHARED
        .get_or_init(|| Arc::new(UreqTransport::new()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_is_shared() {
        let a = default_transport();
        let b = default_transport();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
