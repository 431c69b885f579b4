//! Request-construction client for the NYC Geoclient v1 API.
//!
//! # Overview
//! Holds configuration (base URL, credentials, response format, user agent)
//! and builds `HttpRequest` values resolved against the configured base URL.
//! Building a request never touches the network; the caller executes it, or
//! asks the client to do so through its `Transport`.
//!
//! # Design
//! - `Client` is immutable after construction and `Send + Sync`.
//! - Defaults (base URL, user agent, JSON format) are applied in
//!   `Client::new`, never in `Config`.
//! - Responses are returned raw; geocoding results are not interpreted.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod http;
pub mod resolve;
pub mod transport;

pub use client::{Client, DEFAULT_BASE_URL, DEFAULT_FORMAT, DEFAULT_USER_AGENT, LIBRARY_VERSION};
pub use config::Config;
pub use endpoint::Endpoint;
pub use error::{GeoclientError, UrlError};
pub use format::Format;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{default_transport, Transport, TransportError, UreqTransport};
pub use url::Url;
