//! HTTP types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `Client::new_request` produces an
//! `HttpRequest` without touching the network; a `Transport` (or the host
//! application) executes it and hands back an `HttpResponse`. The Geoclient
//! API is read-only, so requests carry no body.

use std::fmt;

use url::Url;

use crate::error::GeoclientError;

/// Name of the only header the client attaches.
pub const USER_AGENT: &str = "User-Agent";

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    /// Any other valid method token, kept verbatim.
    Extension(String),
}

impl HttpMethod {
    /// Parse a method token. The empty string means GET.
    pub fn from_token(token: &str) -> Result<Self, GeoclientError> {
        let method = match token {
            "" | "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            other if other.bytes().all(is_token_byte) => HttpMethod::Extension(other.to_string()),
            other => {
                return Err(GeoclientError::Request(format!(
                    "invalid method {other:?}"
                )))
            }
        };
        Ok(method)
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Extension(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RFC 7230 `tchar`.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// An unsent HTTP request described as plain data.
///
/// Built by `Client::new_request`. `url` is always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`. The body is returned as received; this crate
/// does not interpret geocoding results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_methods_round_trip() {
        for token in ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            assert_eq!(HttpMethod::from_token(token).unwrap().as_str(), token);
        }
    }

    #[test]
    fn empty_method_means_get() {
        assert_eq!(HttpMethod::from_token("").unwrap(), HttpMethod::Get);
    }

    #[test]
    fn extension_method_is_kept_verbatim() {
        let method = HttpMethod::from_token("PROPFIND").unwrap();
        assert_eq!(method, HttpMethod::Extension("PROPFIND".to_string()));
        assert_eq!(method.to_string(), "PROPFIND");
    }

    #[test]
    fn invalid_method_token_is_a_request_error() {
        let err = HttpMethod::from_token("GE T").unwrap_err();
        assert!(matches!(err, GeoclientError::Request(_)));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("http://localhost/").unwrap(),
            headers: vec![(USER_AGENT.to_string(), "ua".to_string())],
        };
        assert_eq!(req.header("user-agent"), Some("ua"));
        assert_eq!(req.header("accept"), None);
    }
}
