//! Error types for the Geoclient client.
//!
//! # Design
//! Construction and request building fail in only two interesting ways: a
//! URL that does not parse (`Parse`) and a base URL that lost its trailing
//! slash (`Configuration`). The remaining variants cover the edges around
//! the core: an unusable method token, a bad format name in configuration,
//! and failures reported by the transport when a request is actually sent.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by `Client` and `Config`.
#[derive(Debug, Error)]
pub enum GeoclientError {
    /// The base URL or the resolved request URL is not a valid URL.
    #[error("parse {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: UrlError,
    },

    /// The stored base URL does not end with `/`.
    #[error("base URL must have a trailing slash, but {base_url:?} does not")]
    Configuration { base_url: String },

    /// The method/path pair cannot form an HTTP request.
    #[error("invalid request: {0}")]
    Request(String),

    /// A response format name other than `json` or `xml`.
    #[error("unknown response format {0:?}, expected \"json\" or \"xml\"")]
    UnknownFormat(String),

    /// The transport failed to deliver the request.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl GeoclientError {
    pub(crate) fn parse(input: &str, source: impl Into<UrlError>) -> Self {
        GeoclientError::Parse {
            input: input.to_string(),
            source: source.into(),
        }
    }

    /// True for `Parse`, the error callers most often match on.
    pub fn is_parse(&self) -> bool {
        matches!(self, GeoclientError::Parse { .. })
    }
}

/// Why a URL or URL reference was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("missing protocol scheme")]
    MissingScheme,

    #[error("invalid control character in URL")]
    ControlCharacter,

    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    #[error("URL cannot be used as a base")]
    CannotBeABase,
}
