//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Values read from C that could hold any
//! bit pattern (the requested format) are plain integers, validated here.
//! Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use geoclient_core::{Format, GeoclientError, HttpRequest};

/// Opaque handle to a `Client`. C callers receive a pointer to this and pass
/// it back into every FFI function.
pub struct FfiClient {
    pub(crate) inner: geoclient_core::Client,
}

// ---------------------------------------------------------------------------
// Configuration input (caller-provided)
// ---------------------------------------------------------------------------

/// `FfiConfig::format` value meaning "use the default" (JSON).
pub const GEOCLIENT_FORMAT_DEFAULT: i32 = 0;
/// `FfiConfig::format` value requesting JSON.
pub const GEOCLIENT_FORMAT_JSON: i32 = 1;
/// `FfiConfig::format` value requesting XML.
pub const GEOCLIENT_FORMAT_XML: i32 = 2;

/// Client options as C-compatible plain data.
///
/// Every string may be null, which means "unset". `format` is one of the
/// `GEOCLIENT_FORMAT_*` constants. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiConfig {
    pub base_url: *const c_char,
    pub app_id: *const c_char,
    pub app_key: *const c_char,
    pub user_agent: *const c_char,
    pub format: i32,
}

/// Map a `GEOCLIENT_FORMAT_*` value to an optional core format.
pub(crate) fn format_option(raw: i32) -> Result<Option<Format>, FfiErrorCode> {
    match raw {
        GEOCLIENT_FORMAT_DEFAULT => Ok(None),
        GEOCLIENT_FORMAT_JSON => Ok(Some(Format::Json)),
        GEOCLIENT_FORMAT_XML => Ok(Some(Format::Xml)),
        _ => Err(FfiErrorCode::UnknownFormat),
    }
}

/// Response format of a constructed client.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiFormat {
    Json = 1,
    Xml = 2,
}

impl From<Format> for FfiFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => FfiFormat::Json,
            Format::Xml => FfiFormat::Xml,
        }
    }
}

/// A query parameter supplied by the caller for endpoint requests.
#[repr(C)]
pub struct FfiParam {
    pub name: *const c_char,
    pub value: *const c_char,
}

// ---------------------------------------------------------------------------
// Request output
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An unsent HTTP request described as C-compatible plain data.
///
/// `method` is the method token (e.g. `GET`), `url` the absolute URL. The C
/// caller executes the request itself; there is never a body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: to_c_string(req.method.as_str()),
            url: to_c_string(req.url.as_str()),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes reported across the FFI boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Parse = 1,
    Configuration = 2,
    Request = 3,
    UnknownFormat = 4,
    Transport = 5,
    InvalidUtf8 = 6,
    NullArg = 7,
    Panic = 8,
}

impl From<&GeoclientError> for FfiErrorCode {
    fn from(err: &GeoclientError) -> Self {
        match err {
            GeoclientError::Parse { .. } => FfiErrorCode::Parse,
            GeoclientError::Configuration { .. } => FfiErrorCode::Configuration,
            GeoclientError::Request(_) => FfiErrorCode::Request,
            GeoclientError::UnknownFormat(_) => FfiErrorCode::UnknownFormat,
            GeoclientError::Transport(_) => FfiErrorCode::Transport,
        }
    }
}

/// Result envelope for request-building operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `request`
/// points to the built request. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string, and `request` is
/// null.
#[repr(C)]
pub struct FfiRequestResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

impl FfiRequestResult {
    pub(crate) fn ok(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiRequestResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiHttpRequest::from_core(req),
        }))
    }

    pub(crate) fn from_error(err: GeoclientError) -> *mut Self {
        Self::error(FfiErrorCode::from(&err), &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error result for an argument that is not valid UTF-8.
    pub(crate) fn invalid_utf8(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::InvalidUtf8, &format!("argument is not UTF-8: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiRequestResult {
            error_code,
            error_message: to_c_string(msg),
            request: std::ptr::null_mut(),
        }))
    }
}

/// Allocate a C string, dropping any interior NUL bytes.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}
