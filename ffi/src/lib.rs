//! C-ABI wrapper around `geoclient-core`.
//!
//! # Overview
//! Exposes client construction and request building through `extern "C"`
//! functions so any language with a C FFI can produce Geoclient requests and
//! execute them with its own HTTP stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `geoclient_client_new` returns null on failure and reports the reason
//!   through an optional out-parameter.
//! - Request builders return a `FfiRequestResult` envelope carrying either
//!   the request or an error code and message.
//! - The C caller owns all returned pointers and must call the matching
//!   `geoclient_*_free` / `geoclient_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::Utf8Error;

use geoclient_core::{Client, Config, Endpoint};

use types::*;

/// Read a nullable C string. Null reads as `None`.
fn read_opt_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, Utf8Error> {
    if ptr.is_null() {
        return Ok(None);
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().map(Some)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client from `config`.
///
/// A null `config` means every option is unset, yielding the default base
/// URL, user agent and JSON format. Returns null on failure; when
/// `error_code` is non-null it receives `Ok` or the failure reason.
/// The caller must free the returned pointer with `geoclient_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_new(
    config: *const FfiConfig,
    error_code: *mut FfiErrorCode,
) -> *mut FfiClient {
    let outcome = catch_unwind(|| build_client(config)).unwrap_or(Err(FfiErrorCode::Panic));
    let (client, code) = match outcome {
        Ok(inner) => (Box::into_raw(Box::new(FfiClient { inner })), FfiErrorCode::Ok),
        Err(code) => (std::ptr::null_mut(), code),
    };
    if !error_code.is_null() {
        unsafe { *error_code = code };
    }
    client
}

fn build_client(config: *const FfiConfig) -> Result<Client, FfiErrorCode> {
    let mut core = Config::new();
    if !config.is_null() {
        let config = unsafe { &*config };
        let read = |ptr: *const c_char| read_opt_str(ptr).map_err(|_| FfiErrorCode::InvalidUtf8);
        if let Some(base_url) = read(config.base_url)? {
            core = core.with_base_url(base_url);
        }
        if let Some(app_id) = read(config.app_id)? {
            core = core.with_app_id(app_id);
        }
        if let Some(app_key) = read(config.app_key)? {
            core = core.with_app_key(app_key);
        }
        if let Some(user_agent) = read(config.user_agent)? {
            core = core.with_user_agent(user_agent);
        }
        core.format = format_option(config.format)?;
    }
    Client::new(core).map_err(|e| FfiErrorCode::from(&e))
}

/// Free a client created by `geoclient_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_free(client: *mut FfiClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Client accessors
// ---------------------------------------------------------------------------

fn client_string(client: *const FfiClient, get: impl Fn(&Client) -> &str) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        to_c_string(get(&client.inner))
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// The normalized base URL (always ends with `/`).
///
/// Returns null if `client` is null. Free with `geoclient_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_base_url(client: *const FfiClient) -> *mut c_char {
    client_string(client, |c| c.base_url().as_str())
}

/// The user agent sent with every request. Free with `geoclient_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_user_agent(client: *const FfiClient) -> *mut c_char {
    client_string(client, |c| c.user_agent())
}

/// The configured application id. Free with `geoclient_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_app_id(client: *const FfiClient) -> *mut c_char {
    client_string(client, |c| c.app_id())
}

/// The configured application key. Free with `geoclient_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_app_key(client: *const FfiClient) -> *mut c_char {
    client_string(client, |c| c.app_key())
}

/// The response format. A null `client` reports the default, JSON.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_client_format(client: *const FfiClient) -> FfiFormat {
    if client.is_null() {
        return FfiFormat::Json;
    }
    let client = unsafe { &*client };
    client.inner.format().into()
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a request for `path` relative to the client's base URL.
///
/// A null `method` means GET. One leading `/` is stripped from `path`.
/// The caller must free the result with `geoclient_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_new_request(
    client: *const FfiClient,
    method: *const c_char,
    path: *const c_char,
) -> *mut FfiRequestResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiRequestResult::null_arg("client");
        }
        if path.is_null() {
            return FfiRequestResult::null_arg("path");
        }
        let client = unsafe { &*client };
        let Ok(method) = read_opt_str(method) else {
            return FfiRequestResult::invalid_utf8("method");
        };
        let Ok(Some(path)) = read_opt_str(path) else {
            return FfiRequestResult::invalid_utf8("path");
        };
        match client.inner.new_request(method.unwrap_or(""), path) {
            Ok(req) => FfiRequestResult::ok(req),
            Err(e) => FfiRequestResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiRequestResult::panic("panic in geoclient_new_request"))
}

/// Build a GET request for a Geoclient resource such as `"address"`.
///
/// `params` points to `params_len` name/value pairs appended to the query
/// string in order; a null value is sent as an empty string. `app_id` and
/// `app_key` follow when configured. Unknown endpoint names yield
/// `FfiErrorCode::Request`.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_new_endpoint_request(
    client: *const FfiClient,
    endpoint: *const c_char,
    params: *const FfiParam,
    params_len: u32,
) -> *mut FfiRequestResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiRequestResult::null_arg("client");
        }
        if endpoint.is_null() {
            return FfiRequestResult::null_arg("endpoint");
        }
        if params.is_null() && params_len > 0 {
            return FfiRequestResult::null_arg("params");
        }
        let client = unsafe { &*client };

        let Ok(Some(name)) = read_opt_str(endpoint) else {
            return FfiRequestResult::invalid_utf8("endpoint");
        };
        let Some(endpoint) = Endpoint::ALL.into_iter().find(|e| e.name() == name) else {
            return FfiRequestResult::error(
                FfiErrorCode::Request,
                &format!("unknown endpoint {name:?}"),
            );
        };

        let raw_params: &[FfiParam] = if params_len == 0 {
            &[][..]
        } else {
            unsafe { std::slice::from_raw_parts(params, params_len as usize) }
        };
        let mut pairs = Vec::with_capacity(raw_params.len());
        for param in raw_params {
            let Ok(Some(key)) = read_opt_str(param.name) else {
                return FfiRequestResult::null_arg("params.name");
            };
            let Ok(value) = read_opt_str(param.value) else {
                return FfiRequestResult::invalid_utf8("params.value");
            };
            pairs.push((key, value.unwrap_or("")));
        }

        match client.inner.new_endpoint_request(endpoint, &pairs) {
            Ok(req) => FfiRequestResult::ok(req),
            Err(e) => FfiRequestResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiRequestResult::panic("panic in geoclient_new_endpoint_request"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiRequestResult` and the request it carries.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_free_result(result: *mut FfiRequestResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.request.is_null() {
            free_request(unsafe { Box::from_raw(result.request) });
        }
    }));
}

/// Free the C strings and header array owned by an `FfiHttpRequest`.
fn free_request(req: Box<FfiHttpRequest>) {
    if !req.method.is_null() {
        drop(unsafe { CString::from_raw(req.method) });
    }
    if !req.url.is_null() {
        drop(unsafe { CString::from_raw(req.url) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                req.headers,
                req.headers_len as usize,
            ))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { CString::from_raw(h.value) });
            }
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn geoclient_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
