//! Base URL normalization and relative reference resolution.
//!
//! # Design
//! Every request path is resolved against the base URL with RFC 3986
//! relative resolution (`Url::join`). Two rules sit on top of that:
//!
//! - the base path always ends with `/`, so a relative reference is appended
//!   to the base path instead of replacing its last segment;
//! - exactly one leading `/` is stripped from the request path, so `/foo`
//!   resolves like `foo` rather than replacing the whole base path.
//!
//! `Url::join` is lenient and accepts references such as `:` that a strict
//! reference parser rejects. `validate_reference` applies those stricter
//! checks first so malformed paths surface as parse errors.

use url::Url;

use crate::error::{GeoclientError, UrlError};

/// Parse `raw` as a base URL and make sure its path ends with `/`.
pub fn normalize_base(raw: &str) -> Result<Url, GeoclientError> {
    let mut url = Url::parse(raw).map_err(|e| GeoclientError::parse(raw, e))?;
    if url.cannot_be_a_base() {
        return Err(GeoclientError::parse(raw, UrlError::CannotBeABase));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve a request path against `base`.
///
/// `base` is expected to end with `/`; the caller checks that invariant.
pub fn resolve(base: &Url, path: &str) -> Result<Url, GeoclientError> {
    let reference = path.strip_prefix('/').unwrap_or(path);
    validate_reference(reference).map_err(|e| GeoclientError::parse(reference, e))?;
    base.join(reference)
        .map_err(|e| GeoclientError::parse(reference, e))
}

/// Reject references a strict URL reference parser would refuse.
pub fn validate_reference(reference: &str) -> Result<(), UrlError> {
    if reference.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(UrlError::ControlCharacter);
    }

    let (rest, fragment) = match reference.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (reference, None),
    };
    if let Some(fragment) = fragment {
        check_escapes(fragment)?;
    }

    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    if has_scheme(rest)? {
        return check_escapes(path);
    }

    if !path.starts_with('/') {
        let first_segment = path.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(UrlError::ColonInFirstSegment);
        }
    }
    check_escapes(path)
}

/// Whether `s` starts with `scheme ":"`. A leading `:` is an error.
fn has_scheme(s: &str) -> Result<bool, UrlError> {
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
            b':' if i == 0 => return Err(UrlError::MissingScheme),
            b':' => return Ok(true),
            _ => return Ok(false),
        }
    }
    Ok(false)
}

/// Every `%` must be followed by two hex digits.
fn check_escapes(s: &str) -> Result<(), UrlError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                let escape = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                return Err(UrlError::InvalidEscape(escape));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
