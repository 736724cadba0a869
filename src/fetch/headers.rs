//! Two-tier header application for outbound API requests.
//!
//! Well-known headers go through dedicated handling: `Authorization`
//! values of the shape `"<scheme> <credentials>"` are split and rebuilt
//! as a structured value (malformed values pass through verbatim),
//! `Accept` values are comma-split into one entry per media type, and
//! `User-Agent`/`Host` land on their canonical header names. Everything
//! else is applied best-effort: an entry that cannot be represented as a
//! request header is carried to the second tier and reported back instead
//! of failing the whole request.

use reqwest::header::{ACCEPT, AUTHORIZATION, HOST, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::warn;

/// Outcome of applying a caller-supplied header list.
#[derive(Debug, Default)]
pub struct AppliedHeaders {
    /// Headers that were representable on the request.
    pub headers: HeaderMap,
    /// Second-tier entries: name/value pairs the request map rejected.
    pub overflow: Vec<(String, String)>,
}

/// Splits an authorization value into `(scheme, credentials)`.
///
/// Returns `None` for malformed values: blank, no space separator, or a
/// separator at the start or end. Credentials are trimmed; the scheme is
/// taken verbatim.
#[must_use]
pub fn split_auth_value(value: &str) -> Option<(&str, &str)> {
    if value.trim().is_empty() {
        return None;
    }

    let index = value.find(' ')?;
    if index == 0 || index >= value.len() - 1 {
        return None;
    }

    Some((&value[..index], value[index + 1..].trim()))
}

/// Applies caller-supplied headers using the two-tier strategy.
///
/// Never fails: entries the request map cannot hold are collected into
/// [`AppliedHeaders::overflow`] and logged, and the request proceeds with
/// whatever was representable.
#[must_use]
pub fn apply_headers(pairs: &[(String, String)]) -> AppliedHeaders {
    let mut applied = AppliedHeaders::default();

    for (key, value) in pairs {
        if key.eq_ignore_ascii_case("authorization") {
            apply_authorization(&mut applied, key, value);
        } else if key.eq_ignore_ascii_case("accept") {
            apply_accept(&mut applied, key, value);
        } else if key.eq_ignore_ascii_case("user-agent") {
            apply_known(&mut applied, USER_AGENT, key, value);
        } else if key.eq_ignore_ascii_case("host") {
            apply_known(&mut applied, HOST, key, value);
        } else {
            apply_generic(&mut applied, key, value);
        }
    }

    applied
}

fn apply_authorization(applied: &mut AppliedHeaders, key: &str, value: &str) {
    let rebuilt = split_auth_value(value).map(|(scheme, credentials)| format!("{scheme} {credentials}"));
    let candidate = rebuilt.as_deref().unwrap_or(value);

    match HeaderValue::from_str(candidate) {
        Ok(header_value) => {
            applied.headers.insert(AUTHORIZATION, header_value);
        }
        Err(_) => overflow(applied, key, value),
    }
}

fn apply_accept(applied: &mut AppliedHeaders, key: &str, value: &str) {
    // A value of only separators contributes nothing.
    for part in value.split(',') {
        let media_type = part.trim();
        if media_type.is_empty() {
            continue;
        }
        match HeaderValue::from_str(media_type) {
            Ok(header_value) => {
                applied.headers.append(ACCEPT, header_value);
            }
            Err(_) => overflow(applied, key, media_type),
        }
    }
}

fn apply_known(applied: &mut AppliedHeaders, name: HeaderName, key: &str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(header_value) => {
            applied.headers.insert(name, header_value);
        }
        Err(_) => overflow(applied, key, value),
    }
}

fn apply_generic(applied: &mut AppliedHeaders, key: &str, value: &str) {
    match (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(header_value)) => {
            applied.headers.insert(name, header_value);
        }
        _ => overflow(applied, key, value),
    }
}

fn overflow(applied: &mut AppliedHeaders, key: &str, value: &str) {
    warn!(header = key, "header not representable on request; carried to overflow tier");
    applied.overflow.push((key.to_string(), value.to_string()));
}
