use crate::{BodySnippetConfig, Credentials};
use http::HeaderMap;
use std::time::{Duration, SystemTime};

use super::redact::{redact_text, truncate_utf8};

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in ["x-request-id", "x-correlation-id", "x-amzn-requestid"] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn extract_message(body: &[u8]) -> Option<Box<str>> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return None;
    };

    for key in ["message", "error", "error_message"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            let msg = msg.trim();
            if !msg.is_empty() {
                return Some(msg.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    credentials: &Credentials,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    Some(redact_text(snippet, credentials).into_boxed_str())
}

/// `Retry-After` from a 429 response, surfaced on `Error::RateLimited`.
/// The SDK itself never replays the request.
pub(crate) fn parse_retry_after(headers: &HeaderMap, now: SystemTime) -> Option<Duration> {
    let value = headers.get(http::header::RETRY_AFTER)?;
    let text = value.to_str().ok()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(secs) = text.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = httpdate::parse_http_date(text).ok()?;
    let delay = at.duration_since(now).unwrap_or(Duration::ZERO);
    Some(delay)
}
