//! The canonical HMAC-SHA256 signature.
//!
//! Canonical input is `method ‖ url ‖ timestamp ‖ content_type` followed by the
//! raw body bytes, all fed into one running MAC. No separators are inserted
//! and the body is never converted to text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Format a timestamp the way it is hashed and sent: RFC 3339, UTC, whole
/// seconds, `Z` suffix (e.g. `2017-10-12T19:28:35Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn canonical_mac(
    method: &str,
    url: &str,
    timestamp: &str,
    content_type: &str,
    secret: &[u8],
) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(method.as_bytes());
    mac.update(url.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(content_type.as_bytes());
    mac
}

/// Compute the base64 signature for a request whose body is in memory.
pub fn sign(
    method: &str,
    url: &str,
    timestamp: &str,
    content_type: &str,
    body: &[u8],
    secret: &[u8],
) -> String {
    let mut mac = canonical_mac(method, url, timestamp, content_type, secret);
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Constant-time check of a base64 signature against the canonical input.
pub fn verify(
    signature: &str,
    method: &str,
    url: &str,
    timestamp: &str,
    content_type: &str,
    body: &[u8],
    secret: &[u8],
) -> bool {
    let Ok(provided) = STANDARD.decode(signature) else {
        return false;
    };
    let mut mac = canonical_mac(method, url, timestamp, content_type, secret);
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}
