//! Request signing for the publishing API.
//!
//! Every request carries an `Authorization` header of the form
//! `HHMAC; key=<keyId>; signature=<base64>; date=<RFC3339>`, where the
//! signature is an HMAC-SHA256 over the canonical request: method, full URL,
//! timestamp, content type, then the exact body bytes.
//!
//! Provides:
//! - **signature**: the pure signing function over canonical inputs
//! - **header**: formatting and parsing of the header value
//! - **signer**: a credential-holding [`Signer`] that captures the timestamp once

pub mod header;
pub mod signature;
pub mod signer;

pub use header::{AuthorizationHeader, HeaderParseError};
pub use signature::{format_timestamp, sign};
pub use signer::Signer;
