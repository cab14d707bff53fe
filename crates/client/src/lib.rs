//! Publishing API client for anews.
//!
//! [`NewsClient`] exposes one async method per resource action and talks to
//! the service through an injected [`anews_core::Transport`]. The production
//! transport is [`ReqwestTransport`].

pub mod client;
pub mod notification;
pub mod search;
pub mod transport;

#[cfg(test)]
mod test_helpers;

pub use client::NewsClient;
pub use notification::{ALERT_MAX_CHARS, ALERT_RECOMMENDED_CHARS, validate_alert_body};
pub use search::{SearchOptions, SortDirection};
pub use transport::ReqwestTransport;
