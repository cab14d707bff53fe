//! Diagnostic events emitted by the client.
//!
//! The client never writes to process-wide loggers directly; it reports what
//! it does to a [`DiagnosticSink`] handed to it at construction. The binary
//! plugs in [`TracingSink`], tests plug in [`MemorySink`] and inspect it.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Everything the client reports while running an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Bundle assets were resolved for a write.
    BundleResolved { operation: String, parts: usize },

    /// A signed request is about to be sent.
    RequestSent {
        operation: String,
        method: String,
        url: String,
        body_len: usize,
    },

    /// The transport returned a response.
    ResponseReceived { operation: String, status: u16 },

    /// The operation failed; `message` is the error text.
    OperationFailed { operation: String, message: String },

    /// A soft check was overridden by the caller.
    Warning { operation: String, message: String },
}

/// Receives diagnostics from the client.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::BundleResolved { operation, parts } => {
                tracing::debug!(%operation, parts, "Bundle resolved");
            }
            Diagnostic::RequestSent {
                operation,
                method,
                url,
                body_len,
            } => {
                tracing::debug!(%operation, %method, %url, body_len, "Sending request");
            }
            Diagnostic::ResponseReceived { operation, status } => {
                tracing::debug!(%operation, status, "Response received");
            }
            Diagnostic::OperationFailed { operation, message } => {
                tracing::warn!(%operation, error = %message, "Operation failed");
            }
            Diagnostic::Warning { operation, message } => {
                tracing::warn!(%operation, "{message}");
            }
        }
    }
}

/// Stores diagnostics in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Messages of all `Warning` diagnostics.
    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::Warning { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}
