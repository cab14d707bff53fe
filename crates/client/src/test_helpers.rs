//! Shared test helpers for client tests.

use anews_core::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::sync::Mutex;

/// A transport that replays scripted responses in order and records every
/// request it receives.
///
/// Panics if more calls are made than responses provided.
pub struct ScriptedTransport {
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// A transport whose first call fails.
    pub fn failing(error: TransportError) -> Self {
        Self::with_results(vec![Err(error)])
    }

    pub fn with_results(results: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(results),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let index = requests.len();
        if index >= responses.len() {
            panic!(
                "ScriptedTransport: no more responses (call #{}, have {})",
                index,
                responses.len()
            );
        }
        requests.push(request);
        responses[index].clone()
    }
}

/// A response with a JSON (or empty) body.
pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(status, body.as_bytes().to_vec())
}
