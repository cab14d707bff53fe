//! The Transport trait, an abstraction over the HTTP stack.
//!
//! The client builds a fully signed [`HttpRequest`] and hands it to a
//! transport, which performs exactly one exchange. Implementations: reqwest
//! in production, scripted fakes in tests.

use async_trait::async_trait;
use std::fmt;

use crate::error::TransportError;

/// HTTP methods used by the publishing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed, fully materialized request.
///
/// `body` holds the exact bytes that were hashed into the Authorization
/// header; transports must send them unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, for diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The core Transport trait.
///
/// One call, one outbound exchange. No retries: a failure is surfaced
/// immediately and any retry must rebuild and re-sign the request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// A human-readable name for this transport (e.g., "reqwest").
    fn name(&self) -> &str;

    /// Send a request and wait for the full response.
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        fn name(&self) -> &str {
            "echo"
        }

        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, request.body))
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: Method::Get,
            url: "https://x/articles/a1".into(),
            headers: vec![("Authorization".into(), "HHMAC; key=k".into())],
            body: vec![],
        };
        assert_eq!(req.header("authorization"), Some("HHMAC; key=k"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[tokio::test]
    async fn transport_is_object_safe() {
        let transport: Box<dyn Transport> = Box::new(EchoTransport);
        let resp = transport
            .execute(HttpRequest {
                method: Method::Post,
                url: "https://x".into(),
                headers: vec![],
                body: b"ping".to_vec(),
            })
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.text(), "ping");
    }
}
