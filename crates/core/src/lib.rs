//! # anews core
//!
//! Domain types, traits, and error definitions for the anews publishing client.
//! This crate has **no HTTP or filesystem dependencies**: it defines the model
//! that the signer, bundle, and client crates implement against.
//!
//! Seams are traits defined here so that implementations can be swapped:
//! - [`Transport`]: the HTTP exchange (reqwest, or a scripted fake in tests)
//! - [`DiagnosticSink`]: where the client reports what it does

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod part;
pub mod record;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{Error, ResolutionError, Result, TransportError, ValidationError};
pub use model::{
    Country, Credentials, Endpoint, MaturityRating, Metadata, MetadataLinks, NotificationData,
    PromotedArticles,
};
pub use part::{PartRole, Payload, RequestPart};
pub use record::{
    Article, ArticleRecord, ChannelRecord, Links, NotificationResponse, PromotedArticlesResponse,
    SearchArticlesResponse, SectionList, SectionRecord,
};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
