//! Multipart request parts.
//!
//! A [`RequestPart`] is one named section of a multipart body. Its payload is
//! either bytes already in memory or a one-shot stream (usually an open file
//! handle from the bundle resolver). Streams are consumed exactly once, when
//! the part is copied into a body buffer, and are closed when the part drops.

use std::fmt;
use std::io::{self, Read};

/// MIME type of the article document and metadata parts.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Reserved part name for publishing metadata.
pub const METADATA_PART: &str = "metadata";

/// Reserved part name (and file name) for the article document.
pub const ARTICLE_PART: &str = "article.json";

/// The bytes behind a part.
pub enum Payload {
    Bytes(Vec<u8>),
    Stream(Box<dyn Read + Send>),
}

impl Payload {
    /// Append the full payload to `buf`, consuming any stream.
    pub fn copy_into(self, buf: &mut Vec<u8>) -> io::Result<u64> {
        match self {
            Self::Bytes(bytes) => {
                buf.extend_from_slice(&bytes);
                Ok(bytes.len() as u64)
            }
            Self::Stream(mut reader) => io::copy(&mut reader, buf),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// What a part carries. Only the reserved constructors set
/// [`PartRole::Metadata`] and [`PartRole::Article`]; an asset keeps the
/// `Asset` role whatever its name is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartRole {
    Metadata,
    Article,
    Asset,
}

/// One section of a multipart/form-data body.
#[derive(Debug)]
pub struct RequestPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub payload: Payload,
    role: PartRole,
}

impl RequestPart {
    /// The `metadata` part: JSON, no file name.
    pub fn metadata(json: Vec<u8>) -> Self {
        Self {
            name: METADATA_PART.into(),
            file_name: None,
            content_type: CONTENT_TYPE_JSON.into(),
            payload: Payload::Bytes(json),
            role: PartRole::Metadata,
        }
    }

    /// The `article.json` part carrying the article document.
    pub fn article(document: Vec<u8>) -> Self {
        Self {
            name: ARTICLE_PART.into(),
            file_name: Some(ARTICLE_PART.into()),
            content_type: CONTENT_TYPE_JSON.into(),
            payload: Payload::Bytes(document),
            role: PartRole::Article,
        }
    }

    /// A file-like asset part.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: content_type.into(),
            payload,
            role: PartRole::Asset,
        }
    }

    pub fn role(&self) -> PartRole {
        self.role
    }
}
