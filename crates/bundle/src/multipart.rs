//! `multipart/form-data` body assembly.
//!
//! Parts are written in a fixed order: the `metadata` part, then
//! `article.json`, then bundle assets in resolver order. The body is fully
//! materialized before it is signed, so the bytes that are hashed are the
//! bytes that are sent.

use anews_core::{Method, RequestPart, Result};
use anews_signer::{AuthorizationHeader, Signer};
use std::io;
use tracing::debug;
use uuid::Uuid;

/// An encoded body and the boundary it was framed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    /// The `Content-Type` header value for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// A body ready to send: bytes, content type and Authorization header.
#[derive(Debug, Clone)]
pub struct SignedMultipart {
    pub body: Vec<u8>,
    pub content_type: String,
    pub authorization: AuthorizationHeader,
}

/// Escape `\` and `"` for use inside a quoted header parameter.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Sort parts into write order by role. Stable, so assets keep their
/// relative order.
pub fn order_parts(mut parts: Vec<RequestPart>) -> Vec<RequestPart> {
    parts.sort_by_key(RequestPart::role);
    parts
}

struct MultipartWriter {
    boundary: String,
    buf: Vec<u8>,
    written: usize,
}

impl MultipartWriter {
    fn new(boundary: String) -> Self {
        Self {
            boundary,
            buf: Vec::new(),
            written: 0,
        }
    }

    fn write_part(&mut self, part: RequestPart) -> io::Result<()> {
        if self.written == 0 {
            self.buf.extend_from_slice(b"--");
        } else {
            self.buf.extend_from_slice(b"\r\n--");
        }
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\n");

        let mut disposition = format!("form-data; name=\"{}\"", escape_quotes(&part.name));
        if let Some(file_name) = &part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", escape_quotes(file_name)));
        }
        self.buf
            .extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        self.buf
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());

        part.payload.copy_into(&mut self.buf)?;
        self.written += 1;
        Ok(())
    }

    fn finish(mut self) -> MultipartBody {
        self.buf.extend_from_slice(b"\r\n--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");
        MultipartBody {
            boundary: self.boundary,
            bytes: self.buf,
        }
    }
}

/// Encode parts with a fresh random boundary.
pub fn assemble(parts: Vec<RequestPart>) -> io::Result<MultipartBody> {
    assemble_with_boundary(parts, Uuid::new_v4().simple().to_string())
}

/// Encode parts with the given boundary.
///
/// A payload read failure aborts the whole body; nothing partial is returned.
pub fn assemble_with_boundary(
    parts: Vec<RequestPart>,
    boundary: impl Into<String>,
) -> io::Result<MultipartBody> {
    let mut writer = MultipartWriter::new(boundary.into());
    for part in order_parts(parts) {
        writer.write_part(part)?;
    }
    Ok(writer.finish())
}

/// Encode parts and sign the result as a `POST` to `url`.
pub fn assemble_signed(parts: Vec<RequestPart>, url: &str, signer: &Signer) -> Result<SignedMultipart> {
    let count = parts.len();
    let body = assemble(parts)?;
    let content_type = body.content_type();
    let authorization = signer.authorize(Method::Post, url, &content_type, &body.bytes);
    debug!(%url, parts = count, body_len = body.bytes.len(), "Assembled multipart body");
    Ok(SignedMultipart {
        body: body.bytes,
        content_type,
        authorization,
    })
}
