//! Article bundles: from a document on disk to a signed multipart body.
//!
//! - **resolver**: finds `bundle://` references and opens the files they name
//! - **multipart**: frames parts into a `multipart/form-data` body and signs it

pub mod multipart;
pub mod resolver;

pub use multipart::{MultipartBody, SignedMultipart, assemble, assemble_signed, escape_quotes};
pub use resolver::{
    ArticleBundle, AssetType, BundleReference, ScanMode, load_bundle, resolve, resolve_with,
    scan_references,
};
