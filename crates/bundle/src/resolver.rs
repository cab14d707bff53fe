//! Bundle component resolution.
//!
//! An article document refers to its assets with JSON string values of the
//! form `"bundle://<relative-path>"`. The resolver finds every such reference,
//! opens the file it names under the bundle's base directory, and turns it
//! into a typed [`RequestPart`]. Resolution is all-or-nothing: the first
//! missing, unreadable, or unsupported asset fails the whole call.
//!
//! The document bytes are only read, never rewritten.

use anews_core::{Payload, RequestPart, ResolutionError, Result};
use regex_lite::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// URI scheme marking an asset reference inside the document.
pub const BUNDLE_SCHEME: &str = "bundle://";

/// File name of the document inside a bundle directory.
pub const ARTICLE_FILE: &str = "article.json";

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""bundle://((?:[^"\\]|\\/)*)""#).expect("reference pattern is a valid regex")
});

/// Asset kinds the publishing service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    Jpeg,
    Png,
    Gif,
    Html,
    Css,
    JavaScript,
    CacheManifest,
}

impl AssetType {
    /// Look up a file extension, ignoring ASCII case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "html" => Some(Self::Html),
            "css" => Some(Self::Css),
            "js" => Some(Self::JavaScript),
            "manifest" => Some(Self::CacheManifest),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Html => "text/html",
            Self::Css => "text/css",
            Self::JavaScript => "text/javascript",
            Self::CacheManifest => "text/cache-manifest",
        }
    }

    /// Files an HTML component may depend on without referencing them.
    pub fn is_html_companion(&self) -> bool {
        matches!(self, Self::Css | Self::JavaScript | Self::CacheManifest)
    }
}

/// One `bundle://` occurrence found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReference {
    /// The whole reference, e.g. `bundle://img/a.png`.
    pub raw_token: String,
    /// The part after the scheme, e.g. `img/a.png`.
    pub relative_path: String,
}

impl BundleReference {
    fn new(relative_path: &str) -> Self {
        Self {
            raw_token: format!("{BUNDLE_SCHEME}{relative_path}"),
            relative_path: relative_path.to_string(),
        }
    }
}

/// How references are located in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Pattern match over the raw document text.
    ///
    /// The only JSON escape understood inside a reference is `\/`. A path
    /// written with any other escape (such as `\u0020`) is not matched; use
    /// [`ScanMode::Structured`] for such documents.
    #[default]
    Text,
    /// Parse the document and inspect string values only.
    Structured,
}

/// A document together with the directory its assets live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBundle {
    pub document: Vec<u8>,
    pub base_dir: PathBuf,
}

impl ArticleBundle {
    pub fn new(document: impl Into<Vec<u8>>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Resolve this bundle's assets with the default text scan.
    pub fn resolve(&self) -> Result<Vec<RequestPart>> {
        resolve(&self.document, &self.base_dir)
    }

    pub fn resolve_with(&self, mode: ScanMode) -> Result<Vec<RequestPart>> {
        resolve_with(&self.document, &self.base_dir, mode)
    }
}

/// Load a bundle from disk.
///
/// A directory path means `<dir>/article.json` with `<dir>` as the base; a
/// file path is the document itself with its parent directory as the base.
pub fn load_bundle(path: &Path) -> Result<ArticleBundle> {
    let (document_path, base_dir) = if path.is_dir() {
        (path.join(ARTICLE_FILE), path.to_path_buf())
    } else {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        (path.to_path_buf(), parent)
    };

    let document = fs::read(&document_path).map_err(|e| ResolutionError::Document {
        path: document_path.clone(),
        reason: e.to_string(),
    })?;
    debug!(path = %document_path.display(), bytes = document.len(), "Loaded article document");

    Ok(ArticleBundle { document, base_dir })
}

/// Find every reference in the document, in order of first appearance.
///
/// Duplicates are kept: a token that occurs twice is returned twice.
pub fn scan_references(document: &[u8], mode: ScanMode) -> Result<Vec<BundleReference>> {
    match mode {
        ScanMode::Text => {
            let text = String::from_utf8_lossy(document);
            Ok(REFERENCE_PATTERN
                .captures_iter(&text)
                .filter_map(|caps| caps.get(1))
                .map(|m| BundleReference::new(&m.as_str().replace("\\/", "/")))
                .collect())
        }
        ScanMode::Structured => {
            let value: Value = serde_json::from_slice(document).map_err(|e| {
                ResolutionError::MalformedDocument {
                    reason: e.to_string(),
                }
            })?;
            let mut found = Vec::new();
            collect_references(&value, &mut found);
            Ok(found)
        }
    }
}

fn collect_references(value: &Value, found: &mut Vec<BundleReference>) {
    match value {
        Value::String(s) => {
            if let Some(relative) = s.strip_prefix(BUNDLE_SCHEME) {
                found.push(BundleReference::new(relative));
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_references(item, found);
            }
        }
        _ => {}
    }
}

/// Reject references that could escape the bundle directory.
///
/// Returns the path with `.` components dropped, so equal files compare equal.
fn validate_reference(reference: &BundleReference) -> std::result::Result<PathBuf, ResolutionError> {
    let invalid = |reason: &str| ResolutionError::InvalidReference {
        token: reference.raw_token.clone(),
        reason: reason.to_string(),
    };

    let raw = reference.relative_path.as_str();
    if raw.trim().is_empty() {
        return Err(invalid("empty path"));
    }
    if raw.starts_with('/') || raw.starts_with('\\') || Path::new(raw).is_absolute() {
        return Err(invalid("absolute paths are not allowed"));
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path traversal is not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute paths are not allowed"));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(invalid("empty path"));
    }
    Ok(normalized)
}

fn open_asset(path: &Path, token: &str) -> std::result::Result<File, ResolutionError> {
    let missing = |reason: String| ResolutionError::MissingAsset {
        token: token.to_string(),
        path: path.to_path_buf(),
        reason,
    };
    let meta = fs::metadata(path).map_err(|e| missing(e.to_string()))?;
    if !meta.is_file() {
        return Err(missing("not a regular file".into()));
    }
    File::open(path).map_err(|e| missing(e.to_string()))
}

fn asset_part(path: &Path, asset: AssetType, file: File) -> RequestPart {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    RequestPart::file(stem, file_name, asset.mime_type(), Payload::Stream(Box::new(file)))
}

/// Resolve a document's assets using [`ScanMode::Text`].
pub fn resolve(document: &[u8], base_dir: &Path) -> Result<Vec<RequestPart>> {
    resolve_with(document, base_dir, ScanMode::Text)
}

/// Resolve a document's assets into parts, in reference order.
///
/// When any resolved part is HTML, the CSS, JavaScript and cache-manifest
/// files in the base directory and in each referenced HTML file's own
/// directory are appended as well. Each directory is scanned once,
/// non-recursively; files within it are added by name, once each, skipping
/// files already referenced.
pub fn resolve_with(document: &[u8], base_dir: &Path, mode: ScanMode) -> Result<Vec<RequestPart>> {
    let references = scan_references(document, mode)?;
    trace!(count = references.len(), ?mode, "Scanned bundle references");

    let mut parts = Vec::with_capacity(references.len());
    let mut resolved: HashSet<PathBuf> = HashSet::new();
    let mut html_dirs: Vec<PathBuf> = Vec::new();

    for reference in &references {
        let relative = validate_reference(reference)?;
        let path = base_dir.join(&relative);
        let asset = AssetType::from_path(&path).ok_or_else(|| {
            ResolutionError::UnsupportedAssetType {
                path: path.clone(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            }
        })?;
        let file = open_asset(&path, &reference.raw_token)?;

        if asset == AssetType::Html {
            let dir = path.parent().unwrap_or(base_dir).to_path_buf();
            if html_dirs.is_empty() {
                html_dirs.push(base_dir.to_path_buf());
            }
            if !html_dirs.contains(&dir) {
                html_dirs.push(dir);
            }
        }
        parts.push(asset_part(&path, asset, file));
        resolved.insert(path);
    }

    for dir in &html_dirs {
        for (path, asset) in html_companions(dir)? {
            if resolved.contains(&path) {
                continue;
            }
            let token = path.display().to_string();
            let file = open_asset(&path, &token)?;
            trace!(path = %path.display(), "Adding HTML companion");
            parts.push(asset_part(&path, asset, file));
            resolved.insert(path);
        }
    }

    debug!(
        base_dir = %base_dir.display(),
        references = references.len(),
        parts = parts.len(),
        "Resolved bundle"
    );
    Ok(parts)
}

/// CSS, JavaScript and manifest files directly inside `dir`, sorted by name.
fn html_companions(dir: &Path) -> Result<Vec<(PathBuf, AssetType)>> {
    let scan_error = |e: std::io::Error| ResolutionError::DirectoryScan {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        if !entry.file_type().map_err(scan_error)?.is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(asset) = AssetType::from_path(&path)
            && asset.is_html_companion()
        {
            found.push((path, asset));
        }
    }
    found.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    Ok(found)
}
