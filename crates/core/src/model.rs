//! Request-side domain model: credentials, endpoint, and article metadata.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result, ValidationError};

/// API credentials. The secret is decoded once at construction.
#[derive(Clone)]
pub struct Credentials {
    key_id: String,
    secret: Vec<u8>,
}

impl Credentials {
    /// Build credentials from a key id and a base64-encoded shared secret.
    ///
    /// An empty key, an empty secret, or a secret that is not valid base64
    /// is a configuration error.
    pub fn new(key_id: impl Into<String>, secret_base64: &str) -> Result<Self> {
        let key_id = key_id.into();
        if key_id.trim().is_empty() {
            return Err(Error::config("API key id is empty"));
        }
        let secret_base64 = secret_base64.trim();
        if secret_base64.is_empty() {
            return Err(Error::config("API secret is empty"));
        }
        let secret = base64::engine::general_purpose::STANDARD
            .decode(secret_base64)
            .map_err(|e| Error::config(format!("API secret is not valid base64: {e}")))?;
        Ok(Self { key_id, secret })
    }

    /// Build credentials from an already-decoded secret.
    pub fn from_raw(key_id: impl Into<String>, secret: Vec<u8>) -> Self {
        Self {
            key_id: key_id.into(),
            secret,
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Where requests go: the API base URL and the channel being published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    channel_id: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            channel_id: channel_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

/// Closed set of maturity ratings accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaturityRating {
    Kids,
    Mature,
    General,
}

impl MaturityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kids => "KIDS",
            Self::Mature => "MATURE",
            Self::General => "GENERAL",
        }
    }
}

impl FromStr for MaturityRating {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "KIDS" => Ok(Self::Kids),
            "MATURE" => Ok(Self::Mature),
            "GENERAL" => Ok(Self::General),
            other => Err(ValidationError::InvalidMaturityRating(other.to_string())),
        }
    }
}

impl fmt::Display for MaturityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Countries a push notification can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "GB")]
    Gb,
    #[serde(rename = "US")]
    Us,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::Gb => "GB",
            Self::Us => "US",
        }
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "EU" => Ok(Self::Eu),
            "GB" => Ok(Self::Gb),
            "US" => Ok(Self::Us),
            other => Err(ValidationError::InvalidCountry(other.to_string())),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section links carried by article metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataLinks {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

impl MetadataLinks {
    fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Publishing flags for an article.
///
/// `false` flags and empty fields are omitted on the wire. `revision` is
/// only meaningful for updates and must echo the latest revision returned
/// by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "MetadataLinks::is_empty")]
    pub links: MetadataLinks,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_sponsored: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_preview: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_rating: Option<MaturityRating>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_candidate_to_be_featured: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_developing_story: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize)]
struct DataEnvelope<'a, T: Serialize> {
    data: &'a T,
}

impl Metadata {
    /// Return a copy carrying the given revision token.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Serialize as the `{"data": {...}}` document the service expects.
    pub fn to_request_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&DataEnvelope { data: self })?)
    }
}

/// Body of a promote request: `{"data": {"promotedArticles": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotedArticles {
    #[serde(default)]
    pub promoted_articles: Vec<String>,
}

impl PromotedArticles {
    pub fn to_request_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&DataEnvelope { data: self })?)
    }
}

/// Body of a notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub alert_body: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<Country>,
}

impl NotificationData {
    pub fn to_request_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&DataEnvelope { data: self })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_decode_secret() {
        let creds = Credentials::new("key-1", "c2VjcmV0").unwrap();
        assert_eq!(creds.key_id(), "key-1");
        assert_eq!(creds.secret(), b"secret");
    }

    #[test]
    fn credentials_reject_bad_base64() {
        let err = Credentials::new("key-1", "not base64!!").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn credentials_reject_empty_values() {
        assert!(Credentials::new("", "c2VjcmV0").is_err());
        assert!(Credentials::new("key", "  ").is_err());
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new("key-1", "c2VjcmV0").unwrap();
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("c2VjcmV0"));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let ep = Endpoint::new("https://news-api.example.com/", "chan");
        assert_eq!(ep.base_url(), "https://news-api.example.com");
        assert_eq!(ep.channel_id(), "chan");
    }

    #[test]
    fn maturity_rating_is_closed() {
        assert_eq!("KIDS".parse::<MaturityRating>().unwrap(), MaturityRating::Kids);
        assert_eq!("GENERAL".parse::<MaturityRating>().unwrap(), MaturityRating::General);
        assert!(matches!(
            "ADULT".parse::<MaturityRating>(),
            Err(ValidationError::InvalidMaturityRating(_))
        ));
        assert!("kids".parse::<MaturityRating>().is_err());
        assert!(serde_json::from_str::<MaturityRating>("\"TEEN\"").is_err());
    }

    #[test]
    fn country_parsing() {
        assert_eq!("GB".parse::<Country>().unwrap(), Country::Gb);
        assert!("FR".parse::<Country>().is_err());
        assert_eq!(serde_json::to_string(&Country::Us).unwrap(), "\"US\"");
    }

    #[test]
    fn metadata_omits_empty_fields() {
        let json = String::from_utf8(Metadata::default().to_request_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"data":{}}"#);
    }

    #[test]
    fn metadata_wire_format() {
        let meta = Metadata {
            links: MetadataLinks {
                sections: vec!["https://news-api.example.com/sections/s1".into()],
            },
            is_sponsored: true,
            maturity_rating: Some(MaturityRating::Mature),
            ..Metadata::default()
        }
        .with_revision("AAAAAAAAAAAAAAAAAAAAAA==");

        let value: serde_json::Value =
            serde_json::from_slice(&meta.to_request_json().unwrap()).unwrap();
        let data = &value["data"];
        assert_eq!(data["isSponsored"], true);
        assert_eq!(data["maturityRating"], "MATURE");
        assert_eq!(data["revision"], "AAAAAAAAAAAAAAAAAAAAAA==");
        assert_eq!(
            data["links"]["sections"][0],
            "https://news-api.example.com/sections/s1"
        );
        assert!(data.get("isHidden").is_none());
    }

    #[test]
    fn promoted_articles_keeps_empty_list() {
        let json =
            String::from_utf8(PromotedArticles::default().to_request_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"data":{"promotedArticles":[]}}"#);
    }

    #[test]
    fn notification_wire_format() {
        let data = NotificationData {
            alert_body: "Breaking".into(),
            countries: vec![Country::Us, Country::Gb],
        };
        let json = String::from_utf8(data.to_request_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"data":{"alertBody":"Breaking","countries":["US","GB"]}}"#
        );
    }
}
