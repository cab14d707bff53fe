//! Response entities decoded from the publishing API.
//!
//! Every response wraps its payload in a `data` field. Decoding is lenient:
//! missing fields fall back to defaults so that new server-side fields or
//! partial payloads never fail an otherwise successful call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::PromotedArticles;

/// Hyperlinks attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_section: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

/// An article as stored by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub share_url: String,
    pub links: Links,

    /// The article document echoed back (absent in search results).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,

    /// Opaque revision token; changes on every successful write.
    pub revision: String,

    /// Lifecycle state, e.g. `PROCESSING`, `LIVE`, `TAKEN_DOWN`.
    pub state: String,

    pub title: String,
    pub accessory_text: String,
    pub maturity_rating: String,
    pub warnings: Vec<serde_json::Value>,
    pub is_candidate_to_be_featured: bool,
    pub is_sponsored: bool,
    pub is_preview: bool,
    pub is_developing_story: bool,
    pub is_hidden: bool,
}

/// Response to read/create/update article calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    pub data: Article,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl ArticleRecord {
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn revision(&self) -> &str {
        &self.data.revision
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Channel {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub share_url: String,
    pub links: Links,
    pub name: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRecord {
    pub data: Channel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub share_url: String,
    pub links: Links,
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRecord {
    pub data: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionList {
    pub data: Vec<Section>,
}

/// One page of search results; `links.next` points at the following page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchArticlesResponse {
    pub data: Vec<Article>,
    pub links: Links,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotedArticlesResponse {
    pub data: PromotedArticles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationLinks {
    pub article: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub links: NotificationLinks,
    pub alert_body: String,
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quota {
    pub sent: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotas {
    pub daily: Quota,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationMeta {
    pub quotas: Quotas,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationResponse {
    pub data: Notification,
    pub meta: NotificationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_article_record() {
        let record: ArticleRecord = serde_json::from_str(
            r#"{
                "data": {
                    "createdAt": "2017-10-12T19:28:35Z",
                    "modifiedAt": "2017-10-12T19:28:36Z",
                    "id": "a1b2c3",
                    "type": "article",
                    "shareUrl": "https://apple.news/a1b2c3",
                    "links": {
                        "channel": "https://news-api.apple.com/channels/ch1",
                        "self": "https://news-api.apple.com/articles/a1b2c3",
                        "sections": ["https://news-api.apple.com/sections/s1"]
                    },
                    "document": {"title": "Hello"},
                    "revision": "AAAAAAAAAAD//////////w==",
                    "state": "PROCESSING",
                    "title": "Hello",
                    "maturityRating": "GENERAL",
                    "warnings": [],
                    "isSponsored": false,
                    "isHidden": true
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.id(), "a1b2c3");
        assert_eq!(record.revision(), "AAAAAAAAAAD//////////w==");
        assert_eq!(record.data.state, "PROCESSING");
        assert!(record.data.is_hidden);
        assert_eq!(record.data.links.sections.len(), 1);
        assert_eq!(
            record.data.links.self_link.as_deref(),
            Some("https://news-api.apple.com/articles/a1b2c3")
        );
        assert_eq!(record.data.document.unwrap()["title"], "Hello");
        assert!(record.data.created_at.is_some());
    }

    #[test]
    fn parse_search_page_with_next_link() {
        let page: SearchArticlesResponse = serde_json::from_str(
            r#"{
                "data": [{"id": "a1", "title": "One"}, {"id": "a2", "title": "Two"}],
                "links": {"self": "https://x/channels/c/articles", "next": "https://x/channels/c/articles?pageToken=t2"}
            }"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[1].id, "a2");
        assert!(page.links.next.unwrap().contains("pageToken=t2"));
    }

    #[test]
    fn parse_notification_quota() {
        let resp: NotificationResponse = serde_json::from_str(
            r#"{
                "data": {"id": "n1", "type": "notification", "alertBody": "Hi", "countries": ["US"],
                         "links": {"article": "https://x/articles/a1"}},
                "meta": {"quotas": {"daily": {"sent": 3, "limit": 10}}}
            }"#,
        )
        .unwrap();
        assert_eq!(resp.data.alert_body, "Hi");
        assert_eq!(resp.meta.quotas.daily, Quota { sent: 3, limit: 10 });
    }

    #[test]
    fn section_list_defaults_when_empty() {
        let list: SectionList = serde_json::from_str("{}").unwrap();
        assert!(list.data.is_empty());
    }
}
