//! Article search options and query encoding.

use anews_core::{Error, Result, ValidationError};
use anews_signer::format_timestamp;
use chrono::{DateTime, Utc};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Result ordering by creation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(ValidationError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters and paging for `SearchArticles`. Unset fields are left out of
/// the query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub sort_dir: SortDirection,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

impl SearchOptions {
    /// Query parameters in key order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(from) = self.from_date {
            pairs.push(("fromDate", format_timestamp(from)));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize", size.to_string()));
        }
        if let Some(token) = self.page_token.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("pageToken", token.to_string()));
        }
        pairs.push(("sortDir", self.sort_dir.as_str().to_string()));
        if let Some(to) = self.to_date {
            pairs.push(("toDate", format_timestamp(to)));
        }
        pairs
    }

    /// Append the encoded query to `base`. The result is what gets signed.
    pub fn apply_to(&self, base: &str) -> Result<String> {
        let mut url =
            Url::parse(base).map_err(|e| Error::config(format!("Invalid URL '{base}': {e}")))?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url.into())
    }
}
