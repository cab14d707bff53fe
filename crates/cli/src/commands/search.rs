//! `anews search`: page through the channel's articles.

use anews_client::{NewsClient, SearchOptions, SortDirection};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use super::print_json;

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// ASC or DESC by creation date
    #[arg(long, value_name = "DIR", default_value = "DESC")]
    pub sort_dir: SortDirection,

    /// Results per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Token from a previous page's `next` link
    #[arg(long, value_name = "TOKEN")]
    pub page_token: Option<String>,

    /// Start paging from this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from_date: Option<DateTime<Utc>>,

    /// Stop paging at this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub to_date: Option<DateTime<Utc>>,
}

impl SearchArgs {
    pub fn into_options(self) -> SearchOptions {
        SearchOptions {
            sort_dir: self.sort_dir,
            from_date: self.from_date,
            to_date: self.to_date,
            page_size: self.page_size,
            page_token: self.page_token,
        }
    }
}

/// Midnight UTC on the given calendar date.
fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{s}': {e}"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("invalid date '{s}'"))
}

pub async fn run(client: &NewsClient, args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.into_options();
    tracing::debug!(?options, "Searching articles");
    print_json(&client.search_articles(&options).await?)
}
