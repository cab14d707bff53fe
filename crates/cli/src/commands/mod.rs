//! Subcommand implementations and the arguments they share.

pub mod article;
pub mod notify;
pub mod read;
pub mod search;

pub use search::SearchArgs;

use anews_client::{NewsClient, ReqwestTransport};
use anews_config::{AppConfig, Overrides};
use anews_core::{MaturityRating, Metadata, MetadataLinks};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Connection settings that override the config file and environment.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (default: ~/.anews/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API key id
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base64-encoded API secret
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Channel to operate on
    #[arg(long, global = true)]
    pub channel_id: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl GlobalArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            channel_id: self.channel_id.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Publishing flags shared by `create` and `update`.
#[derive(Args, Debug, Default)]
pub struct MetadataArgs {
    /// Section URL the article should appear in; repeatable
    #[arg(long = "section", value_name = "SECTION_URL")]
    pub sections: Vec<String>,

    /// Mark the article as sponsored
    #[arg(long)]
    pub sponsored: bool,

    /// Publish in preview mode
    #[arg(long)]
    pub preview: bool,

    /// Text shown below the excerpt in channel view
    #[arg(long, value_name = "TEXT")]
    pub accessory_text: Option<String>,

    /// KIDS, MATURE or GENERAL
    #[arg(long, value_name = "RATING")]
    pub maturity_rating: Option<MaturityRating>,

    /// Mark the article as a candidate to be featured
    #[arg(long)]
    pub candidate_to_be_featured: bool,

    /// Hide the article
    #[arg(long)]
    pub hidden: bool,

    /// Mark the article as a developing story
    #[arg(long)]
    pub developing_story: bool,
}

impl MetadataArgs {
    pub fn into_metadata(self) -> Metadata {
        Metadata {
            links: MetadataLinks {
                sections: self.sections,
            },
            is_sponsored: self.sponsored,
            is_preview: self.preview,
            accessory_text: self.accessory_text,
            maturity_rating: self.maturity_rating,
            is_candidate_to_be_featured: self.candidate_to_be_featured,
            is_hidden: self.hidden,
            is_developing_story: self.developing_story,
            revision: None,
        }
    }
}

/// Resolve configuration (file, then env, then flags) and build a client.
pub fn build_client(global: &GlobalArgs) -> Result<NewsClient, Box<dyn std::error::Error>> {
    let mut config = match &global.config {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    }
    .map_err(|e| format!("Failed to load config: {e}"))?;
    config.apply_overrides(global.overrides());
    config.validate()?;
    tracing::debug!(?config, "Configuration resolved");

    let transport = ReqwestTransport::new(config.timeout())?;
    Ok(NewsClient::new(
        config.credentials()?,
        config.endpoint()?,
        Arc::new(transport),
    ))
}

/// Print a response as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
