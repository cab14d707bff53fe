//! anews CLI: the main entry point.
//!
//! Commands:
//! - `read`: read an article, the channel, or a section
//! - `list`: list the channel's sections
//! - `search`: page through the channel's articles
//! - `create`: upload a new article bundle
//! - `update`: replace an article's bundle or metadata
//! - `promote`: set a section's promoted articles
//! - `delete`: delete an article
//! - `notify`: send a push notification for an article

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{GlobalArgs, MetadataArgs, SearchArgs};

#[derive(Parser)]
#[command(
    name = "anews",
    about = "anews: command-line client for the News publishing API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a channel, section or article
    Read {
        #[command(subcommand)]
        target: ReadTarget,
    },

    /// List the channel's sections
    List,

    /// List articles in the channel
    Search(SearchArgs),

    /// Create an article from a bundle
    Create {
        /// Bundle directory containing article.json, or the document itself
        bundle_path: PathBuf,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Update an article
    Update {
        /// Revision token from the latest read of the article
        revision: String,

        /// ID of the article to update
        article_id: String,

        /// Re-upload the document and assets from this bundle
        #[arg(long, value_name = "PATH")]
        bundle_path: Option<PathBuf>,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Promote articles in a section
    Promote {
        /// Section to promote articles in
        section_id: String,

        /// Articles to promote; none clears the section's promotions
        article_ids: Vec<String>,
    },

    /// Delete an article
    Delete {
        /// ID of the article to delete
        article_id: String,
    },

    /// Send a push notification for an article
    Notify {
        /// ID of the article to notify about
        article_id: String,

        /// Notification text
        alert_body: String,

        /// Country to notify (EU, GB, US); repeatable
        #[arg(long = "country", value_name = "COUNTRY")]
        countries: Vec<anews_core::Country>,

        /// Send even if the alert is longer than recommended
        #[arg(long)]
        ignore_warnings: bool,
    },
}

#[derive(Subcommand)]
enum ReadTarget {
    /// Read an article
    Article {
        /// ID of the article to read
        id: String,
    },
    /// Read the channel
    Channel,
    /// Read a section
    Section {
        /// ID of the section to read
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::build_client(&cli.global)?;

    match cli.command {
        Commands::Read { target } => match target {
            ReadTarget::Article { id } => commands::read::article(&client, &id).await?,
            ReadTarget::Channel => commands::read::channel(&client).await?,
            ReadTarget::Section { id } => commands::read::section(&client, &id).await?,
        },
        Commands::List => commands::read::list(&client).await?,
        Commands::Search(args) => commands::search::run(&client, args).await?,
        Commands::Create {
            bundle_path,
            metadata,
        } => commands::article::create(&client, &bundle_path, metadata).await?,
        Commands::Update {
            revision,
            article_id,
            bundle_path,
            metadata,
        } => {
            commands::article::update(&client, &revision, &article_id, bundle_path, metadata)
                .await?
        }
        Commands::Promote {
            section_id,
            article_ids,
        } => commands::article::promote(&client, &section_id, &article_ids).await?,
        Commands::Delete { article_id } => commands::article::delete(&client, &article_id).await?,
        Commands::Notify {
            article_id,
            alert_body,
            countries,
            ignore_warnings,
        } => {
            commands::notify::run(&client, &article_id, &alert_body, &countries, ignore_warnings)
                .await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anews_core::{Country, MaturityRating};
    use anews_client::SortDirection;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("anews").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn read_subcommands() {
        assert!(matches!(
            parse(&["read", "article", "a1"]).command,
            Commands::Read { target: ReadTarget::Article { ref id } } if id == "a1"
        ));
        assert!(matches!(
            parse(&["read", "channel"]).command,
            Commands::Read { target: ReadTarget::Channel }
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["list", "--channel-id", "chan-1", "--base-url", "http://localhost", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.global.channel_id.as_deref(), Some("chan-1"));
        assert_eq!(cli.global.base_url.as_deref(), Some("http://localhost"));
    }

    #[test]
    fn create_with_metadata_flags() {
        let cli = parse(&[
            "create",
            "./bundle",
            "--section",
            "https://x/sections/s1",
            "--section",
            "https://x/sections/s2",
            "--maturity-rating",
            "KIDS",
            "--preview",
        ]);
        let Commands::Create {
            bundle_path,
            metadata,
        } = cli.command
        else {
            panic!("expected create");
        };
        assert_eq!(bundle_path, PathBuf::from("./bundle"));
        let metadata = metadata.into_metadata();
        assert_eq!(metadata.links.sections.len(), 2);
        assert_eq!(metadata.maturity_rating, Some(MaturityRating::Kids));
        assert!(metadata.is_preview);
        assert!(!metadata.is_sponsored);
    }

    #[test]
    fn invalid_maturity_rating_is_rejected() {
        let result = Cli::try_parse_from(["anews", "create", "b", "--maturity-rating", "ADULT"]);
        assert!(result.is_err());
    }

    #[test]
    fn update_positionals_in_order() {
        let cli = parse(&["update", "rev-1", "a1", "--bundle-path", "b", "--hidden"]);
        let Commands::Update {
            revision,
            article_id,
            bundle_path,
            metadata,
        } = cli.command
        else {
            panic!("expected update");
        };
        assert_eq!(revision, "rev-1");
        assert_eq!(article_id, "a1");
        assert_eq!(bundle_path, Some(PathBuf::from("b")));
        assert!(metadata.into_metadata().is_hidden);
    }

    #[test]
    fn promote_without_ids() {
        let cli = parse(&["promote", "s1"]);
        assert!(matches!(
            cli.command,
            Commands::Promote { ref article_ids, .. } if article_ids.is_empty()
        ));
    }

    #[test]
    fn notify_countries() {
        let cli = parse(&["notify", "a1", "Hello", "--country", "US", "--country", "GB"]);
        let Commands::Notify {
            countries,
            ignore_warnings,
            ..
        } = cli.command
        else {
            panic!("expected notify");
        };
        assert_eq!(countries, vec![Country::Us, Country::Gb]);
        assert!(!ignore_warnings);
        assert!(Cli::try_parse_from(["anews", "notify", "a1", "x", "--country", "FR"]).is_err());
    }

    #[test]
    fn search_flags() {
        let cli = parse(&[
            "search",
            "--sort-dir",
            "ASC",
            "--page-size",
            "5",
            "--from-date",
            "2017-10-01",
        ]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let options = args.into_options();
        assert_eq!(options.sort_dir, SortDirection::Asc);
        assert_eq!(options.page_size, Some(5));
        assert_eq!(
            options.from_date.map(|d| d.to_rfc3339()),
            Some("2017-10-01T00:00:00+00:00".to_string())
        );
        assert!(Cli::try_parse_from(["anews", "search", "--from-date", "10/01/2017"]).is_err());
    }
}
