//! `anews create`, `update`, `promote` and `delete`: article writes.

use anews_bundle::load_bundle;
use anews_client::NewsClient;
use std::path::{Path, PathBuf};

use super::{MetadataArgs, print_json};

pub async fn create(
    client: &NewsClient,
    bundle_path: &Path,
    metadata: MetadataArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = load_bundle(bundle_path)?;
    let metadata = metadata.into_metadata();
    let metadata = (metadata != Default::default()).then_some(metadata);
    print_json(&client.create_article(&bundle, metadata.as_ref()).await?)
}

/// With a bundle the document is re-uploaded; otherwise only metadata changes.
pub async fn update(
    client: &NewsClient,
    revision: &str,
    article_id: &str,
    bundle_path: Option<PathBuf>,
    metadata: MetadataArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = metadata.into_metadata();
    let record = match bundle_path {
        Some(path) => {
            let bundle = load_bundle(&path)?;
            client
                .update_article(article_id, revision, &bundle, metadata)
                .await?
        }
        None => {
            client
                .update_article_metadata(article_id, revision, metadata)
                .await?
        }
    };
    print_json(&record)
}

pub async fn promote(
    client: &NewsClient,
    section_id: &str,
    article_ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&client.promote_articles(section_id, article_ids).await?)
}

pub async fn delete(client: &NewsClient, article_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    client.delete_article(article_id).await?;
    println!("Deleted article {article_id}");
    Ok(())
}
