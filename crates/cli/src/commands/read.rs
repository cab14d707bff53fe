//! `anews read` and `anews list`: read-only lookups.

use anews_client::NewsClient;

use super::print_json;

pub async fn article(client: &NewsClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&client.read_article(id).await?)
}

pub async fn channel(client: &NewsClient) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&client.read_channel().await?)
}

pub async fn section(client: &NewsClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&client.read_section(id).await?)
}

pub async fn list(client: &NewsClient) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&client.list_sections().await?)
}
