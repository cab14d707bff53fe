//! `anews notify`: send a push notification.

use anews_client::NewsClient;
use anews_core::Country;

use super::print_json;

pub async fn run(
    client: &NewsClient,
    article_id: &str,
    alert_body: &str,
    countries: &[Country],
    ignore_warnings: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .send_notification(article_id, alert_body, countries, ignore_warnings)
        .await?;
    let daily = &response.meta.quotas.daily;
    tracing::info!(sent = daily.sent, limit = daily.limit, "Notification sent");
    print_json(&response)
}
