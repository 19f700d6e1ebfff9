//! Lists active campaigns and the subscribers of the first one, with request logging.
//!
//! Run with tracing enabled:
//! ```sh
//! RUST_LOG=debug,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example campaigns --features tracing
//! ```

use drip_client_sdk::types::request::CampaignsRequest;
use drip_client_sdk::types::{CampaignStatus, SortBy, SortDirection};
use drip_client_sdk::{Client, Config};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct Campaign {
    id: String,
    name: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct Campaigns {
    campaigns: Vec<Campaign>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::new(Config::from_env())?;

    let request = CampaignsRequest::builder()
        .status(CampaignStatus::Active)
        .sort(SortBy::Name)
        .direction(SortDirection::Asc)
        .build();
    let response = client.campaigns(&request).await?;

    if !response.is_success() {
        error!(
            status = %response.status_code,
            errors = ?response.errors(),
            "listing campaigns failed"
        );
        return Ok(());
    }

    let Campaigns { campaigns } = response.deserialize()?;
    for campaign in &campaigns {
        info!(id = %campaign.id, name = %campaign.name, status = %campaign.status, "campaign");
    }

    if let Some(first) = campaigns.first() {
        let response = client.campaign_subscribers(&first.id).await?;
        info!(status = %response.status_code, body = %response.json()?, "campaign subscribers");
    }

    Ok(())
}
