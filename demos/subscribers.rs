//! Creates a subscriber, tags them, reads them back and removes the tag again.
//!
//! Reads credentials from the environment:
//! ```sh
//! DRIP_API_TOKEN=... DRIP_ACCOUNT_ID=... cargo run --example subscribers
//! ```

#![allow(clippy::print_stdout, reason = "demo output goes to stdout")]

use drip_client_sdk::types::SubscriberStatus;
use drip_client_sdk::types::request::SubscribersRequest;
use drip_client_sdk::{Client, Config};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new(Config::from_env())?;
    let email = "jane@example.com";

    let response = client
        .create_or_update_subscriber(&json!({
            "subscribers": [{ "email": email, "custom_fields": { "first_name": "Jane" } }]
        }))
        .await?;
    println!("upsert: {}", response.status_code);

    let response = client
        .tag(&json!({ "tags": [{ "email": email, "tag": "vip" }] }))
        .await?;
    println!("tag: {}", response.status_code);

    let response = client.subscriber(email).await?;
    if response.is_success() {
        println!("subscriber: {}", response.json()?);
    } else {
        println!("lookup failed: {:?}", response.errors());
    }

    let request = SubscribersRequest::builder()
        .status(SubscriberStatus::Active)
        .tags(vec!["vip".to_owned()])
        .per_page(10)
        .build();
    let response = client.subscribers(&request).await?;
    println!("vip subscribers: {}", response.json()?);

    let response = client.untag(email, "vip").await?;
    println!("untag: {}", response.status_code);

    Ok(())
}
