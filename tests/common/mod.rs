#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Not every test binary uses every helper"
)]

use drip_client_sdk::{Client, Config};
use httpmock::MockServer;

pub const TOKEN: &str = "tok_123";
pub const ACCOUNT_ID: &str = "acct_1";

/// `Basic base64("tok_123:")`
pub const AUTHORIZATION: &str = "Basic dG9rXzEyMzo=";

/// Base URL on the mock server, mirroring the `/v2` prefix of the real API.
#[must_use]
pub fn host(server: &MockServer) -> String {
    format!("{}/v2", server.base_url())
}

/// Path of an account-scoped resource on the mock server.
#[must_use]
pub fn scoped(path: &str) -> String {
    format!("/v2/{ACCOUNT_ID}/{path}")
}

#[must_use]
pub fn config() -> Config {
    Config::builder().token(TOKEN).account_id(ACCOUNT_ID).build()
}

pub fn create_client(server: &MockServer) -> anyhow::Result<Client> {
    Ok(Client::with_host(&host(server), config())?)
}
