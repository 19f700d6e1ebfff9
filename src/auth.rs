//! Credentials used to authenticate against the Drip API.
//!
//! Drip uses HTTP Basic authentication with the API token as the username and an empty
//! password. The token is held as a [`SecretString`] so it never shows up in `Debug` output.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};

use crate::Result;

/// API token plus the account it is scoped to.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub(crate) token: SecretString,
    pub(crate) account_id: String,
}

impl Credentials {
    #[must_use]
    pub fn new(token: String, account_id: String) -> Self {
        Self {
            token: SecretString::from(token),
            account_id,
        }
    }

    /// Returns the API token.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns the account id requests are scoped to.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Builds the `Authorization` header value: `Basic base64("{token}:")`.
    ///
    /// The returned value is marked sensitive so HTTP-level logging skips it.
    pub(crate) fn authorization(&self) -> Result<HeaderValue> {
        let encoded = STANDARD.encode(format!("{}:", self.token.expose_secret()));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
        value.set_sensitive(true);

        Ok(value)
    }
}
