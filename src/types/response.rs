//! The uniform result of every Drip API call.
//!
//! A [`Response`] is produced for every completed HTTP round trip, whatever the status code.
//! Callers inspect [`Response::status_code`] to tell success from failure; the client never
//! turns a 4xx or 5xx into an [`Error`](crate::error::Error).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::{Error, StatusCode};

/// Status code and decoded body of a completed request.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: StatusCode,
    pub body: Body,
}

/// Decoded response body.
///
/// Empty bodies (such as `204 No Content` after a delete) decode to [`Value::Null`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    /// The server sent something that is not JSON. The raw text is kept for inspection.
    Undecodable { raw: String, reason: String },
}

/// One entry of the `{"errors": [...]}` envelope Drip returns on failed requests.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

impl Body {
    pub(crate) fn decode(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Body::Json(Value::Null);
        }

        match serde_json::from_slice(bytes) {
            Ok(value) => Body::Json(value),
            Err(e) => Body::Undecodable {
                raw: String::from_utf8_lossy(bytes).into_owned(),
                reason: e.to_string(),
            },
        }
    }

    /// Returns the JSON value, if the body decoded.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Undecodable { .. } => None,
        }
    }
}

impl Response {
    #[must_use]
    pub fn new(status_code: StatusCode, body: Body) -> Self {
        Self { status_code, body }
    }

    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    /// Splits the response into its `(status, body)` pair.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, Body) {
        (self.status_code, self.body)
    }

    /// Borrows the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Decode`](crate::error::Kind::Decode) error if the body was not JSON.
    pub fn json(&self) -> Result<&Value> {
        match &self.body {
            Body::Json(value) => Ok(value),
            Body::Undecodable { reason, .. } => {
                Err(Error::undecodable(self.status_code, reason.clone()))
            }
        }
    }

    /// Takes ownership of the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Decode`](crate::error::Kind::Decode) error if the body was not JSON.
    pub fn into_json(self) -> Result<Value> {
        match self.body {
            Body::Json(value) => Ok(value),
            Body::Undecodable { reason, .. } => Err(Error::undecodable(self.status_code, reason)),
        }
    }

    /// Deserializes the JSON body into `T`.
    ///
    /// With the `tracing` feature enabled, fields present in the body but unknown to `T` are
    /// logged as warnings instead of being silently dropped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use drip_client_sdk::{Client, Config};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Subscribers {
    ///     subscribers: Vec<serde_json::Value>,
    /// }
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new(Config::from_env())?;
    /// let response = client.subscriber("someone@example.com").await?;
    /// let parsed: Subscribers = response.deserialize()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        crate::serde_helpers::deserialize_with_warnings(self.json()?.clone())
    }

    /// Extracts Drip's error envelope, if the body carries one.
    ///
    /// Returns an empty list for successful responses and for bodies without an `errors` key.
    #[must_use]
    pub fn errors(&self) -> Vec<ApiError> {
        self.body
            .as_json()
            .filter(|value| value.get("errors").is_some())
            .and_then(|value| ErrorEnvelope::deserialize(value).ok())
            .map(|envelope| envelope.errors)
            .unwrap_or_default()
    }
}
