#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod auth;
pub mod client;
pub mod error;
pub(crate) mod serde_helpers;
pub mod types;

use reqwest::Request;
use reqwest::header::HeaderMap;
use serde::Serialize;

pub use crate::client::{Client, Config};
use crate::error::Error;
use crate::types::response::{Body, Response};

pub type Result<T> = std::result::Result<T, Error>;

/// Base URL of version 2 of the Drip REST API.
pub const API_URL: &str = "https://api.getdrip.com/v2";

/// Environment variable read by [`Config::from_env`] for the API token.
pub const TOKEN_VAR: &str = "DRIP_API_TOKEN";

/// Environment variable read by [`Config::from_env`] for the account id.
pub const ACCOUNT_ID_VAR: &str = "DRIP_ACCOUNT_ID";

/// Environment variable read by [`Config::from_env`] for the `User-Agent` application name.
pub const APPLICATION_NAME_VAR: &str = "DRIP_APPLICATION_NAME";

/// Trait for converting request types to URL query parameters.
///
/// This trait is automatically implemented for all types that implement [`Serialize`].
/// It uses [`serde_html_form`] to serialize the value into a query string, so typed
/// request builders, `&[(&str, &str)]` slices and maps all work. `()` produces no query.
pub trait ToQueryParams: Serialize {
    /// Converts the value to a URL-encoded query string without the leading `?`.
    ///
    /// Returns `None` when there is nothing to send.
    ///
    /// # Errors
    ///
    /// Returns an [`error::Kind::Internal`] error if the value is not a flat map or struct,
    /// e.g. a bare string or a nested object.
    fn query_params(&self) -> Result<Option<String>> {
        let params = serde_html_form::to_string(self).inspect_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::error!("Unable to convert to URL-encoded string {e:?}");
            #[cfg(not(feature = "tracing"))]
            let _: &serde_html_form::ser::Error = e;
        })?;

        Ok((!params.is_empty()).then_some(params))
    }
}

impl<T: Serialize + ?Sized> ToQueryParams for T {}

/// Executes a single request and normalizes the outcome into a [`Response`].
///
/// Non-success statuses are returned, not raised. Only failures to complete the round trip
/// (connect, TLS, timeout, reading the body) become errors.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(client, request, headers),
        fields(
            method = %request.method(),
            path = request.url().path(),
            status_code
        )
    )
)]
async fn request(
    client: &reqwest::Client,
    mut request: Request,
    headers: &HeaderMap,
) -> Result<Response> {
    request.headers_mut().extend(headers.clone());

    #[cfg(feature = "tracing")]
    let (method, path) = (request.method().clone(), request.url().path().to_owned());

    let response = client.execute(request).await?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    let bytes = response.bytes().await?;
    let body = Body::decode(&bytes);

    #[cfg(feature = "tracing")]
    {
        if !status_code.is_success() {
            tracing::warn!(
                status = %status_code,
                method = %method,
                path = %path,
                "Drip API returned a non-success status"
            );
        }
        if let Body::Undecodable { reason, .. } = &body {
            tracing::warn!(
                status = %status_code,
                method = %method,
                path = %path,
                reason = %reason,
                "response body is not valid JSON"
            );
        }
    }

    Ok(Response::new(status_code, body))
}
