//! Client for the Drip REST API.
//!
//! Every method performs exactly one HTTP round trip and returns the status code and decoded
//! body as a [`Response`], whatever the status. Errors are reserved for misconfiguration and
//! for requests that never completed.
//!
//! # Example
//!
//! ```no_run
//! use drip_client_sdk::{Client, Config};
//! use drip_client_sdk::types::SubscriberStatus;
//! use drip_client_sdk::types::request::SubscribersRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder()
//!     .token("YOUR_API_TOKEN")
//!     .account_id("9999999")
//!     .application_name("MyApp/1.0")
//!     .build();
//! let client = Client::new(config)?;
//!
//! let request = SubscribersRequest::builder()
//!     .status(SubscriberStatus::Active)
//!     .per_page(100)
//!     .build();
//! let response = client.subscribers(&request).await?;
//!
//! if response.is_success() {
//!     println!("{}", response.json()?);
//! } else {
//!     println!("{}: {:?}", response.status_code, response.errors());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use bon::Builder;
use reqwest::{
    Client as ReqwestClient, Method,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use url::Url;

use crate::auth::Credentials;
use crate::error::{Error, MissingAccountId, MissingToken};
use crate::types::response::Response;
use crate::{API_URL, Result, ToQueryParams as _};

/// Configuration for [`Client`].
///
/// `token` and `account_id` are optional here so that a missing value is reported by
/// [`Client::new`] as a [`MissingToken`] or [`MissingAccountId`] error.
#[derive(Clone, Debug, Default, Builder)]
#[non_exhaustive]
pub struct Config {
    /// Drip API token, sent as the Basic auth username.
    #[builder(into)]
    token: Option<SecretString>,
    /// Account every scoped request is prefixed with.
    #[builder(into)]
    account_id: Option<String>,
    /// Sent as the `User-Agent` header when present.
    #[builder(into)]
    application_name: Option<String>,
    /// Overall per-request timeout. No timeout is applied when unset.
    timeout: Option<Duration>,
}

impl Config {
    /// Reads [`TOKEN_VAR`](crate::TOKEN_VAR), [`ACCOUNT_ID_VAR`](crate::ACCOUNT_ID_VAR) and
    /// [`APPLICATION_NAME_VAR`](crate::APPLICATION_NAME_VAR) from the environment.
    ///
    /// Unset variables are left empty; [`Client::new`] reports them.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();

        Self {
            token: var(crate::TOKEN_VAR).map(SecretString::from),
            account_id: var(crate::ACCOUNT_ID_VAR),
            application_name: var(crate::APPLICATION_NAME_VAR),
            timeout: None,
        }
    }
}

/// HTTP client for the Drip API.
///
/// Cloning is cheap; clones share the underlying connection pool. A client holds no mutable
/// state, so it can be used from several tasks at once.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL, `https://api.getdrip.com/v2` unless overridden.
    host: Url,
    credentials: Credentials,
    /// `Authorization` plus the optional `User-Agent`, applied to every request.
    headers: HeaderMap,
    client: ReqwestClient,
}

impl Client {
    /// Creates a client for the public Drip API.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Configuration`](crate::error::Kind::Configuration) error if the token
    /// or account id is missing or blank (the token is checked first), or a
    /// [`Kind::Internal`](crate::error::Kind::Internal) error if the application name is not a
    /// valid header value.
    pub fn new(config: Config) -> Result<Client> {
        Self::with_host(API_URL, config)
    }

    /// Creates a client against a custom base URL, such as a proxy or a mock server.
    ///
    /// # Errors
    ///
    /// Same as [`Client::new`], plus an error if `host` is not a usable base URL.
    pub fn with_host(host: &str, config: Config) -> Result<Client> {
        let token = config
            .token
            .filter(|token| !token.expose_secret().trim().is_empty())
            .ok_or(MissingToken)?;
        let account_id = config
            .account_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(MissingAccountId)?;

        let host = Url::parse(host)?;
        if host.cannot_be_a_base() {
            return Err(Error::invalid_host(host));
        }

        let credentials = Credentials { token, account_id };

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credentials.authorization()?);
        if let Some(name) = &config.application_name {
            headers.insert(USER_AGENT, HeaderValue::from_str(name)?);
        }

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            host = %host,
            account_id = %credentials.account_id,
            "created Drip client"
        );

        Ok(Self {
            host,
            credentials,
            headers,
            client,
        })
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Returns the account id scoped requests are sent under.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.credentials.account_id()
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_host(self.host.as_str()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn scoped_url(&self, segments: &[&str]) -> Result<Url> {
        let mut scoped = Vec::with_capacity(segments.len() + 1);
        scoped.push(self.account_id());
        scoped.extend_from_slice(segments);

        self.url(&scoped)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response> {
        let request = self.client.request(method, url).build()?;
        crate::request(&self.client, request, &self.headers).await
    }

    async fn get_at<Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<Response> {
        let mut url = self.scoped_url(segments)?;
        url.set_query(query.query_params()?.as_deref());

        self.send(Method::GET, url).await
    }

    async fn post_at<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> Result<Response> {
        let request = self
            .client
            .request(Method::POST, self.scoped_url(segments)?)
            .json(payload)
            .build()?;

        crate::request(&self.client, request, &self.headers).await
    }

    async fn delete_at(&self, segments: &[&str]) -> Result<Response> {
        self.send(Method::DELETE, self.scoped_url(segments)?).await
    }

    /// `GET {host}/{account_id}/{path}` with `query` appended.
    ///
    /// Use this for endpoints without a dedicated method. `path` is split on `/`; each piece is
    /// percent-encoded as its own segment. Pass `&()` for no query.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Response> {
        self.get_at(&split_path(path), query).await
    }

    /// `POST {host}/{account_id}/{path}` with `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> Result<Response> {
        self.post_at(&split_path(path), payload).await
    }

    /// `DELETE {host}/{account_id}/{path}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.delete_at(&split_path(path)).await
    }

    // Accounts

    /// Lists every account the token has access to: `GET {host}/accounts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn accounts(&self) -> Result<Response> {
        self.send(Method::GET, self.url(&["accounts"])?).await
    }

    /// Fetches the configured account: `GET {host}/{account_id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn account(&self) -> Result<Response> {
        self.send(Method::GET, self.url(&[self.account_id()])?).await
    }

    // Broadcasts

    /// Lists single-email campaigns.
    ///
    /// See [`BroadcastsRequest`](crate::types::request::BroadcastsRequest).
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn broadcasts<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["broadcasts"], query).await
    }

    /// Fetches a single broadcast by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn broadcast(&self, broadcast_id: &str) -> Result<Response> {
        self.get_at(&["broadcasts", broadcast_id], &()).await
    }

    // Campaigns

    /// Lists email series campaigns.
    ///
    /// See [`CampaignsRequest`](crate::types::request::CampaignsRequest).
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn campaigns<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["campaigns"], query).await
    }

    /// Fetches a single campaign by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn campaign(&self, campaign_id: &str) -> Result<Response> {
        self.get_at(&["campaigns", campaign_id], &()).await
    }

    /// Activates a campaign. The id is also sent as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn activate_campaign(&self, campaign_id: &str) -> Result<Response> {
        self.post_at(&["campaigns", campaign_id, "activate"], campaign_id)
            .await
    }

    /// Pauses a campaign. The id is also sent as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn pause_campaign(&self, campaign_id: &str) -> Result<Response> {
        self.post_at(&["campaigns", campaign_id, "pause"], campaign_id)
            .await
    }

    /// Lists the subscribers of a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn campaign_subscribers(&self, campaign_id: &str) -> Result<Response> {
        self.get_at(&["campaigns", campaign_id, "subscribers"], &())
            .await
    }

    /// Subscribes someone to a campaign, e.g. `{"subscribers": [{"email": "..."}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn subscribe<B: Serialize + ?Sized>(
        &self,
        campaign_id: &str,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["campaigns", campaign_id, "subscribers"], payload)
            .await
    }

    /// Lists every campaign subscription of a subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn campaign_subscriptions(&self, subscriber_id: &str) -> Result<Response> {
        self.get_at(&["subscribers", subscriber_id, "campaign_subscription"], &())
            .await
    }

    // Custom fields

    /// Lists the custom field identifiers used in the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn custom_fields(&self) -> Result<Response> {
        self.get_at(&["custom_field_identifiers"], &()).await
    }

    // Goals (conversions)

    /// Lists every conversion goal in the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn goals(&self) -> Result<Response> {
        self.get_at(&["goals"], &()).await
    }

    /// Fetches a single conversion goal by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn goal(&self, goal_id: &str) -> Result<Response> {
        self.get_at(&["goals", goal_id], &()).await
    }

    // Events

    /// Records a custom event, e.g. `{"events": [{"email": "...", "action": "Logged in"}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_event<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Response> {
        self.post_at(&["events"], payload).await
    }

    /// Records a batch of custom events, e.g. `{"batches": [{"events": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_events<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Response> {
        self.post_at(&["events", "batches"], payload).await
    }

    /// Lists the custom event actions used in the account.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn event_actions<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["event_actions"], query).await
    }

    // Forms

    /// Fetches a single opt-in form by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn form(&self, form_id: &str) -> Result<Response> {
        self.get_at(&["forms", form_id], &()).await
    }

    /// Lists opt-in forms.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn forms<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["forms"], query).await
    }

    // Orders

    /// Records a batch of orders, e.g. `{"batches": [{"orders": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_orders<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Response> {
        self.post_at(&["orders", "batches"], payload).await
    }

    /// Creates or updates an order, e.g. `{"orders": [{"email": "...", "amount": 4900}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_order<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["orders"], payload).await
    }

    /// Creates or updates a refund for a recorded order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_refund<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["refunds"], payload).await
    }

    // Shopper activity

    /// Records cart activity for a shopper.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_shopper_cart<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["shopper_activity", "cart"], payload).await
    }

    /// Records order activity for a shopper.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_shopper_order<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["shopper_activity", "order"], payload).await
    }

    // Subscribers

    /// Creates or updates a subscriber, e.g. `{"subscribers": [{"email": "...", "tags": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_subscriber<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["subscribers"], payload).await
    }

    /// Creates or updates subscribers in bulk, e.g. `{"batches": [{"subscribers": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_or_update_subscribers<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Response> {
        self.post_at(&["subscribers", "batches"], payload).await
    }

    /// Lists subscribers. See [`SubscribersRequest`](crate::types::request::SubscribersRequest).
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn subscribers<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["subscribers"], query).await
    }

    /// Fetches a subscriber by Drip id or email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn subscriber(&self, subscriber_id: &str) -> Result<Response> {
        self.get_at(&["subscribers", subscriber_id], &()).await
    }

    /// Deletes a subscriber by Drip id or email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn delete_subscriber(&self, subscriber_id: &str) -> Result<Response> {
        self.delete_at(&["subscribers", subscriber_id]).await
    }

    // Tags

    /// Lists every tag used in the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn tags(&self) -> Result<Response> {
        self.get_at(&["tags"], &()).await
    }

    /// Applies a tag, e.g. `{"tags": [{"email": "...", "tag": "vip"}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn tag<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Response> {
        self.post_at(&["tags"], payload).await
    }

    /// Removes `tag` from the subscriber with `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn untag(&self, email: &str, tag: &str) -> Result<Response> {
        self.delete_at(&["subscribers", email, "tags", tag]).await
    }

    // Webhooks

    /// Lists the webhooks configured in the account.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` cannot be URL-encoded or the request cannot be sent.
    pub async fn webhooks<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Response> {
        self.get_at(&["webhooks"], query).await
    }

    /// Deletes a webhook by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<Response> {
        self.delete_at(&["webhooks", webhook_id]).await
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    fn config() -> Config {
        Config::builder().token("tok_123").account_id("acct_1").build()
    }

    #[test]
    fn missing_token_should_fail() {
        let config = Config::builder().account_id("acct_1").build();

        let err = Client::new(config).expect_err("token is required");
        assert_eq!(err.kind(), Kind::Configuration);
        assert!(err.is_missing_token(), "expected MissingToken, got {err}");
    }

    #[test]
    fn missing_token_wins_over_missing_account_id() {
        let err = Client::new(Config::default()).expect_err("nothing configured");

        assert!(err.is_missing_token(), "token is checked first, got {err}");
    }

    #[test]
    fn blank_token_should_fail() {
        let config = Config::builder().token("   ").account_id("acct_1").build();

        let err = Client::new(config).expect_err("blank token");
        assert!(err.is_missing_token(), "expected MissingToken, got {err}");
    }

    #[test]
    fn missing_account_id_should_fail() {
        let config = Config::builder()
            .token("tok_123")
            .application_name("MyApp/1.0")
            .build();

        let err = Client::new(config).expect_err("account id is required");
        assert_eq!(err.kind(), Kind::Configuration);
        assert!(err.is_missing_account_id(), "expected MissingAccountId, got {err}");
    }

    #[test]
    fn empty_account_id_should_fail() {
        let config = Config::builder().token("tok_123").account_id("").build();

        let err = Client::new(config).expect_err("empty account id");
        assert!(err.is_missing_account_id(), "expected MissingAccountId, got {err}");
    }

    #[test]
    fn invalid_application_name_should_fail() {
        let config = Config::builder()
            .token("tok_123")
            .account_id("acct_1")
            .application_name("bad\nname")
            .build();

        let err = Client::new(config).expect_err("newline is not a valid header value");
        assert_eq!(err.kind(), Kind::Internal);
    }

    #[test]
    fn cannot_be_a_base_host_should_fail() {
        let err = Client::with_host("mailto:someone@example.com", config())
            .expect_err("not a base URL");

        assert_eq!(err.kind(), Kind::Configuration);
    }

    #[test]
    fn headers_should_only_carry_user_agent_when_configured() {
        let client = Client::new(config()).expect("valid config");
        assert!(client.headers.contains_key(AUTHORIZATION), "auth is always set");
        assert!(!client.headers.contains_key(USER_AGENT), "no default user agent");

        let config = Config::builder()
            .token("tok_123")
            .account_id("acct_1")
            .application_name("MyApp/1.0")
            .build();
        let client = Client::new(config).expect("valid config");
        assert_eq!(client.headers[USER_AGENT], "MyApp/1.0");
    }

    #[test]
    fn scoped_urls_prefix_the_account_id() {
        let client = Client::new(config()).expect("valid config");

        let url = client.scoped_url(&["subscribers", "sub_9"]).expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.getdrip.com/v2/acct_1/subscribers/sub_9"
        );

        let url = client
            .scoped_url(&["subscribers", "a@b.com", "tags", "vip"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.getdrip.com/v2/acct_1/subscribers/a@b.com/tags/vip"
        );
    }

    #[test]
    fn account_level_urls_skip_the_account_prefix() {
        let client = Client::new(config()).expect("valid config");

        assert_eq!(
            client.url(&["accounts"]).expect("url").as_str(),
            "https://api.getdrip.com/v2/accounts"
        );
        assert_eq!(
            client.url(&[client.account_id()]).expect("url").as_str(),
            "https://api.getdrip.com/v2/acct_1"
        );
    }

    #[test]
    fn segments_are_escaped_individually() {
        let client = Client::new(config()).expect("valid config");

        let url = client
            .scoped_url(&["subscribers", "a@b.com", "tags", "a/b c"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.getdrip.com/v2/acct_1/subscribers/a@b.com/tags/a%2Fb%20c"
        );
    }

    #[test]
    fn trailing_slash_on_host_is_ignored() {
        let client =
            Client::with_host("https://proxy.example.com/drip/v2/", config()).expect("valid host");

        assert_eq!(
            client.scoped_url(&["tags"]).expect("url").as_str(),
            "https://proxy.example.com/drip/v2/acct_1/tags"
        );
    }

    #[test]
    fn split_path_drops_empty_segments() {
        assert_eq!(split_path("/subscribers/batches"), vec!["subscribers", "batches"]);
        assert_eq!(split_path("tags//"), vec!["tags"]);
        assert!(split_path("").is_empty(), "empty path has no segments");
    }
}
