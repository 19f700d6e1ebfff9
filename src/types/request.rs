//! Query parameter builders for the Drip list endpoints.
//!
//! Every list method on [`crate::Client`] accepts any [`Serialize`] value as its query, so a
//! `&[("status", "all")]` slice works just as well. These builders cover the parameters Drip
//! documents and omit anything left unset.

#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use serde::Serialize;
use serde_with::{StringWithSeparator, formats::CommaSeparator, serde_as, skip_serializing_none};

use super::{
    BroadcastStatus, CampaignStatus, DateTime, SortBy, SortDirection, SubscriberStatus, Utc,
};

/// Plain pagination, used by event actions, forms and webhooks.
///
/// # Example
///
/// ```
/// use drip_client_sdk::types::request::PageRequest;
///
/// let request = PageRequest::builder().page(2).per_page(100).build();
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Builder, Serialize)]
#[non_exhaustive]
pub struct PageRequest {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Results per page (Drip caps this at 1000).
    pub per_page: Option<u32>,
}

/// Parameters for `GET /:account_id/broadcasts`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Builder, Serialize)]
#[non_exhaustive]
pub struct BroadcastsRequest {
    pub status: Option<BroadcastStatus>,
    pub sort: Option<SortBy>,
    pub direction: Option<SortDirection>,
}

/// Parameters for `GET /:account_id/campaigns`.
///
/// # Example
///
/// ```
/// use drip_client_sdk::types::CampaignStatus;
/// use drip_client_sdk::types::request::CampaignsRequest;
///
/// let request = CampaignsRequest::builder()
///     .status(CampaignStatus::Active)
///     .per_page(50)
///     .build();
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Builder, Serialize)]
#[non_exhaustive]
pub struct CampaignsRequest {
    pub status: Option<CampaignStatus>,
    pub sort: Option<SortBy>,
    pub direction: Option<SortDirection>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Parameters for `GET /:account_id/subscribers`.
///
/// `tags` is sent as a single comma-separated value; subscribers must carry every listed tag.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Builder, Serialize)]
#[non_exhaustive]
pub struct SubscribersRequest {
    pub status: Option<SubscriberStatus>,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub subscribed_before: Option<DateTime<Utc>>,
    pub subscribed_after: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
