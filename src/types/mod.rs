//! Request and response types for the Drip API.
//!
//! Query builders live in [`request`]; the uniform [`response::Response`] returned by every
//! call lives in [`response`]. The enums below are shared by several list endpoints.

use serde::{Deserialize, Serialize};

pub mod request;
pub mod response;

/// Date and time types used by the subscriber list filters.
pub use chrono::{DateTime, Utc};

/// Lifecycle status filter for single-email campaigns (broadcasts).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum BroadcastStatus {
    /// Every broadcast regardless of status (default).
    #[default]
    All,
    Draft,
    Scheduled,
    Sent,
}

/// Lifecycle status filter for email series campaigns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum CampaignStatus {
    /// Every campaign regardless of status (default).
    #[default]
    All,
    Active,
    Draft,
    Paused,
}

/// Status filter for subscriber listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum SubscriberStatus {
    /// Active, unsubscribed and undeliverable subscribers.
    All,
    /// Only subscribers that can currently receive email (default).
    #[default]
    Active,
    Unsubscribed,
    ActiveOrUnsubscribed,
    Undeliverable,
}

/// Field used to order broadcast and campaign listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum SortBy {
    /// Creation time (default).
    #[default]
    CreatedAt,
    /// Scheduled send time. Only meaningful for broadcasts.
    SendAt,
    Name,
}

/// Ordering direction for sorted listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(SubscriberStatus::ActiveOrUnsubscribed.to_string(), "active_or_unsubscribed");
        assert_eq!(BroadcastStatus::Scheduled.to_string(), "scheduled");
        assert_eq!(SortBy::SendAt.to_string(), "send_at");
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }

    #[test]
    fn serde_matches_display() {
        let json = serde_json::to_value(CampaignStatus::Paused).expect("serializable");
        assert_eq!(json, serde_json::json!("paused"));

        let status: SubscriberStatus =
            serde_json::from_value(serde_json::json!("undeliverable")).expect("known status");
        assert_eq!(status, SubscriberStatus::Undeliverable);
    }
}
