//! Order workflow statuses and the dashboard buckets they fall into.
//!
//! The workflow is flat: an operator may move an order from any status to any
//! other, including back to where it started. Nothing here is time driven;
//! `slow` and `delay` are labels an operator assigns by hand.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a submitted order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Just submitted; the initial status
    #[default]
    Pending,
    /// Being prepared
    InProgress,
    /// Being prepared, flagged as slow
    Slow,
    /// Being prepared, flagged as delayed
    Delay,
    /// Served
    Complete,
}

impl OrderStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Slow,
        Self::Delay,
        Self::Complete,
    ];

    /// Text form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inprogress",
            Self::Slow => "slow",
            Self::Delay => "delay",
            Self::Complete => "complete",
        }
    }

    /// Dashboard bucket this status is shown in.
    #[must_use]
    pub const fn bucket(self) -> StatusBucket {
        match self {
            Self::Pending => StatusBucket::Pending,
            Self::InProgress | Self::Slow | Self::Delay => StatusBucket::InProgress,
            Self::Complete => StatusBucket::Complete,
        }
    }

    /// Emoji shown next to the status in Discord messages.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Pending => "🕒",
            Self::InProgress => "👨‍🍳",
            Self::Slow => "⏲️",
            Self::Delay => "⚠️",
            Self::Complete => "✅",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// Coarse grouping used by the owner dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    /// `pending`
    Pending,
    /// `inprogress`, `slow` and `delay`
    InProgress,
    /// `complete`
    Complete,
}

impl StatusBucket {
    /// Every bucket, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Complete];

    /// Heading used for the bucket.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pending => "Pending Orders",
            Self::InProgress => "In Progress",
            Self::Complete => "Completed",
        }
    }

    /// Text shown when the bucket is empty.
    #[must_use]
    pub const fn empty_text(self) -> &'static str {
        match self {
            Self::Pending => "No pending orders",
            Self::InProgress => "No orders in progress",
            Self::Complete => "No completed orders",
        }
    }
}
