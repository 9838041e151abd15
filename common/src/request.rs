use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::ShipmentStatus;
use crate::track::ShipmentRequestTrack;

/// Number of digits of the sequence suffix in a request id.
pub const REQUEST_SEQUENCE_DIGITS: usize = 16;

/// Unique shipping request identifier.
///
/// Layout: sender initial, four-digit year, two-digit month, then the
/// manager's sequence number zero-padded to 16 digits,
/// e.g. `B2024010000000000000001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Build the id for the `sequence`-th request registered at `at`.
    pub fn generate(sender_initial: char, at: DateTime<Utc>, sequence: u64) -> Self {
        RequestId(format!(
            "{sender_initial}{}{:02}{sequence:0width$}",
            at.year(),
            at.month(),
            width = REQUEST_SEQUENCE_DIGITS
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId(id.to_string())
    }
}

/// A shipment registered with the lifecycle manager.
///
/// Everything except `status_history` is fixed at registration. The history is
/// append-only and kept in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub id: RequestId,
    pub receiver_name: String,
    pub sender_name: String,
    pub destination_address: String,
    /// Sending cost after commission and tax.
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    /// Only present when a non-empty value was given at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub status_history: Vec<ShipmentStatus>,
}

impl ShipmentRequest {
    /// Most recently appended status, if any.
    pub fn last_status(&self) -> Option<&ShipmentStatus> {
        self.status_history.last()
    }

    /// Public tracking view of the history: internal statuses are skipped and
    /// the rest keep their chronological order.
    pub fn tracks(&self) -> impl Iterator<Item = ShipmentRequestTrack> + '_ {
        self.status_history
            .iter()
            .filter(|status| !status.is_internal())
            .map(ShipmentRequestTrack::from_status)
    }

    /// Total cost as a float, for callers that cannot take a decimal.
    pub fn total_cost_f64(&self) -> f64 {
        self.total_cost.to_f64().unwrap_or(f64::NAN)
    }
}
