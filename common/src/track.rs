use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ShipmentStatus;

/// The customer-facing view of one status record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequestTrack {
    pub location: String,
    /// See [`format_track_date`].
    pub formatted_date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl ShipmentRequestTrack {
    pub fn from_status(status: &ShipmentStatus) -> Self {
        Self {
            location: status.location.clone(),
            formatted_date: format_track_date(status.timestamp),
            status: status.status.clone(),
            observations: status.observations.clone(),
        }
    }
}

/// Format as "Mon DDth of YYYY", e.g. "Jan 05th of 2024".
///
/// The suffix is always a literal "th", whatever the day.
pub fn format_track_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %dth of %Y").to_string()
}
