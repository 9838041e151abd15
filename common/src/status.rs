use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestId;

/// Status value that is recorded but never shown to tracking clients.
pub const STATUS_INTERNAL: &str = "internal";
/// Shipment is moving; any status may follow.
pub const STATUS_IN_TRANSIT: &str = "in transit";
/// Shipment is parked; only "in transit" may follow.
pub const STATUS_ON_HOLD: &str = "on hold";

/// Identifier of a status record, unique within its shipping request.
///
/// Layout: `S` + request id + `-` + 1-based position in the history padded to
/// at least three digits, e.g. `SB2024010000000000000001-002`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatusId(pub String);

impl StatusId {
    pub fn generate(request_id: &RequestId, position: usize) -> Self {
        StatusId(format!("S{request_id}-{position:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timestamped entry in a shipment's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentStatus {
    pub id: StatusId,
    pub location: String,
    /// Free-form label as given by the caller. See [`StatusCategory`].
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl ShipmentStatus {
    pub fn category(&self) -> StatusCategory {
        StatusCategory::of(&self.status)
    }

    pub fn is_internal(&self) -> bool {
        is_internal_status(&self.status)
    }
}

/// Case-insensitive check for the internal-only status label.
pub fn is_internal_status(status: &str) -> bool {
    eq_ignore_case(status, STATUS_INTERNAL)
}

/// Char-by-char case-insensitive equality: two chars match when they are
/// equal, their uppercase forms are equal, or the lowercase forms of those
/// uppercase forms are equal. Unlike comparing `to_lowercase()` strings, this
/// treats e.g. `'İ'` as matching `'i'`.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            if x == y {
                return true;
            }
            let (ux, uy) = (simple_upper(x), simple_upper(y));
            ux == uy || simple_lower(ux) == simple_lower(uy)
        })
}

/// Single-char uppercase mapping; chars that expand (e.g. `'ß'`) map to
/// themselves.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Single-char lowercase mapping. `'İ'` expands to `"i\u{307}"` and maps to
/// `'i'`.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// What a status label means for the transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// "internal" or "in transit" (any casing).
    Open,
    /// "on hold" (any casing).
    Hold,
    /// Any other label. Terminal.
    Closed,
}

impl StatusCategory {
    pub fn of(status: &str) -> Self {
        if eq_ignore_case(status, STATUS_INTERNAL) || eq_ignore_case(status, STATUS_IN_TRANSIT) {
            StatusCategory::Open
        } else if eq_ignore_case(status, STATUS_ON_HOLD) {
            StatusCategory::Hold
        } else {
            StatusCategory::Closed
        }
    }

    /// Returns true if a status labelled `next` may follow one of this category.
    pub fn can_transition_to(self, next: &str) -> bool {
        match self {
            StatusCategory::Open => true,
            StatusCategory::Hold => eq_ignore_case(next, STATUS_IN_TRANSIT),
            StatusCategory::Closed => false,
        }
    }
}

/// Transition guard over the last recorded status category.
///
/// `None` means nothing has been recorded yet, in which case any label is
/// accepted as the first status.
pub fn can_transition(prior: Option<StatusCategory>, next: &str) -> bool {
    prior.is_none_or(|category| category.can_transition_to(next))
}
