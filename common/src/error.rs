use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::RequestId;

/// Result type alias for shipment lifecycle operations.
pub type Result<T> = std::result::Result<T, ShippingError>;

/// Errors surfaced by the shipment lifecycle manager.
///
/// None of these are recovered from internally. Every failing operation leaves
/// the manager's state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingError {
    /// Input validation failed; the message names the first failing field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No shipping request is registered under this id.
    #[error("shipping request not found: {0}")]
    NotFound(RequestId),

    /// The new status is not reachable from the last recorded one.
    #[error("cannot change status from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ShippingError::InvalidArgument("Receiver should not be empty".into());
        assert_eq!(err.to_string(), "invalid argument: Receiver should not be empty");

        let err = ShippingError::NotFound(RequestId("B2024010000000000000001".into()));
        assert_eq!(
            err.to_string(),
            "shipping request not found: B2024010000000000000001"
        );

        let err = ShippingError::InvalidTransition {
            from: "On hold".into(),
            to: "Delivered".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot change status from 'On hold' to 'Delivered'"
        );
    }

    #[test]
    fn serializes_with_variant_tag() {
        let err = ShippingError::NotFound(RequestId("missing".into()));
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"NotFound":"missing"}"#);
    }
}
