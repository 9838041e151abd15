//! Shipment lifecycle manager.
//!
//! Owns the request-id sequence and the request collection, and is the only
//! writer to either. Every operation is synchronous and either completes or
//! fails without touching state.
//!
//! Mutating operations take `&mut self`, so a single writer is enforced by the
//! borrow checker. To share one manager between threads, wrap it in
//! `Arc<Mutex<ShippingService>>`: that one lock covers the sequence counter, the
//! collection and every status history, at the cost of serialized writes.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{Result, ShippingError};
use crate::pricing::total_cost;
use crate::request::{RequestId, ShipmentRequest};
use crate::status::{can_transition, ShipmentStatus, StatusId};
use crate::store::{InMemoryRequestStore, RequestStore};
use crate::track::ShipmentRequestTrack;

#[derive(Debug, Clone, Default)]
pub struct ShippingService<S = InMemoryRequestStore> {
    /// Last sequence number handed out. Starts at 0; the first request gets 1.
    sequence: u64,
    store: S,
}

impl ShippingService<InMemoryRequestStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: RequestStore> ShippingService<S> {
    /// Manager backed by the given store, with a fresh sequence.
    pub fn with_store(store: S) -> Self {
        Self { sequence: 0, store }
    }

    /// Number of requests registered so far by this manager.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new shipment using the current time.
    pub fn register_request(
        &mut self,
        receiver_name: &str,
        sender_name: &str,
        destination_address: &str,
        send_cost: i64,
        observations: Option<&str>,
    ) -> Result<ShipmentRequest> {
        self.register_request_at(
            receiver_name,
            sender_name,
            destination_address,
            send_cost,
            observations,
            Utc::now(),
        )
    }

    /// Register a new shipment as of `now`.
    ///
    /// Inputs are validated before anything else happens, so a rejected call
    /// neither consumes a sequence number nor adds a request.
    pub fn register_request_at(
        &mut self,
        receiver_name: &str,
        sender_name: &str,
        destination_address: &str,
        send_cost: i64,
        observations: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ShipmentRequest> {
        validate_request(receiver_name, sender_name, destination_address, send_cost)
            .inspect_err(|e| warn!("Rejected shipping request: {e}"))?;

        let sender_initial = sender_name
            .chars()
            .next()
            .ok_or_else(|| ShippingError::InvalidArgument("Sender should not be empty".into()))?;

        self.sequence += 1;
        let request = ShipmentRequest {
            id: RequestId::generate(sender_initial, now, self.sequence),
            receiver_name: receiver_name.to_string(),
            sender_name: sender_name.to_string(),
            destination_address: destination_address.to_string(),
            total_cost: total_cost(send_cost),
            created_at: now,
            observations: observations
                .filter(|o| !o.is_empty())
                .map(str::to_string),
            status_history: Vec::new(),
        };

        info!(
            request_id = %request.id,
            total_cost = %request.total_cost,
            "Registered shipping request"
        );
        self.store.append(request.clone());
        Ok(request)
    }

    /// Append a status to a request using the current time.
    pub fn register_status(
        &mut self,
        request_id: &str,
        location: &str,
        status: &str,
        observations: Option<&str>,
    ) -> Result<ShipmentStatus> {
        self.register_status_at(request_id, location, status, observations, Utc::now())
    }

    /// Append a status to a request as of `now`.
    ///
    /// The last recorded status decides what may follow:
    /// - nothing recorded yet: any status
    /// - "internal" / "in transit": any status
    /// - "on hold": only "in transit"
    /// - anything else: nothing
    pub fn register_status_at(
        &mut self,
        request_id: &str,
        location: &str,
        status: &str,
        observations: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ShipmentStatus> {
        let request = self.find_request(request_id)?;
        let prior = request.last_status();

        if !can_transition(prior.map(ShipmentStatus::category), status) {
            let from = prior.map(|s| s.status.clone()).unwrap_or_default();
            warn!(
                request_id = %request.id,
                "Rejected status change from '{from}' to '{status}'"
            );
            return Err(ShippingError::InvalidTransition {
                from,
                to: status.to_string(),
            });
        }

        let record = ShipmentStatus {
            id: StatusId::generate(&request.id, request.status_history.len() + 1),
            location: location.to_string(),
            status: status.to_string(),
            timestamp: now,
            observations: observations.map(str::to_string),
        };
        let owner = request.id.clone();

        self.store.append_status(&owner, record.clone())?;
        debug!(status_id = %record.id, status = %record.status, "Registered status");
        Ok(record)
    }

    /// Public tracking history of a request, oldest first, without internal
    /// statuses.
    pub fn track_status_of(&self, request_id: &str) -> Result<Vec<ShipmentRequestTrack>> {
        Ok(self.find_request(request_id)?.tracks().collect())
    }

    /// Look up a request by exact id.
    pub fn find_request(&self, request_id: &str) -> Result<&ShipmentRequest> {
        self.store.find_by_id(request_id).ok_or_else(|| {
            warn!("Shipping request not found: {request_id}");
            ShippingError::NotFound(RequestId::from(request_id))
        })
    }
}

fn validate_request(
    receiver_name: &str,
    sender_name: &str,
    destination_address: &str,
    send_cost: i64,
) -> Result<()> {
    require_non_empty(receiver_name, "Receiver should not be empty")?;
    require_non_empty(sender_name, "Sender should not be empty")?;
    require_non_empty(destination_address, "Destination address should not be empty")?;
    if send_cost < 0 {
        return Err(ShippingError::InvalidArgument(
            "Sending cost should be positive".into(),
        ));
    }
    Ok(())
}

fn require_non_empty(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ShippingError::InvalidArgument(message.to_string()));
    }
    Ok(())
}
