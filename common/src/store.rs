use crate::error::{Result, ShippingError};
use crate::request::{RequestId, ShipmentRequest};
use crate::status::ShipmentStatus;

/// Storage behind the lifecycle manager.
///
/// The manager only needs ordered append, lookup by exact id and appending to
/// a request's history, so a durable backend can replace the in-memory list
/// without changing any manager operation.
pub trait RequestStore {
    /// Add a newly registered request at the end of the collection.
    fn append(&mut self, request: ShipmentRequest);

    /// First request whose id matches exactly (case-sensitive).
    fn find_by_id(&self, id: &str) -> Option<&ShipmentRequest>;

    /// Append a status to the history of an existing request.
    fn append_status(&mut self, request_id: &RequestId, status: ShipmentStatus) -> Result<()>;

    /// Number of registered requests.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered in-memory collection, searched linearly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestStore {
    requests: Vec<ShipmentRequest>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered requests in registration order.
    pub fn requests(&self) -> &[ShipmentRequest] {
        &self.requests
    }
}

impl RequestStore for InMemoryRequestStore {
    fn append(&mut self, request: ShipmentRequest) {
        self.requests.push(request);
    }

    fn find_by_id(&self, id: &str) -> Option<&ShipmentRequest> {
        self.requests.iter().find(|r| r.id.as_str() == id)
    }

    fn append_status(&mut self, request_id: &RequestId, status: ShipmentStatus) -> Result<()> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or_else(|| ShippingError::NotFound(request_id.clone()))?;
        request.status_history.push(status);
        Ok(())
    }

    fn len(&self) -> usize {
        self.requests.len()
    }
}
