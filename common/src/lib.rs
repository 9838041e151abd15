pub mod error;
pub mod pricing;
pub mod request;
pub mod service;
pub mod status;
pub mod store;
pub mod track;

pub use error::ShippingError;
pub use request::{RequestId, ShipmentRequest};
pub use service::ShippingService;
pub use status::ShipmentStatus;
pub use store::RequestStore;
pub use track::ShipmentRequestTrack;
