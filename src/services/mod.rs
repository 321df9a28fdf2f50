pub mod listrik_client;
pub mod listrik_service;

pub use listrik_client::{ElectricityReading, ListrikClient, Relayed, UpstreamError};
pub use listrik_service::{ListingUsage, ListrikError, ListrikService};
