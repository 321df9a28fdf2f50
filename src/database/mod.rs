pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{Document, DocumentStore, StoreError};
pub use repository::{DemographicRepository, RealEstateRepository};
