use std::sync::Arc;

use crate::database::manager::{DocumentStore, StoreError};
use crate::database::models::{next_available_id, DemographicData, RealEstate};
use crate::types::Operation;

pub const REAL_ESTATE_NOT_FOUND: &str = "realEstate not found";
pub const DEMOGRAPHIC_NOT_FOUND: &str = "demographicData not found";
pub const LOCATION_EXISTS: &str = "Location already exists";

/// Listing operations keyed by `id`
#[derive(Clone)]
pub struct RealEstateRepository {
    store: Arc<DocumentStore>,
}

impl RealEstateRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn select_all(&self) -> Vec<RealEstate> {
        self.store.read(|doc| doc.real_estate.clone()).await
    }

    pub async fn count(&self) -> usize {
        self.store.read(|doc| doc.real_estate.len()).await
    }

    pub async fn select_404(&self, id: u32) -> Result<RealEstate, StoreError> {
        self.store
            .read(|doc| doc.real_estate.iter().find(|l| l.id == id).cloned())
            .await
            .ok_or_else(|| StoreError::NotFound(REAL_ESTATE_NOT_FOUND.to_string()))
    }

    /// Store a new listing under the smallest free id, ignoring `listing.id`
    pub async fn create(&self, mut listing: RealEstate) -> Result<RealEstate, StoreError> {
        self.store
            .mutate(Operation::Create, move |doc| {
                listing.id = next_available_id(&doc.real_estate);
                doc.real_estate.push(listing.clone());
                Ok(listing)
            })
            .await
    }

    /// Replace the listing with `id` in place; the stored id stays `id`
    pub async fn update_404(&self, id: u32, mut listing: RealEstate) -> Result<RealEstate, StoreError> {
        self.store
            .mutate(Operation::Update, move |doc| {
                let slot = doc
                    .real_estate
                    .iter_mut()
                    .find(|l| l.id == id)
                    .ok_or_else(|| StoreError::NotFound(REAL_ESTATE_NOT_FOUND.to_string()))?;
                listing.id = id;
                *slot = listing.clone();
                Ok(listing)
            })
            .await
    }

    pub async fn delete_404(&self, id: u32) -> Result<RealEstate, StoreError> {
        self.store
            .mutate(Operation::Delete, move |doc| {
                let index = doc
                    .real_estate
                    .iter()
                    .position(|l| l.id == id)
                    .ok_or_else(|| StoreError::NotFound(REAL_ESTATE_NOT_FOUND.to_string()))?;
                Ok(doc.real_estate.remove(index))
            })
            .await
    }
}

/// Demographic operations keyed by `location`
#[derive(Clone)]
pub struct DemographicRepository {
    store: Arc<DocumentStore>,
}

impl DemographicRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn select_all(&self) -> Vec<DemographicData> {
        self.store.read(|doc| doc.demographic_data.clone()).await
    }

    pub async fn count(&self) -> usize {
        self.store.read(|doc| doc.demographic_data.len()).await
    }

    pub async fn select_404(&self, location: &str) -> Result<DemographicData, StoreError> {
        self.store
            .read(|doc| doc.demographic_data.iter().find(|d| d.location == location).cloned())
            .await
            .ok_or_else(|| StoreError::NotFound(DEMOGRAPHIC_NOT_FOUND.to_string()))
    }

    /// Locations are unique at creation time only
    pub async fn create(&self, record: DemographicData) -> Result<DemographicData, StoreError> {
        self.store
            .mutate(Operation::Create, move |doc| {
                if doc.demographic_data.iter().any(|d| d.location == record.location) {
                    return Err(StoreError::Conflict(LOCATION_EXISTS.to_string()));
                }
                doc.demographic_data.push(record.clone());
                Ok(record)
            })
            .await
    }

    pub async fn update_404(
        &self,
        location: &str,
        mut record: DemographicData,
    ) -> Result<DemographicData, StoreError> {
        let location = location.to_string();
        self.store
            .mutate(Operation::Update, move |doc| {
                let slot = doc
                    .demographic_data
                    .iter_mut()
                    .find(|d| d.location == location)
                    .ok_or_else(|| StoreError::NotFound(DEMOGRAPHIC_NOT_FOUND.to_string()))?;
                record.location = location;
                *slot = record.clone();
                Ok(record)
            })
            .await
    }

    pub async fn delete_404(&self, location: &str) -> Result<DemographicData, StoreError> {
        let location = location.to_string();
        self.store
            .mutate(Operation::Delete, move |doc| {
                let index = doc
                    .demographic_data
                    .iter()
                    .position(|d| d.location == location)
                    .ok_or_else(|| StoreError::NotFound(DEMOGRAPHIC_NOT_FOUND.to_string()))?;
                Ok(doc.demographic_data.remove(index))
            })
            .await
    }
}
