use serde::Serialize;

use crate::database::models::RealEstate;
use crate::database::RealEstateRepository;
use crate::services::listrik_client::{ElectricityReading, ListrikClient, Relayed, UpstreamError};

#[derive(Debug, thiserror::Error)]
pub enum ListrikError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Every real estate already has electricity data ({readings} readings for {listings} listings)")]
    ListingCapacity { readings: usize, listings: usize },
}

/// A listing with the readings correlated to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingUsage {
    #[serde(rename = "realEstate")]
    pub real_estate: RealEstate,
    #[serde(rename = "dataListrik")]
    pub readings: Vec<ElectricityReading>,
}

/// Tag reading `i` with the id of listing `i`; readings past the last listing get `None`.
///
/// This assumes the upstream returns readings in the same order the listings are
/// stored locally. Nothing checks that assumption.
pub fn correlate_by_position(
    mut readings: Vec<ElectricityReading>,
    listings: &[RealEstate],
) -> Vec<ElectricityReading> {
    for (index, reading) in readings.iter_mut().enumerate() {
        reading.real_estate_id = listings.get(index).map(|l| l.id);
    }
    readings
}

/// Pair every listing with the readings whose `real_estate_id` equals its id
pub fn pair_with_listings(listings: Vec<RealEstate>, readings: &[ElectricityReading]) -> Vec<ListingUsage> {
    listings
        .into_iter()
        .map(|listing| {
            let matching = readings
                .iter()
                .filter(|r| r.real_estate_id == Some(listing.id))
                .cloned()
                .collect();
            ListingUsage {
                real_estate: listing,
                readings: matching,
            }
        })
        .collect()
}

/// Bridges local listings with the upstream electricity service
#[derive(Clone)]
pub struct ListrikService {
    client: ListrikClient,
    listings: RealEstateRepository,
}

impl ListrikService {
    pub fn new(client: ListrikClient, listings: RealEstateRepository) -> Self {
        Self { client, listings }
    }

    pub async fn usage_by_listing(&self, token: &str) -> Result<Vec<ListingUsage>, ListrikError> {
        let readings = self.client.list(token).await?;
        let listings = self.listings.select_all().await;

        let readings = correlate_by_position(readings, &listings);
        Ok(pair_with_listings(listings, &readings))
    }

    /// Forward a new reading, allowing at most one reading per listing.
    ///
    /// Without an explicit `realEstateID` the reading is tagged with the listing
    /// it will line up with positionally.
    pub async fn create_reading(
        &self,
        token: &str,
        mut reading: ElectricityReading,
    ) -> Result<Relayed, ListrikError> {
        let existing = self.client.list(token).await?;
        let listings = self.listings.select_all().await;

        if existing.len() >= listings.len() {
            tracing::warn!(
                "Rejecting electricity reading for '{}': {} readings for {} listings",
                reading.username,
                existing.len(),
                listings.len()
            );
            return Err(ListrikError::ListingCapacity {
                readings: existing.len(),
                listings: listings.len(),
            });
        }

        if reading.real_estate_id.is_none() {
            reading.real_estate_id = listings.get(existing.len()).map(|l| l.id);
        }

        Ok(self.client.create(token, &reading).await?)
    }

    pub async fn update_reading(&self, token: &str, reading: ElectricityReading) -> Result<Relayed, ListrikError> {
        Ok(self.client.update(token, &reading).await?)
    }

    pub async fn delete_reading(&self, token: &str, username: &str) -> Result<Relayed, ListrikError> {
        Ok(self.client.delete(token, username).await?)
    }
}
