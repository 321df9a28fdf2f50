use std::sync::Arc;

use crate::auth::UserDirectory;
use crate::config::AppConfig;
use crate::database::{DemographicRepository, DocumentStore, RealEstateRepository};
use crate::services::{ListrikClient, ListrikService};

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<UserDirectory>,
    pub real_estate: RealEstateRepository,
    pub demographic: DemographicRepository,
    pub listrik: ListrikService,
}

impl AppState {
    pub fn new(config: AppConfig, store: DocumentStore, users: UserDirectory) -> anyhow::Result<Self> {
        let store = Arc::new(store);
        let real_estate = RealEstateRepository::new(store.clone());
        let client = ListrikClient::new(&config.upstream)?;

        Ok(Self {
            users: Arc::new(users),
            demographic: DemographicRepository::new(store),
            listrik: ListrikService::new(client, real_estate.clone()),
            real_estate,
            config: Arc::new(config),
        })
    }

    /// Load the data file and user directory named by `config`
    pub async fn load(config: AppConfig) -> anyhow::Result<Self> {
        config
            .upstream_url()
            .map_err(|e| anyhow::anyhow!("invalid upstream URL '{}': {}", config.upstream.base_url, e))?;

        let store = DocumentStore::open(&config.storage.data_path).await?;
        let users = UserDirectory::load(&config.storage.users_path).await?;
        Self::new(config, store, users)
    }
}
