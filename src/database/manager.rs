use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::database::models::{DemographicData, RealEstate};
use crate::types::Operation;

/// Errors from DocumentStore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Failed to access data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data file: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk shape of the data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "realEstate", default)]
    pub real_estate: Vec<RealEstate>,
    #[serde(rename = "demographicData", default)]
    pub demographic_data: Vec<DemographicData>,
    /// Other top-level keys survive rewrites untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// In-memory collections paired with the file they are persisted to.
///
/// Every mutation holds the lock across mutate and persist, so concurrent
/// writers are serialized and the file always reflects the last committed state.
pub struct DocumentStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl DocumentStore {
    /// Load the document once; a missing file starts empty
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Document>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Data file {} not found, starting with empty collections", path.display());
                Document::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!(
            "Loaded {} real estate listings and {} demographic records from {}",
            document.real_estate.len(),
            document.demographic_data.len(),
            path.display()
        );

        Ok(Self::with_document(path, document))
    }

    pub fn with_document(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            document: Mutex::new(document),
        }
    }

    /// Run a read-only closure against the current document
    pub async fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        let document = self.document.lock().await;
        f(&document)
    }

    /// Apply `f` to a working copy, rewrite the file, then commit the copy.
    ///
    /// If `f` fails or the write fails, the in-memory document is unchanged.
    pub async fn mutate<T>(
        &self,
        operation: Operation,
        f: impl FnOnce(&mut Document) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut document = self.document.lock().await;

        let mut working = document.clone();
        let result = f(&mut working)?;

        self.persist(&working).await?;
        *document = working;

        info!("{:?} committed to {}", operation, self.path.display());
        Ok(result)
    }

    async fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&self.path, content).await.map_err(|source| {
            error!("Failed to write data file {}: {}", self.path.display(), source);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}
