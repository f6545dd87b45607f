use thiserror::Error;

use crate::data_models::FlowerRecord;
use crate::db::FlowerRepo;

/// Lookup misses and store faults are distinct and must never be conflated:
/// a miss is user-correctable (404), a store fault is not (500).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("flower not found")]
    NotFound,
    #[error("catalog store error: {0}")]
    Store(anyhow::Error),
}

/// Resolves a flower name (primary or Korean alias) against the catalog.
/// Every call re-reads the store; records are never cached here.
pub struct CatalogResolver {
    flowers: FlowerRepo,
}

impl CatalogResolver {
    pub fn new(flowers: FlowerRepo) -> Self {
        Self { flowers }
    }

    /// Callers must only pass a non-empty, trimmed name.
    pub async fn resolve(&self, name: &str) -> Result<FlowerRecord, CatalogError> {
        match self.flowers.find_by_name(name).await {
            Ok(Some(flower)) => Ok(flower),
            Ok(None) => Err(CatalogError::NotFound),
            Err(e) => Err(CatalogError::Store(e)),
        }
    }
}
