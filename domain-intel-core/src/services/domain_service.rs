//! Domain catalogue management service.

use std::sync::Arc;

use log::info;

use crate::config::normalize_domain_name;
use crate::error::{CoreError, CoreResult};
use crate::traits::{ScanStore, StoreError};
use crate::types::Domain;

/// Reads and maintains the domain catalogue independent of scanning.
pub struct DomainService {
    store: Arc<dyn ScanStore>,
}

impl DomainService {
    #[must_use]
    pub fn new(store: Arc<dyn ScanStore>) -> Self {
        Self { store }
    }

    /// Active domains plus the total active count.
    pub async fn list_domains(&self, offset: u64, limit: u64) -> CoreResult<(Vec<Domain>, u64)> {
        Ok(self.store.list_domains(offset, limit).await?)
    }

    /// Register a domain without scanning it.
    pub async fn register_domain(&self, name: &str) -> CoreResult<Domain> {
        let name = normalize_domain_name(name)?;
        match self.store.create_domain(&name).await {
            Ok(domain) => {
                info!("Created new domain: {name}");
                Ok(domain)
            }
            Err(StoreError::Duplicate(_)) => Err(CoreError::DomainExists(name)),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_domain(&self, id: i64) -> CoreResult<Domain> {
        self.store
            .find_domain(id)
            .await?
            .ok_or(CoreError::DomainNotFound(id))
    }

    /// Soft delete: the row and its scan history stay behind.
    pub async fn deactivate_domain(&self, id: i64) -> CoreResult<()> {
        match self.store.deactivate_domain(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(CoreError::DomainNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
