//! Shared application state injected into request handlers.

use std::sync::Arc;

use domain_intel_core::{DomainService, ScanService};
use sea_orm::DatabaseConnection;

pub struct AppState {
    pub scan_service: Arc<ScanService>,
    pub domain_service: Arc<DomainService>,
    /// Kept alongside the services for the health check's connectivity ping.
    pub db: DatabaseConnection,
}
