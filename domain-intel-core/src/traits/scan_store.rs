//! Scan persistence abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::CoreError;
use crate::types::{DnsRecord, Domain, Scan, ScanReport, ScanStatus, Subdomain, WhoisSummary};

/// Storage layer failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. the domain name is
    /// already taken). Kept distinct from [`Backend`](Self::Backend) so the
    /// orchestrator can resolve the duplicate-create race.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The referenced row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything else from the backend.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

/// Storage layer Result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence port for domains, scans, and their result rows.
///
/// Platform implementations:
/// - Actix-Web: `SeaOrmScanStore` (SeaORM)
/// - Tests: `MockScanStore`
///
/// Deleting a scan cascades to its DNS, WHOIS, and subdomain rows; the
/// backing schema is responsible for enforcing that.
#[async_trait]
pub trait ScanStore: Send + Sync {
    /// Look up a domain by its exact (lowercased) name.
    async fn find_domain_by_name(&self, name: &str) -> StoreResult<Option<Domain>>;

    /// Insert a new active domain row.
    ///
    /// Must fail with [`StoreError::Duplicate`] when the name is already
    /// taken, so a concurrent create of the same name can be detected.
    async fn create_domain(&self, name: &str) -> StoreResult<Domain>;

    async fn find_domain(&self, id: i64) -> StoreResult<Option<Domain>>;

    /// Active domains, paginated, plus the total active count.
    async fn list_domains(&self, offset: u64, limit: u64) -> StoreResult<(Vec<Domain>, u64)>;

    /// Clear the active flag. Domains are never hard-deleted.
    async fn deactivate_domain(&self, id: i64) -> StoreResult<()>;

    /// Insert a scan in `running` state under the domain.
    async fn create_scan(&self, domain_id: i64, started_at: DateTime<Utc>) -> StoreResult<Scan>;

    async fn append_dns_records(&self, scan_id: i64, records: &[DnsRecord]) -> StoreResult<()>;

    /// At most one WHOIS row per scan.
    async fn insert_whois_record(&self, scan_id: i64, whois: &WhoisSummary) -> StoreResult<()>;

    async fn append_subdomains(&self, scan_id: i64, subdomains: &[Subdomain]) -> StoreResult<()>;

    /// Write the terminal status, completion time, and error detail in one
    /// operation, so readers never observe a terminal status without a
    /// completion time.
    async fn finalize_scan(
        &self,
        scan_id: i64,
        status: ScanStatus,
        completed_at: DateTime<Utc>,
        error_message: Option<String>,
    ) -> StoreResult<()>;

    async fn find_scan(&self, scan_id: i64) -> StoreResult<Option<Scan>>;

    /// The scan plus all owned result rows, or `None` when the scan is
    /// absent.
    async fn load_report(&self, scan_id: i64) -> StoreResult<Option<ScanReport>>;

    /// Scans most-recent-first.
    async fn list_scans(&self, offset: u64, limit: u64) -> StoreResult<Vec<Scan>>;
}
