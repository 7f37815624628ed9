//! Test helpers: scripted capability mocks and an in-memory store.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::config::ScannerConfig;
use crate::traits::{
    DnsLookupError, DnsResolve, HttpProbe, ProbeError, ScanStore, StoreError, StoreResult,
    WhoisLookup, WhoisLookupError,
};
use crate::types::{
    DnsRecord, DnsRecordType, DnsResponse, Domain, OneOrMany, RawWhois, Scan, ScanReport,
    ScanStatus, Subdomain, WhoisSummary,
};

/// Scanner config with a short label list, so subdomain tests stay readable.
pub fn test_config() -> ScannerConfig {
    ScannerConfig {
        subdomain_labels: vec!["www".to_string(), "mail".to_string()],
        ..ScannerConfig::default()
    }
}

/// Minimal raw WHOIS record that passes the registered-name check.
pub fn registered_whois(domain: &str) -> RawWhois {
    RawWhois {
        domain_name: Some(OneOrMany::One(domain.to_uppercase())),
        registrar: Some(OneOrMany::One("Test Registrar Inc.".to_string())),
        raw: Some(format!("Domain Name: {domain}")),
        ..RawWhois::default()
    }
}

// ===== MockResolver =====

/// Scripted resolver: maps (domain, record type) to a canned outcome and
/// records every query. Unscripted queries answer
/// [`DnsLookupError::NoRecords`].
pub struct MockResolver {
    outcomes: RwLock<HashMap<(String, DnsRecordType), Result<DnsResponse, DnsLookupError>>>,
    calls: Mutex<Vec<(String, DnsRecordType)>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            outcomes: RwLock::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn script(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        outcome: Result<DnsResponse, DnsLookupError>,
    ) {
        self.outcomes
            .write()
            .await
            .insert((domain.to_string(), record_type), outcome);
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl DnsResolve for MockResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        _timeout: Duration,
    ) -> Result<DnsResponse, DnsLookupError> {
        self.calls
            .lock()
            .await
            .push((domain.to_string(), record_type));
        self.outcomes
            .read()
            .await
            .get(&(domain.to_string(), record_type))
            .cloned()
            .unwrap_or(Err(DnsLookupError::NoRecords))
    }
}

// ===== MockWhois =====

/// Returns one fixed outcome for every lookup.
pub struct MockWhois {
    outcome: Result<RawWhois, WhoisLookupError>,
}

impl MockWhois {
    pub fn new(outcome: Result<RawWhois, WhoisLookupError>) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl WhoisLookup for MockWhois {
    async fn lookup(&self, _domain: &str) -> Result<RawWhois, WhoisLookupError> {
        self.outcome.clone()
    }
}

// ===== MockProbe =====

/// Returns one fixed outcome for every probe.
pub struct MockProbe {
    outcome: Result<u16, ProbeError>,
}

impl MockProbe {
    pub fn new(outcome: Result<u16, ProbeError>) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl HttpProbe for MockProbe {
    async fn probe(&self, _host: &str, _timeout: Duration) -> Result<u16, ProbeError> {
        self.outcome.clone()
    }
}

// ===== MockScanStore =====

#[derive(Default)]
struct StoreState {
    domains: Vec<Domain>,
    scans: Vec<Scan>,
    dns_records: HashMap<i64, Vec<DnsRecord>>,
    whois_records: HashMap<i64, WhoisSummary>,
    subdomains: HashMap<i64, Vec<Subdomain>>,
    next_domain_id: i64,
    next_scan_id: i64,
}

/// In-memory [`ScanStore`] with injectable failures for orchestrator tests.
pub struct MockScanStore {
    state: RwLock<StoreState>,
    /// When set, finalizing with `Completed` fails with this message; the
    /// follow-up `Failed` finalize still succeeds.
    completed_finalize_error: RwLock<Option<String>>,
    /// When set, every record append fails with this message.
    append_error: RwLock<Option<String>>,
    /// When set, `create_domain` inserts the row but reports a duplicate, as
    /// a lost unique-constraint race would.
    duplicate_on_create: RwLock<bool>,
}

impl MockScanStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                next_domain_id: 1,
                next_scan_id: 1,
                ..StoreState::default()
            }),
            completed_finalize_error: RwLock::new(None),
            append_error: RwLock::new(None),
            duplicate_on_create: RwLock::new(false),
        }
    }

    pub async fn fail_completed_finalize(&self, message: &str) {
        *self.completed_finalize_error.write().await = Some(message.to_string());
    }

    pub async fn fail_appends(&self, message: &str) {
        *self.append_error.write().await = Some(message.to_string());
    }

    pub async fn force_duplicate_on_create(&self) {
        *self.duplicate_on_create.write().await = true;
    }

    pub async fn domain_count(&self) -> usize {
        self.state.read().await.domains.len()
    }

    pub async fn scan_count(&self) -> usize {
        self.state.read().await.scans.len()
    }

    async fn check_append_error(&self) -> StoreResult<()> {
        if let Some(ref msg) = *self.append_error.read().await {
            return Err(StoreError::Backend(msg.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ScanStore for MockScanStore {
    async fn find_domain_by_name(&self, name: &str) -> StoreResult<Option<Domain>> {
        Ok(self
            .state
            .read()
            .await
            .domains
            .iter()
            .find(|domain| domain.domain_name == name)
            .cloned())
    }

    async fn create_domain(&self, name: &str) -> StoreResult<Domain> {
        let mut state = self.state.write().await;
        if state.domains.iter().any(|domain| domain.domain_name == name) {
            return Err(StoreError::Duplicate(name.to_string()));
        }
        let now = Utc::now();
        let domain = Domain {
            id: state.next_domain_id,
            domain_name: name.to_string(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        state.next_domain_id += 1;
        state.domains.push(domain.clone());
        if *self.duplicate_on_create.read().await {
            // The row exists (someone else won the race), but this insert
            // reports the constraint violation.
            return Err(StoreError::Duplicate(name.to_string()));
        }
        Ok(domain)
    }

    async fn find_domain(&self, id: i64) -> StoreResult<Option<Domain>> {
        Ok(self
            .state
            .read()
            .await
            .domains
            .iter()
            .find(|domain| domain.id == id)
            .cloned())
    }

    async fn list_domains(&self, offset: u64, limit: u64) -> StoreResult<(Vec<Domain>, u64)> {
        let state = self.state.read().await;
        let active: Vec<Domain> = state
            .domains
            .iter()
            .filter(|domain| domain.is_active)
            .cloned()
            .collect();
        let total = active.len() as u64;
        let page = active
            .into_iter()
            .skip(usize::try_from(offset).unwrap())
            .take(usize::try_from(limit).unwrap())
            .collect();
        Ok((page, total))
    }

    async fn deactivate_domain(&self, id: i64) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let domain = state
            .domains
            .iter_mut()
            .find(|domain| domain.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("domain {id}")))?;
        domain.is_active = false;
        domain.updated_at = Utc::now();
        Ok(())
    }

    async fn create_scan(&self, domain_id: i64, started_at: DateTime<Utc>) -> StoreResult<Scan> {
        let mut state = self.state.write().await;
        let scan = Scan {
            id: state.next_scan_id,
            domain_id,
            started_at,
            completed_at: None,
            status: ScanStatus::Running,
            error_message: None,
        };
        state.next_scan_id += 1;
        state.scans.push(scan.clone());
        Ok(scan)
    }

    async fn append_dns_records(&self, scan_id: i64, records: &[DnsRecord]) -> StoreResult<()> {
        self.check_append_error().await?;
        self.state
            .write()
            .await
            .dns_records
            .entry(scan_id)
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }

    async fn insert_whois_record(&self, scan_id: i64, whois: &WhoisSummary) -> StoreResult<()> {
        self.check_append_error().await?;
        let mut state = self.state.write().await;
        if state.whois_records.contains_key(&scan_id) {
            return Err(StoreError::Duplicate(format!("whois for scan {scan_id}")));
        }
        state.whois_records.insert(scan_id, whois.clone());
        Ok(())
    }

    async fn append_subdomains(&self, scan_id: i64, subdomains: &[Subdomain]) -> StoreResult<()> {
        self.check_append_error().await?;
        self.state
            .write()
            .await
            .subdomains
            .entry(scan_id)
            .or_default()
            .extend_from_slice(subdomains);
        Ok(())
    }

    async fn finalize_scan(
        &self,
        scan_id: i64,
        status: ScanStatus,
        completed_at: DateTime<Utc>,
        error_message: Option<String>,
    ) -> StoreResult<()> {
        if status == ScanStatus::Completed {
            if let Some(ref msg) = *self.completed_finalize_error.read().await {
                return Err(StoreError::Backend(msg.clone()));
            }
        }
        let mut state = self.state.write().await;
        let scan = state
            .scans
            .iter_mut()
            .find(|scan| scan.id == scan_id)
            .ok_or_else(|| StoreError::NotFound(format!("scan {scan_id}")))?;
        scan.status = status;
        scan.completed_at = Some(completed_at);
        scan.error_message = error_message;
        Ok(())
    }

    async fn find_scan(&self, scan_id: i64) -> StoreResult<Option<Scan>> {
        Ok(self
            .state
            .read()
            .await
            .scans
            .iter()
            .find(|scan| scan.id == scan_id)
            .cloned())
    }

    async fn load_report(&self, scan_id: i64) -> StoreResult<Option<ScanReport>> {
        let state = self.state.read().await;
        let Some(scan) = state.scans.iter().find(|scan| scan.id == scan_id).cloned() else {
            return Ok(None);
        };
        let domain = state
            .domains
            .iter()
            .find(|domain| domain.id == scan.domain_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("domain {}", scan.domain_id)))?;
        Ok(Some(ScanReport {
            dns_records: state.dns_records.get(&scan_id).cloned().unwrap_or_default(),
            whois: state.whois_records.get(&scan_id).cloned(),
            subdomains: state.subdomains.get(&scan_id).cloned().unwrap_or_default(),
            scan,
            domain,
        }))
    }

    async fn list_scans(&self, offset: u64, limit: u64) -> StoreResult<Vec<Scan>> {
        let state = self.state.read().await;
        let mut scans = state.scans.clone();
        scans.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        Ok(scans
            .into_iter()
            .skip(usize::try_from(offset).unwrap())
            .take(usize::try_from(limit).unwrap())
            .collect())
    }
}
