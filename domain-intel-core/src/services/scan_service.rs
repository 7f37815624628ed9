//! Scan orchestration service.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info};

use crate::collectors::{DnsCollector, SubdomainCollector, WhoisCollector};
use crate::config::{normalize_domain_name, ScannerConfig};
use crate::error::{CoreError, CoreResult};
use crate::traits::{DnsResolve, HttpProbe, ScanStore, StoreError, WhoisLookup};
use crate::types::{Domain, Scan, ScanReport, ScanStatus};

/// Drives one scan end to end: domain row, collector runs, result rows,
/// terminal status.
///
/// State machine per scan: `pending -> running -> {completed | failed}`.
/// Terminal states are final; a failed scan is not retried -- callers start a
/// new scan.
pub struct ScanService {
    store: Arc<dyn ScanStore>,
    dns: DnsCollector,
    whois: WhoisCollector,
    subdomains: SubdomainCollector,
}

impl ScanService {
    /// Wire the service from a configuration value and capability handles.
    #[must_use]
    pub fn new(
        config: &ScannerConfig,
        store: Arc<dyn ScanStore>,
        resolver: Arc<dyn DnsResolve>,
        whois: Arc<dyn WhoisLookup>,
        prober: Option<Arc<dyn HttpProbe>>,
    ) -> Self {
        Self {
            dns: DnsCollector::new(resolver.clone(), config.lookup_timeout),
            whois: WhoisCollector::new(whois),
            subdomains: SubdomainCollector::new(
                resolver,
                prober,
                config.subdomain_labels.clone(),
                config.lookup_timeout,
                config.probe_timeout,
            ),
            store,
        }
    }

    /// Run a scan for `domain_name`.
    ///
    /// Every call appends a new scan under the (created-on-first-use) domain
    /// row; scans are history, never upserts. Collector failures degrade the
    /// result; storage failures finalize the scan as failed and surface as
    /// [`CoreError::ScanFailed`].
    pub async fn run_scan(
        &self,
        domain_name: &str,
        include_whois: bool,
        include_subdomains: bool,
    ) -> CoreResult<ScanReport> {
        let name = normalize_domain_name(domain_name)?;
        info!("Starting scan for {name}");

        let domain = self.find_or_create_domain(&name).await?;
        let scan = self.store.create_scan(domain.id, Utc::now()).await?;
        info!("Created scan {} for {name}", scan.id);

        if let Err(err) = self
            .run_collectors(&scan, &name, include_whois, include_subdomains)
            .await
        {
            return Err(self.fail_scan(scan.id, &err).await);
        }

        match self
            .store
            .finalize_scan(scan.id, ScanStatus::Completed, Utc::now(), None)
            .await
        {
            Ok(()) => info!("Scan {} completed for {name}", scan.id),
            Err(err) => return Err(self.fail_scan(scan.id, &err).await),
        }

        self.load_report_for(scan.id).await
    }

    /// Aggregated result of a previously created scan.
    pub async fn get_scan_report(&self, scan_id: i64) -> CoreResult<ScanReport> {
        self.load_report_for(scan_id).await
    }

    /// Scans most-recent-first.
    pub async fn list_scans(&self, offset: u64, limit: u64) -> CoreResult<Vec<Scan>> {
        Ok(self.store.list_scans(offset, limit).await?)
    }

    /// The per-scan collection steps: DNS always, WHOIS and subdomains on
    /// request. Collector calls cannot fail; only persistence can.
    async fn run_collectors(
        &self,
        scan: &Scan,
        name: &str,
        include_whois: bool,
        include_subdomains: bool,
    ) -> Result<(), StoreError> {
        let dns_records = self.dns.collect(name).await;
        self.store.append_dns_records(scan.id, &dns_records).await?;

        if include_whois {
            if let Some(whois) = self.whois.collect(name).await {
                self.store.insert_whois_record(scan.id, &whois).await?;
            }
        }

        if include_subdomains {
            let subdomains = self.subdomains.collect(name).await;
            self.store.append_subdomains(scan.id, &subdomains).await?;
        }

        Ok(())
    }

    /// Mark the scan failed (best effort) and build the caller-facing error.
    /// The scan row keeps recording the attempt even when the caller only
    /// sees an error response.
    async fn fail_scan(&self, scan_id: i64, cause: &StoreError) -> CoreError {
        let message = cause.to_string();
        error!("Scan {scan_id} failed: {message}");
        if let Err(err) = self
            .store
            .finalize_scan(
                scan_id,
                ScanStatus::Failed,
                Utc::now(),
                Some(message.clone()),
            )
            .await
        {
            error!("Could not record failure for scan {scan_id}: {err}");
        }
        CoreError::ScanFailed { scan_id, message }
    }

    /// Resolve the domain row, tolerating a concurrent create of the same
    /// name: the first writer wins and the loser re-reads the winner's row.
    async fn find_or_create_domain(&self, name: &str) -> CoreResult<Domain> {
        if let Some(existing) = self.store.find_domain_by_name(name).await? {
            return Ok(existing);
        }
        match self.store.create_domain(name).await {
            Ok(created) => {
                info!("Created new domain: {name}");
                Ok(created)
            }
            Err(StoreError::Duplicate(_)) => self
                .store
                .find_domain_by_name(name)
                .await?
                .ok_or_else(|| {
                    CoreError::StorageError(format!(
                        "domain {name} vanished after duplicate insert"
                    ))
                }),
            Err(err) => Err(err.into()),
        }
    }

    async fn load_report_for(&self, scan_id: i64) -> CoreResult<ScanReport> {
        self.store
            .load_report(scan_id)
            .await?
            .ok_or(CoreError::ScanNotFound(scan_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{
        registered_whois, test_config, MockResolver, MockScanStore, MockWhois,
    };
    use crate::traits::WhoisLookupError;
    use crate::types::{DnsAnswer, DnsRecordType, DnsResponse};

    fn service_over(
        store: &Arc<MockScanStore>,
        resolver: &Arc<MockResolver>,
        whois: Result<crate::types::RawWhois, WhoisLookupError>,
    ) -> ScanService {
        ScanService::new(
            &test_config(),
            store.clone(),
            resolver.clone(),
            Arc::new(MockWhois::new(whois)),
            None,
        )
    }

    async fn script_basic_dns(resolver: &MockResolver, domain: &str) {
        resolver
            .script(
                domain,
                DnsRecordType::A,
                Ok(DnsResponse {
                    answers: vec![DnsAnswer::A("93.184.216.34".parse().unwrap())],
                    ttl: 300,
                }),
            )
            .await;
        resolver
            .script(
                domain,
                DnsRecordType::Mx,
                Ok(DnsResponse {
                    answers: vec![DnsAnswer::Mx {
                        preference: 10,
                        exchange: "mail.example.com.".to_string(),
                    }],
                    ttl: 600,
                }),
            )
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_scan_with_whois() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        script_basic_dns(&resolver, "example.com").await;

        let service = service_over(&store, &resolver, Ok(registered_whois("example.com")));
        let report = service.run_scan("example.com", true, false).await.unwrap();

        assert_eq!(report.scan.status, ScanStatus::Completed);
        assert!(report.scan.completed_at.is_some());
        assert_eq!(report.dns_records.len(), 2);
        assert!(report.whois.is_some());
        assert!(report.subdomains.is_empty());
        assert_eq!(report.domain.domain_name, "example.com");
    }

    #[tokio::test]
    async fn test_rescans_share_one_domain_row() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Ok(registered_whois("example.com")));

        let first = service.run_scan("example.com", false, false).await.unwrap();
        let second = service
            .run_scan("EXAMPLE.COM", false, false)
            .await
            .unwrap();

        assert_ne!(first.scan.id, second.scan.id);
        assert_eq!(first.domain.id, second.domain.id);
        assert_eq!(store.domain_count().await, 1);
        assert_eq!(store.scan_count().await, 2);
    }

    #[tokio::test]
    async fn test_whois_no_data_still_completes() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let report = service.run_scan("example.com", true, false).await.unwrap();

        assert_eq!(report.scan.status, ScanStatus::Completed);
        assert!(report.whois.is_none());
    }

    #[tokio::test]
    async fn test_failed_status_commit_records_failed_scan() {
        let store = Arc::new(MockScanStore::new());
        store
            .fail_completed_finalize("database connection lost")
            .await;
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let err = service
            .run_scan("example.com", false, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ScanFailed { .. }));

        // Re-read the scan independently of the service.
        let scan = store.find_scan(1).await.unwrap().unwrap();
        assert_eq!(scan.status, ScanStatus::Failed);
        assert!(scan.error_message.is_some());
        assert!(scan.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_append_failure_records_failed_scan() {
        let store = Arc::new(MockScanStore::new());
        store.fail_appends("disk full").await;
        let resolver = Arc::new(MockResolver::new());
        script_basic_dns(&resolver, "example.com").await;
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let err = service
            .run_scan("example.com", false, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ScanFailed { .. }));

        let scan = store.find_scan(1).await.unwrap().unwrap();
        assert_eq!(scan.status, ScanStatus::Failed);
        assert!(scan
            .error_message
            .as_deref()
            .unwrap()
            .contains("disk full"));
    }

    #[tokio::test]
    async fn test_domain_create_race_rereads_winner() {
        let store = Arc::new(MockScanStore::new());
        store.force_duplicate_on_create().await;
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let report = service.run_scan("example.com", false, false).await.unwrap();

        assert_eq!(report.domain.domain_name, "example.com");
        assert_eq!(store.domain_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_domain_name_rejected_before_any_row() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let err = service.run_scan("ab", false, false).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(store.domain_count().await, 0);
        assert_eq!(store.scan_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_scan_report_not_found() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        let err = service.get_scan_report(99).await.unwrap_err();
        assert!(matches!(err, CoreError::ScanNotFound(99)));
    }

    #[tokio::test]
    async fn test_list_scans_most_recent_first() {
        let store = Arc::new(MockScanStore::new());
        let resolver = Arc::new(MockResolver::new());
        let service = service_over(&store, &resolver, Err(WhoisLookupError::NoRegistration));

        service.run_scan("example.com", false, false).await.unwrap();
        service.run_scan("example.org", false, false).await.unwrap();

        let scans = service.list_scans(0, 10).await.unwrap();
        assert_eq!(scans.len(), 2);
        assert!(scans[0].id > scans[1].id);
    }
}
