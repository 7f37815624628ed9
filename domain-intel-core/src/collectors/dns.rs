//! DNS record collection for a scan.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};

use crate::normalize::normalize_answer;
use crate::traits::{DnsLookupError, DnsResolve};
use crate::types::{DnsRecord, DnsRecordType};

/// Collects the fixed set of DNS record types for a domain.
pub struct DnsCollector {
    resolver: Arc<dyn DnsResolve>,
    /// Applies independently to each record-type query.
    timeout: Duration,
}

impl DnsCollector {
    #[must_use]
    pub fn new(resolver: Arc<dyn DnsResolve>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Query every type in [`DnsRecordType::SCAN_ORDER`] and return the
    /// normalized records in query order.
    ///
    /// Always returns, possibly with an empty set. An NXDOMAIN answer aborts
    /// the remaining type queries: a name that does not exist cannot have any
    /// record type. Every other failure only skips the current type.
    pub async fn collect(&self, domain: &str) -> Vec<DnsRecord> {
        let mut records = Vec::new();

        for record_type in DnsRecordType::SCAN_ORDER {
            match self
                .resolver
                .lookup(domain, record_type, self.timeout)
                .await
            {
                Ok(response) => {
                    for answer in &response.answers {
                        let record = normalize_answer(record_type, answer, response.ttl);
                        debug!(
                            "Found {record_type} record for {domain}: {}",
                            record.record_value
                        );
                        records.push(record);
                    }
                }
                Err(DnsLookupError::NxDomain) => {
                    warn!("Domain {domain} does not exist (NXDOMAIN)");
                    break;
                }
                Err(DnsLookupError::NoRecords) => {
                    debug!("No {record_type} records for {domain}");
                }
                Err(DnsLookupError::NoNameservers) => {
                    warn!("No nameservers available for {domain}");
                }
                Err(DnsLookupError::Timeout) => {
                    warn!("Timeout querying {record_type} for {domain}");
                }
                Err(DnsLookupError::Other(msg)) => {
                    error!("Error querying {record_type} for {domain}: {msg}");
                }
            }
        }

        debug!(
            "DNS collection complete for {domain}: found {} records",
            records.len()
        );
        records
    }
}
