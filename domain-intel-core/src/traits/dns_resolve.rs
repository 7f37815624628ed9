//! DNS resolution capability abstraction.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{DnsRecordType, DnsResponse};

/// Outcome of a failed DNS query, one variant per condition the DNS
/// collector distinguishes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsLookupError {
    /// The queried name does not exist at all (NXDOMAIN).
    #[error("domain does not exist")]
    NxDomain,

    /// The name exists but publishes no records of the queried type.
    #[error("no records of this type")]
    NoRecords,

    /// No nameserver could be reached for the query.
    #[error("no nameservers could be reached")]
    NoNameservers,

    /// The query exceeded its timeout.
    #[error("query timed out")]
    Timeout,

    /// Anything else.
    #[error("lookup failed: {0}")]
    Other(String),
}

/// DNS resolution capability.
///
/// Implementations: [`HickoryResolver`](crate::net::HickoryResolver) over the
/// system resolver; scripted mocks in tests.
#[async_trait]
pub trait DnsResolve: Send + Sync {
    /// Query `record_type` for `domain`, bounded by `timeout`.
    async fn lookup(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, DnsLookupError>;
}
