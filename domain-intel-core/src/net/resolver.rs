//! System DNS resolution via Hickory.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    config::{ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::{rr::RData, rr::RecordType, ProtoErrorKind},
    ResolveError, TokioResolver,
};
use log::warn;

use crate::traits::{DnsLookupError, DnsResolve};
use crate::types::{DnsAnswer, DnsRecordType, DnsResponse};

/// [`DnsResolve`] implementation backed by a Hickory `TokioResolver`.
///
/// On Unix/Windows this uses the host system configuration (e.g.
/// `/etc/resolv.conf`). If the system configuration cannot be loaded, it
/// falls back to Hickory's default upstream set.
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: build_system_resolver(),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolve for HickoryResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, DnsLookupError> {
        let lookup = tokio::time::timeout(
            timeout,
            self.inner.lookup(domain, wire_type(record_type)),
        )
        .await
        .map_err(|_| DnsLookupError::Timeout)?
        .map_err(|err| classify_error(&err))?;

        let ttl = lookup
            .record_iter()
            .next()
            .map_or(0, hickory_resolver::proto::rr::Record::ttl);

        // Generic lookups can interleave CNAME chain entries with the
        // requested type; keep only answers of the queried type.
        let answers = lookup
            .record_iter()
            .filter_map(|record| convert_answer(record.data()))
            .filter(|answer| matches_type(answer, record_type))
            .collect();

        Ok(DnsResponse { answers, ttl })
    }
}

fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                warn!("Failed to load system DNS configuration, falling back to defaults: {e}");
            }
        }
    }

    let provider = TokioConnectionProvider::default();
    TokioResolver::builder_with_config(ResolverConfig::default(), provider)
        .with_options(ResolverOpts::default())
        .build()
}

fn wire_type(record_type: DnsRecordType) -> RecordType {
    match record_type {
        DnsRecordType::A => RecordType::A,
        DnsRecordType::Aaaa => RecordType::AAAA,
        DnsRecordType::Mx => RecordType::MX,
        DnsRecordType::Txt => RecordType::TXT,
        DnsRecordType::Ns => RecordType::NS,
        DnsRecordType::Cname => RecordType::CNAME,
        DnsRecordType::Soa => RecordType::SOA,
    }
}

fn classify_error(err: &ResolveError) -> DnsLookupError {
    if err.is_nx_domain() {
        return DnsLookupError::NxDomain;
    }
    if err.is_no_records_found() {
        return DnsLookupError::NoRecords;
    }
    if let Some(proto) = err.proto() {
        match proto.kind() {
            ProtoErrorKind::Timeout => return DnsLookupError::Timeout,
            ProtoErrorKind::NoConnections => return DnsLookupError::NoNameservers,
            _ => {}
        }
    }
    DnsLookupError::Other(err.to_string())
}

fn convert_answer(data: &RData) -> Option<DnsAnswer> {
    match data {
        RData::A(a) => Some(DnsAnswer::A(a.0)),
        RData::AAAA(aaaa) => Some(DnsAnswer::Aaaa(aaaa.0)),
        RData::MX(mx) => Some(DnsAnswer::Mx {
            preference: mx.preference(),
            exchange: mx.exchange().to_string(),
        }),
        RData::TXT(txt) => Some(DnsAnswer::Txt(
            txt.iter().map(|segment| segment.to_vec()).collect(),
        )),
        RData::NS(ns) => Some(DnsAnswer::Ns(ns.0.to_string())),
        RData::CNAME(cname) => Some(DnsAnswer::Cname(cname.0.to_string())),
        RData::SOA(soa) => Some(DnsAnswer::Soa {
            mname: soa.mname().to_string(),
            rname: soa.rname().to_string(),
            serial: soa.serial(),
        }),
        _ => None,
    }
}

fn matches_type(answer: &DnsAnswer, record_type: DnsRecordType) -> bool {
    matches!(
        (answer, record_type),
        (DnsAnswer::A(_), DnsRecordType::A)
            | (DnsAnswer::Aaaa(_), DnsRecordType::Aaaa)
            | (DnsAnswer::Mx { .. }, DnsRecordType::Mx)
            | (DnsAnswer::Txt(_), DnsRecordType::Txt)
            | (DnsAnswer::Ns(_), DnsRecordType::Ns)
            | (DnsAnswer::Cname(_), DnsRecordType::Cname)
            | (DnsAnswer::Soa { .. }, DnsRecordType::Soa)
    )
}
