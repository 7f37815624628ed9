//! Candidate-label subdomain discovery.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};

use crate::traits::{DnsResolve, HttpProbe, ProbeError};
use crate::types::{DnsAnswer, DnsRecordType, Subdomain};

/// Discovers live subdomains by resolving a configurable candidate label set.
///
/// Contract notes:
/// - only labels that resolved are returned, in candidate-list order;
/// - candidates are checked concurrently, and a label that fails to resolve
///   (for any reason) is skipped without affecting the rest of the batch;
/// - when a prober is wired in, each resolved label is additionally probed
///   over HTTP; a failed probe leaves the label in the result with
///   `is_alive = false`.
pub struct SubdomainCollector {
    resolver: Arc<dyn DnsResolve>,
    prober: Option<Arc<dyn HttpProbe>>,
    labels: Vec<String>,
    lookup_timeout: Duration,
    probe_timeout: Duration,
}

impl SubdomainCollector {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn DnsResolve>,
        prober: Option<Arc<dyn HttpProbe>>,
        labels: Vec<String>,
        lookup_timeout: Duration,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            prober,
            labels,
            lookup_timeout,
            probe_timeout,
        }
    }

    /// Try every candidate label against `domain` concurrently.
    pub async fn collect(&self, domain: &str) -> Vec<Subdomain> {
        let candidates = self.labels.iter().map(|label| {
            let full_domain = format!("{label}.{domain}");
            async move {
                let response = match self
                    .resolver
                    .lookup(&full_domain, DnsRecordType::A, self.lookup_timeout)
                    .await
                {
                    Ok(response) => response,
                    Err(err) => {
                        debug!("Subdomain candidate {full_domain} did not resolve: {err}");
                        return None;
                    }
                };

                let Some(ip_address) = response.answers.iter().find_map(|answer| match answer {
                    DnsAnswer::A(ip) => Some(ip.to_string()),
                    _ => None,
                }) else {
                    debug!("Subdomain candidate {full_domain} returned no address records");
                    return None;
                };

                let (is_alive, http_status) = self.probe(&full_domain).await;

                Some(Subdomain {
                    subdomain_name: label.clone(),
                    full_domain,
                    ip_address: Some(ip_address),
                    is_alive,
                    http_status,
                })
            }
        });

        // join_all keeps candidate-list order regardless of completion order.
        let found: Vec<Subdomain> = join_all(candidates).await.into_iter().flatten().collect();

        debug!(
            "Subdomain discovery complete for {domain}: found {} of {} candidates",
            found.len(),
            self.labels.len()
        );
        found
    }

    async fn probe(&self, host: &str) -> (bool, Option<u16>) {
        let Some(prober) = &self.prober else {
            return (false, None);
        };
        match prober.probe(host, self.probe_timeout).await {
            Ok(status) => (true, Some(status)),
            Err(ProbeError::Timeout) => {
                warn!("HTTP probe timed out for {host}");
                (false, None)
            }
            Err(ProbeError::Unreachable(msg)) => {
                debug!("HTTP probe failed for {host}: {msg}");
                (false, None)
            }
        }
    }
}
