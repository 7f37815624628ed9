//! WHOIS collection and field normalization for a scan.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{error, warn};

use crate::traits::{WhoisLookup, WhoisLookupError};
use crate::types::{OneOrMany, RawWhois, WhoisDate, WhoisSummary};

/// Collects registration data for a domain.
///
/// Registry-side inconsistency is treated as absence of data; the collector
/// never returns an error.
pub struct WhoisCollector {
    client: Arc<dyn WhoisLookup>,
}

impl WhoisCollector {
    #[must_use]
    pub fn new(client: Arc<dyn WhoisLookup>) -> Self {
        Self { client }
    }

    /// Look up and normalize WHOIS data, or `None` when the registry has
    /// nothing usable.
    pub async fn collect(&self, domain: &str) -> Option<WhoisSummary> {
        let raw = match self.client.lookup(domain).await {
            Ok(raw) => raw,
            Err(WhoisLookupError::NoRegistration) => {
                warn!("No WHOIS registration for {domain}");
                return None;
            }
            Err(WhoisLookupError::Unparseable(msg)) => {
                warn!("WHOIS parse error for {domain}: {msg}");
                return None;
            }
            Err(WhoisLookupError::Other(msg)) => {
                error!("WHOIS lookup failed for {domain}: {msg}");
                return None;
            }
        };

        // A response without a registered name means the domain is not
        // registered, which is not an error.
        if !has_domain_name(&raw) {
            warn!("No WHOIS data found for {domain}");
            return None;
        }

        Some(summarize(raw))
    }
}

fn has_domain_name(raw: &RawWhois) -> bool {
    match &raw.domain_name {
        Some(OneOrMany::One(name)) => !name.is_empty(),
        Some(OneOrMany::Many(names)) => names.iter().any(|name| !name.is_empty()),
        None => false,
    }
}

/// Collapse the heterogeneous raw field shapes into single representative
/// values.
fn summarize(raw: RawWhois) -> WhoisSummary {
    WhoisSummary {
        registrar: first_string(raw.registrar),
        creation_date: first_date(raw.creation_date),
        expiration_date: first_date(raw.expiration_date),
        updated_date: first_date(raw.updated_date),
        name_servers: normalize_name_servers(raw.name_servers),
        registrant_country: first_string(raw.registrant_country),
        raw_data: raw.raw,
    }
}

fn first_string(field: Option<OneOrMany<String>>) -> Option<String> {
    field.and_then(OneOrMany::into_first)
}

/// First date entry, parsed to a timestamp; unparseable text becomes `None`
/// rather than an error.
fn first_date(field: Option<OneOrMany<WhoisDate>>) -> Option<DateTime<Utc>> {
    match field.and_then(OneOrMany::into_first)? {
        WhoisDate::Timestamp(ts) => Some(ts),
        WhoisDate::Text(text) => parse_date_text(&text),
    }
}

/// Parse the date shapes registries actually emit.
fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    // "2003-03-17 12:20:05" (.cn and friends)
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    // Bare dates: "2000-01-01"
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

/// Lowercase, strip trailing root-dots, deduplicate, and sort name servers.
/// Empty input collapses to `None` for simple presence tests.
fn normalize_name_servers(field: Option<OneOrMany<String>>) -> Option<Vec<String>> {
    let mut servers: Vec<String> = field?
        .into_vec()
        .into_iter()
        .map(|ns| ns.trim().trim_end_matches('.').to_lowercase())
        .filter(|ns| !ns.is_empty())
        .collect();
    servers.sort();
    servers.dedup();
    if servers.is_empty() {
        None
    } else {
        Some(servers)
    }
}
