//! WHOIS lookups over the registry network.

use async_trait::async_trait;
use regex::Regex;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::traits::{WhoisLookup, WhoisLookupError};
use crate::types::{OneOrMany, RawWhois, WhoisDate};

/// Embedded WHOIS server mapping (TLD → server).
const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// Line prefixes that mark an unregistered name. Registries phrase this in a
/// handful of well-known ways; matched against trimmed, lowercased lines so
/// body text cannot trigger a false positive.
const NO_MATCH_MARKERS: &[&str] = &[
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "the queried object does not exist",
    "status: free",
];

/// [`WhoisLookup`] implementation backed by `whois-rust` with regex field
/// extraction.
pub struct WhoisClient {
    inner: WhoIs,
}

impl WhoisClient {
    /// Build a client over the embedded TLD server map.
    pub fn new() -> Result<Self, WhoisLookupError> {
        let inner = WhoIs::from_string(WHOIS_SERVERS).map_err(|e| {
            WhoisLookupError::Other(format!("Failed to initialize WHOIS client: {e}"))
        })?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl WhoisLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<RawWhois, WhoisLookupError> {
        let options = WhoIsLookupOptions::from_string(domain)
            .map_err(|e| WhoisLookupError::Unparseable(format!("Invalid domain: {e}")))?;

        let raw = self
            .inner
            .lookup_async(options)
            .await
            .map_err(|e| WhoisLookupError::Other(format!("WHOIS query failed: {e}")))?;

        if is_no_match(&raw) {
            return Err(WhoisLookupError::NoRegistration);
        }

        Ok(parse_whois_response(&raw))
    }
}

fn is_no_match(raw: &str) -> bool {
    raw.lines().any(|line| {
        let line = line.trim().to_lowercase();
        NO_MATCH_MARKERS
            .iter()
            .any(|marker| line.starts_with(marker))
    })
}

/// Parse structured fields from a raw WHOIS response.
fn parse_whois_response(raw: &str) -> RawWhois {
    RawWhois {
        domain_name: field(
            raw,
            &[r"(?i)Domain Name:\s*(.+)", r"(?i)domain:\s*(.+)"],
        ),
        registrar: field(
            raw,
            &[
                r"(?i)Registrar:\s*(.+)",
                r"(?i)Registrar Name:\s*(.+)",
                r"(?i)Sponsoring Registrar:\s*(.+)",
            ],
        ),
        creation_date: date_field(
            raw,
            &[
                r"(?i)Creation Date:\s*(.+)",
                r"(?i)Created Date:\s*(.+)",
                r"(?i)Created:\s*(.+)",
                r"(?i)Registration Time:\s*(.+)",
                r"(?i)Registration Date:\s*(.+)",
            ],
        ),
        expiration_date: date_field(
            raw,
            &[
                r"(?i)Expir(?:y|ation) Date:\s*(.+)",
                r"(?i)Registry Expiry Date:\s*(.+)",
                r"(?i)Expiration Time:\s*(.+)",
                r"(?i)paid-till:\s*(.+)",
            ],
        ),
        updated_date: date_field(
            raw,
            &[
                r"(?i)Updated Date:\s*(.+)",
                r"(?i)Last Updated:\s*(.+)",
                r"(?i)Last Modified:\s*(.+)",
            ],
        ),
        name_servers: field(
            raw,
            &[
                r"(?i)Name Server:\s*(.+)",
                r"(?i)nserver:\s*(.+)",
                r"(?i)DNS:\s*(.+)",
            ],
        ),
        registrant_country: field(
            raw,
            &[r"(?i)Registrant Country:\s*(.+)", r"(?im)^country:\s*(.+)"],
        ),
        raw: Some(raw.to_string()),
    }
}

/// Every match of the first pattern that matches anything, preserving the
/// single-vs-list shape of the response.
fn extract_all(text: &str, patterns: &[&str]) -> Vec<String> {
    for pattern in patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        let values: Vec<String> = re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

fn field(text: &str, patterns: &[&str]) -> Option<OneOrMany<String>> {
    one_or_many(extract_all(text, patterns))
}

fn date_field(text: &str, patterns: &[&str]) -> Option<OneOrMany<WhoisDate>> {
    one_or_many(
        extract_all(text, patterns)
            .into_iter()
            .map(WhoisDate::Text)
            .collect(),
    )
}

fn one_or_many<T>(mut values: Vec<T>) -> Option<OneOrMany<T>> {
    match values.len() {
        0 => None,
        1 => values.pop().map(OneOrMany::One),
        _ => Some(OneOrMany::Many(values)),
    }
}
