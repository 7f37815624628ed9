//! WHOIS data shapes: raw registry fields and the normalized summary.
//!
//! Registries are wildly inconsistent: any field may arrive as a single value
//! or a list, and dates come back as structured timestamps or free-form text.
//! [`RawWhois`] preserves that mess; the WHOIS collector collapses it into a
//! [`WhoisSummary`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field that may arrive as a single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// First value; `None` for an empty list.
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.into_iter().next(),
        }
    }

    /// All values as a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A WHOIS date field: a structured timestamp or whatever text the registry
/// printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhoisDate {
    Timestamp(DateTime<Utc>),
    Text(String),
}

/// Raw parsed WHOIS record as delivered by the registry layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWhois {
    /// Registered name; absent or empty when the registry has no
    /// registration for the queried domain.
    pub domain_name: Option<OneOrMany<String>>,
    pub registrar: Option<OneOrMany<String>>,
    pub creation_date: Option<OneOrMany<WhoisDate>>,
    pub expiration_date: Option<OneOrMany<WhoisDate>>,
    pub updated_date: Option<OneOrMany<WhoisDate>>,
    pub name_servers: Option<OneOrMany<String>>,
    pub registrant_country: Option<OneOrMany<String>>,
    /// Full raw response text.
    pub raw: Option<String>,
}

/// Normalized WHOIS registration data, as persisted under a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisSummary {
    /// Domain registrar (e.g. "MarkMonitor Inc.").
    pub registrar: Option<String>,
    /// Registration creation date.
    pub creation_date: Option<DateTime<Utc>>,
    /// Registration expiration date.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Last updated date.
    pub updated_date: Option<DateTime<Utc>>,
    /// Authoritative name servers: lowercased, trailing root-dot stripped,
    /// deduplicated, sorted. `None` instead of an empty list.
    pub name_servers: Option<Vec<String>>,
    /// Registrant country, when disclosed.
    pub registrant_country: Option<String>,
    /// Full raw response text.
    pub raw_data: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_one_or_many_into_first() {
        assert_eq!(OneOrMany::One(1).into_first(), Some(1));
        assert_eq!(OneOrMany::Many(vec![2, 3]).into_first(), Some(2));
        assert_eq!(OneOrMany::<i32>::Many(vec![]).into_first(), None);
    }

    #[test]
    fn test_one_or_many_into_vec() {
        assert_eq!(OneOrMany::One("a").into_vec(), vec!["a"]);
        assert_eq!(OneOrMany::Many(vec!["a", "b"]).into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_one_or_many_untagged_deserialization() {
        let one: OneOrMany<String> = serde_json::from_str("\"ns1.example.com\"").unwrap();
        assert_eq!(one, OneOrMany::One("ns1.example.com".to_string()));

        let many: OneOrMany<String> =
            serde_json::from_str(r#"["ns1.example.com", "ns2.example.com"]"#).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_whois_date_untagged_deserialization() {
        let ts: WhoisDate = serde_json::from_str("\"2020-01-01T00:00:00Z\"").unwrap();
        assert!(matches!(ts, WhoisDate::Timestamp(_)));

        let text: WhoisDate = serde_json::from_str("\"17-Mar-2003\"").unwrap();
        assert_eq!(text, WhoisDate::Text("17-Mar-2003".to_string()));
    }

    #[test]
    fn test_raw_whois_default_is_empty() {
        let raw = RawWhois::default();
        assert!(raw.domain_name.is_none());
        assert!(raw.registrar.is_none());
        assert!(raw.raw.is_none());
    }
}
