//! Domain, scan, and per-scan result row types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::DnsRecord;
use super::whois::WhoisSummary;

/// Lifecycle state of a scan.
///
/// `Completed` and `Failed` are terminal. A failed scan is never retried in
/// place; callers start a brand-new scan instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Whether the status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown scan status: {s}")),
        }
    }
}

/// A scanned domain.
///
/// Created on the first scan request for an unseen name. Never hard-deleted;
/// deactivation clears `is_active` while preserving scan history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: i64,
    /// Lowercased, unique domain name.
    pub domain_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// One scan attempt against a domain.
///
/// Invariant: `completed_at` is set if and only if the status is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: i64,
    pub domain_id: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: ScanStatus,
    pub error_message: Option<String>,
}

/// A discovered subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subdomain {
    /// Short label, e.g. `"www"`.
    pub subdomain_name: String,
    /// Fully qualified name, e.g. `"www.example.com"`.
    pub full_domain: String,
    /// First resolved IPv4 address.
    pub ip_address: Option<String>,
    /// Whether an HTTP probe got a response.
    pub is_alive: bool,
    /// HTTP status code from the probe.
    pub http_status: Option<u16>,
}

/// Aggregated result of one scan: the scan row, its domain, and every
/// collected record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan: Scan,
    pub domain: Domain,
    pub dns_records: Vec<DnsRecord>,
    pub whois: Option<WhoisSummary>,
    pub subdomains: Vec<Subdomain>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScanStatus::Completed).unwrap(),
            "\"completed\""
        );
        let parsed: ScanStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, ScanStatus::Failed);
    }

    #[test]
    fn test_scan_status_display_roundtrip() {
        for status in [
            ScanStatus::Pending,
            ScanStatus::Running,
            ScanStatus::Completed,
            ScanStatus::Failed,
        ] {
            let parsed: ScanStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_scan_status_terminal() {
        assert!(ScanStatus::Completed.is_terminal());
        assert!(ScanStatus::Failed.is_terminal());
        assert!(!ScanStatus::Pending.is_terminal());
        assert!(!ScanStatus::Running.is_terminal());
    }

    #[test]
    fn test_subdomain_camel_case_serialization() {
        let sub = Subdomain {
            subdomain_name: "www".to_string(),
            full_domain: "www.example.com".to_string(),
            ip_address: Some("93.184.216.34".to_string()),
            is_alive: true,
            http_status: Some(200),
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["subdomainName"], "www");
        assert_eq!(json["fullDomain"], "www.example.com");
        assert_eq!(json["isAlive"], true);
        assert_eq!(json["httpStatus"], 200);
    }
}
