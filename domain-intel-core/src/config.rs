//! Scanner configuration and domain name validation.

use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Candidate labels checked by the subdomain collector when no custom list is
/// configured.
const DEFAULT_SUBDOMAIN_LABELS: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "dev", "staging", "test", "blog", "shop", "store", "app",
    "portal", "secure", "vpn", "remote", "webmail", "mx", "ns1", "ns2", "cdn", "static",
];

/// Scanner tuning knobs.
///
/// Constructed explicitly by the embedding application and passed into each
/// component constructor; there is no process-wide settings singleton.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Upper bound for one DNS round trip. Applies independently to each
    /// record-type query, not cumulatively per domain.
    pub lookup_timeout: Duration,
    /// Upper bound for one subdomain HTTP probe.
    pub probe_timeout: Duration,
    /// Candidate labels tried by the subdomain collector.
    pub subdomain_labels: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            subdomain_labels: DEFAULT_SUBDOMAIN_LABELS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Validate and normalize a domain name for scanning.
///
/// Trims whitespace, converts internationalized domain names (IDN) to
/// lowercase ASCII via IDNA 2008, and enforces the 3-255 character length
/// bounds of the API contract.
pub fn normalize_domain_name(input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    let ascii = idna::domain_to_ascii_strict(trimmed)
        .map_err(|_| CoreError::ValidationError(format!("Invalid domain name: {trimmed}")))?;
    if ascii.len() < 3 || ascii.len() > 255 {
        return Err(CoreError::ValidationError(format!(
            "Domain name length must be between 3 and 255 characters (got {})",
            ascii.len()
        )));
    }
    Ok(ascii)
}
