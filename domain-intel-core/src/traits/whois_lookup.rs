//! WHOIS lookup capability abstraction.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::RawWhois;

/// Outcome of a failed WHOIS lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhoisLookupError {
    /// The registry reports no registration for the queried name.
    #[error("no registration found")]
    NoRegistration,

    /// The response could not be parsed into fields.
    #[error("unparseable response: {0}")]
    Unparseable(String),

    /// Network failure, timeout, or anything else.
    #[error("whois lookup failed: {0}")]
    Other(String),
}

/// WHOIS lookup capability.
///
/// Implementations: [`WhoisClient`](crate::net::WhoisClient) over the
/// registry network; scripted mocks in tests.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Fetch and parse the registration record for `domain`.
    async fn lookup(&self, domain: &str) -> Result<RawWhois, WhoisLookupError>;
}
