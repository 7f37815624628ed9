//! Per-source collectors.
//!
//! Each collector contains its own failures: it logs, degrades to partial or
//! empty data, and always returns. Only the orchestrator decides whether a
//! scan as a whole failed.

mod dns;
mod subdomain;
mod whois;

pub use dns::DnsCollector;
pub use subdomain::SubdomainCollector;
pub use whois::WhoisCollector;
