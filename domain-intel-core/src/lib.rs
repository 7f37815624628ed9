//! Domain intelligence scanner core library.
//!
//! Provides the scan orchestration and collection logic:
//! - DNS record collection and normalization
//! - WHOIS registration lookup and field coercion
//! - Candidate-label subdomain discovery
//!
//! Storage and network capabilities are abstracted through traits, so the
//! library stays platform-independent; the Actix-Web backend injects the
//! SeaORM-backed store while tests inject mocks.

pub mod collectors;
pub mod config;
pub mod error;
pub mod net;
pub mod normalize;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{normalize_domain_name, ScannerConfig};
pub use error::{CoreError, CoreResult};
pub use services::{DomainService, ScanService};
pub use traits::{DnsResolve, HttpProbe, ScanStore, WhoisLookup};
