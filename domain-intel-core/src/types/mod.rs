//! Public types shared across the scanner.

mod record;
mod scan;
mod whois;

pub use record::{DnsAnswer, DnsRecord, DnsRecordType, DnsResponse};
pub use scan::{Domain, Scan, ScanReport, ScanStatus, Subdomain};
pub use whois::{OneOrMany, RawWhois, WhoisDate, WhoisSummary};
