//! DNS record types: raw resolver answers and the canonical record shape.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// DNS record type collected by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Canonical name (alias) record.
    Cname,
    /// Start of authority record.
    Soa,
}

impl DnsRecordType {
    /// Fixed query order used by a scan.
    ///
    /// The order only affects the sequence of returned records, not their
    /// meaning -- except that an NXDOMAIN on the first queried type aborts
    /// the rest.
    pub const SCAN_ORDER: [Self; 7] = [
        Self::A,
        Self::Aaaa,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Cname,
        Self::Soa,
    ];
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Mx => write!(f, "MX"),
            Self::Txt => write!(f, "TXT"),
            Self::Ns => write!(f, "NS"),
            Self::Cname => write!(f, "CNAME"),
            Self::Soa => write!(f, "SOA"),
        }
    }
}

impl FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "CNAME" => Ok(Self::Cname),
            "SOA" => Ok(Self::Soa),
            _ => Err(format!("Unsupported DNS record type: {s}")),
        }
    }
}

/// One raw resolver answer, prior to normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsAnswer {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Mx {
        preference: u16,
        /// Mail exchange hostname, possibly with a trailing root-dot.
        exchange: String,
    },
    /// TXT character-string segments, as received on the wire.
    Txt(Vec<Vec<u8>>),
    Ns(String),
    Cname(String),
    Soa {
        mname: String,
        rname: String,
        serial: u32,
    },
}

/// Raw response for one (domain, record type) query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub answers: Vec<DnsAnswer>,
    /// TTL shared by the answer set, in seconds.
    pub ttl: u32,
}

/// A normalized DNS record, as persisted under a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type (e.g. `"A"`, `"MX"`).
    pub record_type: DnsRecordType,
    /// Canonical record value. Hostname values never carry a trailing
    /// root-dot.
    pub record_value: String,
    /// Time-to-live in seconds, when the resolver reported one.
    pub ttl: Option<u32>,
    /// Priority (MX records only).
    pub priority: Option<u16>,
}
