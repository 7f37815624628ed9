//! Conversion of raw resolver answers into the canonical record shape.

use crate::types::{DnsAnswer, DnsRecord, DnsRecordType};

/// Strip trailing root-dots from a hostname.
fn strip_root_dot(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Normalize one resolver answer into a [`DnsRecord`].
///
/// Pure; never fails for a well-formed answer of its declared type. Hostname
/// values never carry a trailing root-dot.
///
/// - MX: value is the exchange hostname; `priority` carries the preference.
/// - TXT: all character-string segments are decoded and concatenated.
/// - SOA: value is `"{mname} {rname} (serial: {serial})"`.
/// - A/AAAA/NS/CNAME: value is the string form of the answer.
#[must_use]
pub fn normalize_answer(record_type: DnsRecordType, answer: &DnsAnswer, ttl: u32) -> DnsRecord {
    let (record_value, priority) = match answer {
        DnsAnswer::A(ip) => (ip.to_string(), None),
        DnsAnswer::Aaaa(ip) => (ip.to_string(), None),
        DnsAnswer::Mx {
            preference,
            exchange,
        } => (strip_root_dot(exchange).to_string(), Some(*preference)),
        DnsAnswer::Txt(segments) => {
            // Multi-segment TXT answers form one logical string.
            let joined: String = segments
                .iter()
                .map(|segment| String::from_utf8_lossy(segment))
                .collect();
            (joined, None)
        }
        DnsAnswer::Soa {
            mname,
            rname,
            serial,
        } => (
            format!(
                "{} {} (serial: {serial})",
                strip_root_dot(mname),
                strip_root_dot(rname)
            ),
            None,
        ),
        DnsAnswer::Ns(name) | DnsAnswer::Cname(name) => (strip_root_dot(name).to_string(), None),
    };

    DnsRecord {
        record_type,
        record_value,
        ttl: Some(ttl),
        priority,
    }
}
