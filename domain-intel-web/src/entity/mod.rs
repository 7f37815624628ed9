//! SeaORM entity definitions mirroring the migration schema.

pub mod dns_record;
pub mod domain;
pub mod scan;
pub mod subdomain;
pub mod whois_record;
