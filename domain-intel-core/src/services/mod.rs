//! Business logic service layer.

mod domain_service;
mod scan_service;

pub use domain_service::DomainService;
pub use scan_service::ScanService;
