//! HTTP surface: routing and request/response shapes.

mod domains;
mod error;
mod health;
mod scans;

pub use error::ApiError;

use actix_web::web;
use serde::Deserialize;

const fn default_limit() -> u64 {
    50
}

/// Pagination query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(health::health)
        .service(
            web::scope("/api/scans")
                .service(scans::create_scan)
                .service(scans::list_scans)
                .service(scans::get_scan),
        )
        .service(
            web::scope("/api/domains")
                .service(domains::list_domains)
                .service(domains::create_domain)
                .service(domains::get_domain)
                .service(domains::delete_domain),
        );
}
