//! Scan endpoints: run a scan, fetch a report, list history.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use super::{ApiError, PageQuery};
use crate::state::AppState;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanRequest {
    pub domain_name: String,
    #[serde(default = "default_true")]
    pub include_whois: bool,
    #[serde(default = "default_true")]
    pub include_subdomains: bool,
}

/// `POST /api/scans` -- run a scan synchronously and return the full report.
///
/// 201 on success, 400 when the domain name fails validation, 500 when the
/// scan transitioned to failed.
#[post("")]
pub async fn create_scan(
    state: web::Data<AppState>,
    body: web::Json<CreateScanRequest>,
) -> Result<HttpResponse, ApiError> {
    let report = state
        .scan_service
        .run_scan(
            &body.domain_name,
            body.include_whois,
            body.include_subdomains,
        )
        .await?;
    Ok(HttpResponse::Created().json(report))
}

/// `GET /api/scans/{scan_id}` -- aggregated result of one scan, 404 when the
/// id is unknown.
#[get("/{scan_id}")]
pub async fn get_scan(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let report = state
        .scan_service
        .get_scan_report(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// `GET /api/scans` -- scan history, most recent first.
#[get("")]
pub async fn list_scans(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let scans = state
        .scan_service
        .list_scans(query.offset, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(scans))
}
