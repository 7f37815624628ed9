//! Domain catalogue endpoints.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use domain_intel_core::types::Domain;

use super::{ApiError, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainRequest {
    pub domain_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListResponse {
    pub domains: Vec<Domain>,
    pub total: u64,
}

/// `GET /api/domains` -- active domains, paginated.
#[get("")]
pub async fn list_domains(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let (domains, total) = state
        .domain_service
        .list_domains(query.offset, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(DomainListResponse { domains, total }))
}

/// `POST /api/domains` -- register a domain without scanning it. 400 when the
/// name is invalid or already registered.
#[post("")]
pub async fn create_domain(
    state: web::Data<AppState>,
    body: web::Json<CreateDomainRequest>,
) -> Result<HttpResponse, ApiError> {
    let domain = state
        .domain_service
        .register_domain(&body.domain_name)
        .await?;
    Ok(HttpResponse::Created().json(domain))
}

/// `GET /api/domains/{domain_id}` -- one domain, 404 when absent.
#[get("/{domain_id}")]
pub async fn get_domain(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let domain = state.domain_service.get_domain(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(domain))
}

/// `DELETE /api/domains/{domain_id}` -- soft delete; scan history survives.
#[delete("/{domain_id}")]
pub async fn delete_domain(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state
        .domain_service
        .deactivate_domain(path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
