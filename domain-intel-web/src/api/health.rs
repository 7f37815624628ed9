//! Service banner and health check.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database_connected: bool,
}

/// `GET /health` -- liveness/readiness endpoint for orchestrators. Reports
/// `unhealthy` when the database does not answer a ping.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    let database_connected = match state.db.ping().await {
        Ok(()) => true,
        Err(err) => {
            error!("Database health check failed: {err}");
            false
        }
    };
    HttpResponse::Ok().json(HealthResponse {
        status: if database_connected {
            "healthy"
        } else {
            "unhealthy"
        },
        version: env!("CARGO_PKG_VERSION"),
        database_connected,
    })
}

/// `GET /` -- service banner.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Domain intelligence scanner",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
    }))
}
