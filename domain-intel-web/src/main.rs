//! Process bootstrap: configuration, logging, database, HTTP server.

mod api;
mod config;
mod entity;
mod logging;
mod state;
mod store;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use domain_intel_core::net::{HickoryResolver, ReqwestProbe, WhoisClient};
use domain_intel_core::traits::HttpProbe;
use domain_intel_core::{DomainService, ScanService};
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::store::SeaOrmScanStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.log.level);

    info!("Starting domain-intel-web v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database.url);

    let db = Database::connect(&config.database.url)
        .await
        .context("Failed to connect to the database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    let store = Arc::new(SeaOrmScanStore::new(db.clone()));
    let resolver = Arc::new(HickoryResolver::new());
    let whois =
        Arc::new(WhoisClient::new().context("Failed to initialize the WHOIS client")?);
    let prober: Option<Arc<dyn HttpProbe>> = if config.scanner.http_probe {
        Some(Arc::new(ReqwestProbe))
    } else {
        None
    };

    let scan_service = Arc::new(ScanService::new(
        &config.scanner_config(),
        store.clone(),
        resolver,
        whois,
        prober,
    ));
    let domain_service = Arc::new(DomainService::new(store));

    let state = web::Data::new(AppState {
        scan_service,
        domain_service,
        db,
    });

    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    info!(
        "Listening on {}:{} with {workers} workers",
        config.server.host, config.server.port
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .workers(workers)
        .bind((config.server.host.as_str(), config.server.port))
        .context("Failed to bind HTTP listener")?
        .run()
        .await
        .context("HTTP server terminated abnormally")
}
