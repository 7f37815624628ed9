//! SeaORM-backed implementation of the core persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use tracing::warn;

use domain_intel_core::traits::{ScanStore, StoreError, StoreResult};
use domain_intel_core::types::{
    DnsRecord, DnsRecordType, Domain, Scan, ScanReport, ScanStatus, Subdomain, WhoisSummary,
};

use crate::entity::{dns_record, domain, scan, subdomain, whois_record};

/// [`ScanStore`] over a SeaORM [`DatabaseConnection`].
///
/// The domain-name and whois-per-scan unique indexes surface as
/// [`StoreError::Duplicate`]; cascade deletion of a scan's child rows is
/// enforced by the schema's foreign keys.
pub struct SeaOrmScanStore {
    db: DatabaseConnection,
}

impl SeaOrmScanStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(err: sea_orm::DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn domain_from(model: domain::Model) -> Domain {
    Domain {
        id: model.id,
        domain_name: model.domain_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
        is_active: model.is_active,
    }
}

fn scan_from(model: scan::Model) -> Scan {
    Scan {
        id: model.id,
        domain_id: model.domain_id,
        started_at: model.started_at,
        completed_at: model.completed_at,
        // An unknown stored status reads as failed rather than poisoning the
        // whole row.
        status: model.status.parse().unwrap_or(ScanStatus::Failed),
        error_message: model.error_message,
    }
}

fn dns_record_from(model: dns_record::Model) -> Option<DnsRecord> {
    let record_type: DnsRecordType = match model.record_type.parse() {
        Ok(record_type) => record_type,
        Err(_) => {
            warn!(
                "Skipping DNS record {} with unknown type {}",
                model.id, model.record_type
            );
            return None;
        }
    };
    Some(DnsRecord {
        record_type,
        record_value: model.record_value,
        ttl: model.ttl.and_then(|value| u32::try_from(value).ok()),
        priority: model.priority.and_then(|value| u16::try_from(value).ok()),
    })
}

fn whois_from(model: whois_record::Model) -> WhoisSummary {
    WhoisSummary {
        registrar: model.registrar,
        creation_date: model.creation_date,
        expiration_date: model.expiration_date,
        updated_date: model.updated_date,
        name_servers: model
            .name_servers
            .and_then(|value| serde_json::from_value(value).ok()),
        registrant_country: model.registrant_country,
        raw_data: model.raw_data,
    }
}

fn subdomain_from(model: subdomain::Model) -> Subdomain {
    Subdomain {
        subdomain_name: model.subdomain_name,
        full_domain: model.full_domain,
        ip_address: model.ip_address,
        is_alive: model.is_alive,
        http_status: model.http_status.and_then(|value| u16::try_from(value).ok()),
    }
}

#[async_trait]
impl ScanStore for SeaOrmScanStore {
    async fn find_domain_by_name(&self, name: &str) -> StoreResult<Option<Domain>> {
        let model = domain::Entity::find()
            .filter(domain::Column::DomainName.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(domain_from))
    }

    async fn create_domain(&self, name: &str) -> StoreResult<Domain> {
        let now = Utc::now();
        let model = domain::ActiveModel {
            domain_name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            is_active: Set(true),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(model) => Ok(domain_from(model)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(StoreError::Duplicate(name.to_string()))
                }
                _ => Err(db_err(err)),
            },
        }
    }

    async fn find_domain(&self, id: i64) -> StoreResult<Option<Domain>> {
        let model = domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(domain_from))
    }

    async fn list_domains(&self, offset: u64, limit: u64) -> StoreResult<(Vec<Domain>, u64)> {
        let query = domain::Entity::find().filter(domain::Column::IsActive.eq(true));
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(domain::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok((models.into_iter().map(domain_from).collect(), total))
    }

    async fn deactivate_domain(&self, id: i64) -> StoreResult<()> {
        let result = domain::Entity::update_many()
            .col_expr(domain::Column::IsActive, Expr::value(false))
            .col_expr(domain::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(domain::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(format!("domain {id}")));
        }
        Ok(())
    }

    async fn create_scan(&self, domain_id: i64, started_at: DateTime<Utc>) -> StoreResult<Scan> {
        let model = scan::ActiveModel {
            domain_id: Set(domain_id),
            started_at: Set(started_at),
            completed_at: Set(None),
            status: Set(ScanStatus::Running.to_string()),
            error_message: Set(None),
            ..Default::default()
        };
        let model = model.insert(&self.db).await.map_err(db_err)?;
        Ok(scan_from(model))
    }

    async fn append_dns_records(&self, scan_id: i64, records: &[DnsRecord]) -> StoreResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let models = records.iter().map(|record| dns_record::ActiveModel {
            scan_id: Set(scan_id),
            record_type: Set(record.record_type.to_string()),
            record_value: Set(record.record_value.clone()),
            ttl: Set(record.ttl.map(i64::from)),
            priority: Set(record.priority.map(i32::from)),
            ..Default::default()
        });
        dns_record::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn insert_whois_record(&self, scan_id: i64, whois: &WhoisSummary) -> StoreResult<()> {
        let name_servers = match &whois.name_servers {
            Some(servers) => Some(
                serde_json::to_value(servers).map_err(|err| StoreError::Backend(err.to_string()))?,
            ),
            None => None,
        };
        let model = whois_record::ActiveModel {
            scan_id: Set(scan_id),
            registrar: Set(whois.registrar.clone()),
            creation_date: Set(whois.creation_date),
            expiration_date: Set(whois.expiration_date),
            updated_date: Set(whois.updated_date),
            name_servers: Set(name_servers),
            registrant_country: Set(whois.registrant_country.clone()),
            raw_data: Set(whois.raw_data.clone()),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(StoreError::Duplicate(format!(
                    "whois record for scan {scan_id}"
                ))),
                _ => Err(db_err(err)),
            },
        }
    }

    async fn append_subdomains(&self, scan_id: i64, subdomains: &[Subdomain]) -> StoreResult<()> {
        if subdomains.is_empty() {
            return Ok(());
        }
        let models = subdomains.iter().map(|sub| subdomain::ActiveModel {
            scan_id: Set(scan_id),
            subdomain_name: Set(sub.subdomain_name.clone()),
            full_domain: Set(sub.full_domain.clone()),
            ip_address: Set(sub.ip_address.clone()),
            is_alive: Set(sub.is_alive),
            http_status: Set(sub.http_status.map(i32::from)),
            ..Default::default()
        });
        subdomain::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn finalize_scan(
        &self,
        scan_id: i64,
        status: ScanStatus,
        completed_at: DateTime<Utc>,
        error_message: Option<String>,
    ) -> StoreResult<()> {
        // One statement, so readers never see a terminal status without its
        // completion time.
        let result = scan::Entity::update_many()
            .col_expr(scan::Column::Status, Expr::value(status.to_string()))
            .col_expr(scan::Column::CompletedAt, Expr::value(completed_at))
            .col_expr(scan::Column::ErrorMessage, Expr::value(error_message))
            .filter(scan::Column::Id.eq(scan_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(format!("scan {scan_id}")));
        }
        Ok(())
    }

    async fn find_scan(&self, scan_id: i64) -> StoreResult<Option<Scan>> {
        let model = scan::Entity::find_by_id(scan_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(scan_from))
    }

    async fn load_report(&self, scan_id: i64) -> StoreResult<Option<ScanReport>> {
        let Some(scan_model) = scan::Entity::find_by_id(scan_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let domain_model = scan_model
            .find_related(domain::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| StoreError::NotFound(format!("domain {}", scan_model.domain_id)))?;

        let dns_models = scan_model
            .find_related(dns_record::Entity)
            .order_by_asc(dns_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let whois_model = scan_model
            .find_related(whois_record::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let subdomain_models = scan_model
            .find_related(subdomain::Entity)
            .order_by_asc(subdomain::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(ScanReport {
            scan: scan_from(scan_model),
            domain: domain_from(domain_model),
            dns_records: dns_models.into_iter().filter_map(dns_record_from).collect(),
            whois: whois_model.map(whois_from),
            subdomains: subdomain_models.into_iter().map(subdomain_from).collect(),
        }))
    }

    async fn list_scans(&self, offset: u64, limit: u64) -> StoreResult<Vec<Scan>> {
        let models = scan::Entity::find()
            .order_by_desc(scan::Column::StartedAt)
            .order_by_desc(scan::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(scan_from).collect())
    }
}
