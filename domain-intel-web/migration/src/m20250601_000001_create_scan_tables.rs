use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Domains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domains::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Domains::DomainName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Domains::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Domains::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Domains::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Scans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scans::DomainId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Scans::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scans::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Scans::Status).string_len(50).not_null())
                    .col(ColumnDef::new(Scans::ErrorMessage).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scans_domain_id")
                            .from(Scans::Table, Scans::DomainId)
                            .to(Domains::Table, Domains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scans_started_at")
                    .table(Scans::Table)
                    .col(Scans::StartedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DnsRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DnsRecords::ScanId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DnsRecords::RecordType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DnsRecords::RecordValue).text().not_null())
                    .col(ColumnDef::new(DnsRecords::Ttl).big_integer())
                    .col(ColumnDef::new(DnsRecords::Priority).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dns_records_scan_id")
                            .from(DnsRecords::Table, DnsRecords::ScanId)
                            .to(Scans::Table, Scans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dns_records_scan_id")
                    .table(DnsRecords::Table)
                    .col(DnsRecords::ScanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WhoisRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WhoisRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WhoisRecords::ScanId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WhoisRecords::Registrar).string_len(255))
                    .col(ColumnDef::new(WhoisRecords::CreationDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(WhoisRecords::ExpirationDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(WhoisRecords::UpdatedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(WhoisRecords::NameServers).json())
                    .col(ColumnDef::new(WhoisRecords::RegistrantCountry).string_len(100))
                    .col(ColumnDef::new(WhoisRecords::RawData).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_whois_records_scan_id")
                            .from(WhoisRecords::Table, WhoisRecords::ScanId)
                            .to(Scans::Table, Scans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subdomains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subdomains::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subdomains::ScanId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Subdomains::SubdomainName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subdomains::FullDomain)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subdomains::IpAddress).string_len(45))
                    .col(
                        ColumnDef::new(Subdomains::IsAlive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Subdomains::HttpStatus).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subdomains_scan_id")
                            .from(Subdomains::Table, Subdomains::ScanId)
                            .to(Scans::Table, Scans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subdomains_scan_id")
                    .table(Subdomains::Table)
                    .col(Subdomains::ScanId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subdomains::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WhoisRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DnsRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domains::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Domains {
    Table,
    Id,
    DomainName,
    CreatedAt,
    UpdatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum Scans {
    Table,
    Id,
    DomainId,
    StartedAt,
    CompletedAt,
    Status,
    ErrorMessage,
}

#[derive(DeriveIden)]
enum DnsRecords {
    Table,
    Id,
    ScanId,
    RecordType,
    RecordValue,
    Ttl,
    Priority,
}

#[derive(DeriveIden)]
enum WhoisRecords {
    Table,
    Id,
    ScanId,
    Registrar,
    CreationDate,
    ExpirationDate,
    UpdatedDate,
    NameServers,
    RegistrantCountry,
    RawData,
}

#[derive(DeriveIden)]
enum Subdomains {
    Table,
    Id,
    ScanId,
    SubdomainName,
    FullDomain,
    IpAddress,
    IsAlive,
    HttpStatus,
}
