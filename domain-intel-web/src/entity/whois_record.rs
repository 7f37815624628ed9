use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "whois_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub scan_id: i64,
    pub registrar: Option<String>,
    pub creation_date: Option<DateTimeUtc>,
    pub expiration_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    /// JSON array of sorted, deduplicated name servers.
    #[sea_orm(column_type = "Json", nullable)]
    pub name_servers: Option<Json>,
    pub registrant_country: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_data: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scan::Entity",
        from = "Column::ScanId",
        to = "super::scan::Column::Id",
        on_delete = "Cascade"
    )]
    Scan,
}

impl Related<super::scan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
