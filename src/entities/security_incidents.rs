//! SeaORM Entity for security incidents
//!
//! Lifecycle open → investigating → contained → resolved with
//! monotonically non-decreasing timestamps.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "security_incidents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// minor, major, critical, catastrophic
    pub severity: String,
    /// open, investigating, contained, resolved
    pub status: String,
    pub detected_at: DateTimeWithTimeZone,
    pub contained_at: Option<DateTimeWithTimeZone>,
    pub resolved_at: Option<DateTimeWithTimeZone>,
    pub reported_by: String,
    /// Affected system names, JSON array of strings
    #[sea_orm(column_type = "JsonBinary")]
    pub affected_systems: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
