//! SeaORM Entity for compliance reports (SAR/CTR filings, audits)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "compliance_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// sar, ctr, annual_audit, internal_review
    pub report_type: String,
    /// Subject user, when the report concerns a single account
    pub user_id: Option<String>,
    /// Transaction IDs covered by the report, JSON array of strings
    #[sea_orm(column_type = "JsonBinary")]
    pub transaction_ids: Json,
    /// Workflow status: pending, in_progress, completed, cancelled
    pub status: String,
    /// Regulatory filing deadline; required for sar/ctr
    pub due_date: Option<DateTimeWithTimeZone>,
    /// Set exactly once when the report is filed, immutable afterwards
    pub filed_at: Option<DateTimeWithTimeZone>,
    pub filed_by: Option<String>,
    pub summary: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
