//! SeaORM Entity for KYC verification workflows
//!
//! One row per user onboarding. Stage progression and completion gates
//! are enforced by the KYC service, not the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "kyc_workflows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Exchange user this workflow belongs to
    pub user_id: String,
    /// Verification stage: email, phone, identity, address
    pub current_stage: String,
    /// Achieved verification level, 0..=3
    pub kyc_level: i16,
    /// Risk rating: low, medium, high, critical
    pub risk_level: String,
    /// Workflow status: pending, in_progress, completed, cancelled
    pub status: String,
    /// Sanctions list screening passed
    pub sanctions_check: bool,
    /// Politically-exposed-person screening passed
    pub pep_check: bool,
    /// Staff member working the case
    pub assigned_to: Option<Uuid>,
    /// Required sign-off when completing a critical-risk workflow
    pub approved_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
