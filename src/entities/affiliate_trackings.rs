//! SeaORM Entity for per-referral affiliate commission tracking
//!
//! Invariant enforced by the affiliates service: commission_paid never
//! exceeds commission_earned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliate_trackings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub program_id: Uuid,
    pub affiliate_id: String,
    pub referred_user_id: String,
    #[sea_orm(column_type = "Decimal(Some((30, 8)))")]
    pub commission_earned: Decimal,
    #[sea_orm(column_type = "Decimal(Some((30, 8)))")]
    pub commission_paid: Decimal,
    /// Workflow status: pending, in_progress, completed, cancelled
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::affiliate_programs::Entity",
        from = "Column::ProgramId",
        to = "super::affiliate_programs::Column::Id"
    )]
    AffiliatePrograms,
}

impl Related<super::affiliate_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffiliatePrograms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
