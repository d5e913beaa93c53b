//! SeaORM Entity for affiliate programs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliate_programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Fraction of referred trading fees paid out, 0..=1
    #[sea_orm(column_type = "Decimal(Some((5, 4)))")]
    pub commission_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::affiliate_trackings::Entity")]
    AffiliateTrackings,
}

impl Related<super::affiliate_trackings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffiliateTrackings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
