//! SeaORM Entity for wallet operation approvals
//!
//! One row per (operation, approver). The unique index makes duplicate
//! approvals a no-op at the storage layer as well as in the service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_operation_approvals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub operation_id: Uuid,
    pub approver_id: String,
    pub approved_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallet_operations::Entity",
        from = "Column::OperationId",
        to = "super::wallet_operations::Column::Id"
    )]
    WalletOperations,
}

impl Related<super::wallet_operations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletOperations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
