//! SeaORM Entity for treasury wallet operations
//!
//! Multi-approver sign-off plus on-chain confirmation gating before an
//! operation may execute.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// withdrawal, internal_transfer, cold_storage_sweep, rebalance
    pub operation_type: String,
    /// Asset symbol (e.g., "BTC", "USDC")
    pub asset: String,
    #[sea_orm(column_type = "Decimal(Some((30, 8)))")]
    pub amount: Decimal,
    /// Destination address for movements leaving the treasury
    pub destination_address: Option<String>,
    /// Workflow status: pending, in_progress, completed, cancelled
    pub status: String,
    pub required_approvals: i32,
    pub current_approvals: i32,
    /// On-chain confirmations observed so far
    pub confirmations: i32,
    pub required_confirmations: i32,
    pub tx_hash: Option<String>,
    pub initiated_by: String,
    pub executed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wallet_operation_approvals::Entity")]
    WalletOperationApprovals,
}

impl Related<super::wallet_operation_approvals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletOperationApprovals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
