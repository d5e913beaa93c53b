//! Treasury wallet operation types and request/response shapes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Treasury movement kinds tracked by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletOperationType {
    Withdrawal,
    InternalTransfer,
    ColdStorageSweep,
    Rebalance,
}

impl WalletOperationType {
    /// Movements that leave the treasury need a destination address
    pub fn requires_destination(&self) -> bool {
        matches!(
            self,
            WalletOperationType::Withdrawal | WalletOperationType::ColdStorageSweep
        )
    }
}

impl std::fmt::Display for WalletOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletOperationType::Withdrawal => write!(f, "withdrawal"),
            WalletOperationType::InternalTransfer => write!(f, "internal_transfer"),
            WalletOperationType::ColdStorageSweep => write!(f, "cold_storage_sweep"),
            WalletOperationType::Rebalance => write!(f, "rebalance"),
        }
    }
}

impl std::str::FromStr for WalletOperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "withdrawal" => Ok(WalletOperationType::Withdrawal),
            "internal_transfer" => Ok(WalletOperationType::InternalTransfer),
            "cold_storage_sweep" => Ok(WalletOperationType::ColdStorageSweep),
            "rebalance" => Ok(WalletOperationType::Rebalance),
            _ => Err(format!("Unknown wallet operation type: {}", s)),
        }
    }
}

/// Request to open a treasury operation pending approvals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWalletOperationRequest {
    pub operation_type: String,
    pub asset: String,
    pub amount: Decimal,
    #[serde(default)]
    pub destination_address: Option<String>,
    pub required_approvals: i32,
    #[serde(default)]
    pub required_confirmations: i32,
    pub initiated_by: String,
}

/// Request to record one approver's sign-off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordApprovalRequest {
    pub approver_id: String,
}

/// Request to ratchet observed on-chain confirmations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordConfirmationsRequest {
    pub confirmations: i32,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletOperationResponse {
    pub id: Uuid,
    pub operation_type: String,
    pub asset: String,
    pub amount: Decimal,
    pub destination_address: Option<String>,
    pub status: String,
    pub required_approvals: i32,
    pub current_approvals: i32,
    pub confirmations: i32,
    pub required_confirmations: i32,
    pub executable: bool,
    pub tx_hash: Option<String>,
    pub initiated_by: String,
    pub executed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::wallet_operations::Model> for WalletOperationResponse {
    fn from(model: crate::entities::wallet_operations::Model) -> Self {
        let executable = crate::services::treasury::is_executable(&model);
        Self {
            id: model.id,
            operation_type: model.operation_type,
            asset: model.asset,
            amount: model.amount,
            destination_address: model.destination_address,
            status: model.status,
            required_approvals: model.required_approvals,
            current_approvals: model.current_approvals,
            confirmations: model.confirmations,
            required_confirmations: model.required_confirmations,
            executable,
            tx_hash: model.tx_hash,
            initiated_by: model.initiated_by,
            executed_at: model.executed_at.map(|t| t.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub id: Uuid,
    pub operation_id: Uuid,
    pub approver_id: String,
    pub approved_at: String,
}

impl From<crate::entities::wallet_operation_approvals::Model> for ApprovalResponse {
    fn from(model: crate::entities::wallet_operation_approvals::Model) -> Self {
        Self {
            id: model.id,
            operation_id: model.operation_id,
            approver_id: model.approver_id,
            approved_at: model.approved_at.to_rfc3339(),
        }
    }
}
