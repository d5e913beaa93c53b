//! Treasury wallet operation service
//!
//! Multi-approver quorum tracking. Every mutating flow runs inside one
//! transaction so two reviewers approving at the same moment cannot
//! double-count: current_approvals is recounted from the approvals table
//! under the transaction rather than incremented blindly.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::wallet_operation_approvals;
use crate::entities::wallet_operations::{self, Entity as WalletOperations};
use crate::error::BmsError;
use crate::models::common::WorkflowStatus;
use crate::models::wallet_operation::CreateWalletOperationRequest;
use crate::validation::{self, ValidateInsert};
use crate::workflow;

/// True iff the operation has reached approval quorum and, for on-chain
/// movements, enough confirmations
pub fn is_executable(op: &wallet_operations::Model) -> bool {
    op.current_approvals >= op.required_approvals
        && op.confirmations >= op.required_confirmations
}

pub async fn create_operation(
    db: &DatabaseConnection,
    request: CreateWalletOperationRequest,
) -> Result<wallet_operations::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now().into();
    let model = wallet_operations::ActiveModel {
        id: Set(Uuid::new_v4()),
        operation_type: Set(request.operation_type),
        asset: Set(request.asset),
        amount: Set(request.amount),
        destination_address: Set(request.destination_address),
        status: Set(WorkflowStatus::Pending.to_string()),
        required_approvals: Set(request.required_approvals),
        current_approvals: Set(0),
        confirmations: Set(0),
        required_confirmations: Set(request.required_confirmations),
        tx_hash: Set(None),
        initiated_by: Set(request.initiated_by),
        executed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    tracing::info!(
        operation_id = %created.id,
        operation_type = %created.operation_type,
        "wallet operation opened, awaiting {} approval(s)",
        created.required_approvals
    );
    Ok(created)
}

/// Record one approver's sign-off. Duplicate approvals from the same
/// approver are idempotent: the operation is returned unchanged.
pub async fn record_approval(
    db: &DatabaseConnection,
    operation_id: Uuid,
    approver_id: &str,
) -> Result<wallet_operations::Model, BmsError> {
    let txn = db.begin().await?;

    let op = WalletOperations::find_by_id(operation_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "wallet operation",
            id: operation_id.to_string(),
        })?;

    let status: WorkflowStatus = op
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: op.status.clone(),
            to: WorkflowStatus::InProgress.to_string(),
        })?;
    if status.is_terminal() {
        return Err(BmsError::InvalidTransition {
            from: status.to_string(),
            to: WorkflowStatus::InProgress.to_string(),
        });
    }

    let existing = wallet_operation_approvals::Entity::find()
        .filter(wallet_operation_approvals::Column::OperationId.eq(operation_id))
        .filter(wallet_operation_approvals::Column::ApproverId.eq(approver_id))
        .one(&txn)
        .await?;

    if existing.is_some() {
        tracing::debug!(
            operation_id = %operation_id,
            approver_id,
            "duplicate approval ignored"
        );
        txn.commit().await?;
        return Ok(op);
    }

    let approval = wallet_operation_approvals::ActiveModel {
        id: Set(Uuid::new_v4()),
        operation_id: Set(operation_id),
        approver_id: Set(approver_id.to_string()),
        approved_at: Set(Utc::now().into()),
    };
    approval.insert(&txn).await?;

    // Derive the counter from the approvals table under the transaction
    let count = wallet_operation_approvals::Entity::find()
        .filter(wallet_operation_approvals::Column::OperationId.eq(operation_id))
        .count(&txn)
        .await? as i32;

    let first_approval = status == WorkflowStatus::Pending;
    let mut active: wallet_operations::ActiveModel = op.into();
    active.current_approvals = Set(count);
    if first_approval {
        active.status = Set(workflow::transition(status, WorkflowStatus::InProgress)?.to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        operation_id = %operation_id,
        approver_id,
        "approval {} of {} recorded",
        updated.current_approvals,
        updated.required_approvals
    );
    Ok(updated)
}

/// Ratchet observed on-chain confirmations upward; lower readings are
/// ignored. Optionally records the transaction hash.
pub async fn record_confirmations(
    db: &DatabaseConnection,
    operation_id: Uuid,
    confirmations: i32,
    tx_hash: Option<String>,
) -> Result<wallet_operations::Model, BmsError> {
    if let Some(ref hash) = tx_hash {
        let mut violations = Vec::new();
        validation::require_tx_hash("tx_hash", hash, &mut violations);
        if !violations.is_empty() {
            return Err(BmsError::Validation(violations));
        }
    }

    let txn = db.begin().await?;

    let op = WalletOperations::find_by_id(operation_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "wallet operation",
            id: operation_id.to_string(),
        })?;

    let status: WorkflowStatus = op
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: op.status.clone(),
            to: WorkflowStatus::InProgress.to_string(),
        })?;
    if status.is_terminal() {
        return Err(BmsError::InvalidTransition {
            from: status.to_string(),
            to: WorkflowStatus::InProgress.to_string(),
        });
    }

    let new_confirmations = op.confirmations.max(confirmations);
    let mut active: wallet_operations::ActiveModel = op.into();
    active.confirmations = Set(new_confirmations);
    if let Some(hash) = tx_hash {
        active.tx_hash = Set(Some(hash));
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Execute the operation once quorum and confirmations are both met
pub async fn execute_operation(
    db: &DatabaseConnection,
    operation_id: Uuid,
) -> Result<wallet_operations::Model, BmsError> {
    let txn = db.begin().await?;

    let op = WalletOperations::find_by_id(operation_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "wallet operation",
            id: operation_id.to_string(),
        })?;

    if op.current_approvals < op.required_approvals {
        return Err(BmsError::InsufficientApprovals {
            current: op.current_approvals,
            required: op.required_approvals,
        });
    }
    if op.confirmations < op.required_confirmations {
        return Err(BmsError::InsufficientConfirmations {
            current: op.confirmations,
            required: op.required_confirmations,
        });
    }

    let status: WorkflowStatus = op
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: op.status.clone(),
            to: WorkflowStatus::Completed.to_string(),
        })?;
    let next = workflow::transition(status, WorkflowStatus::Completed)?;

    let now = Utc::now();
    let mut active: wallet_operations::ActiveModel = op.into();
    active.status = Set(next.to_string());
    active.executed_at = Set(Some(now.into()));
    active.updated_at = Set(now.into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(operation_id = %operation_id, "wallet operation executed");
    Ok(updated)
}

/// Cancel a not-yet-executed operation. Approval rows are kept for audit.
pub async fn cancel_operation(
    db: &DatabaseConnection,
    operation_id: Uuid,
) -> Result<wallet_operations::Model, BmsError> {
    let txn = db.begin().await?;

    let op = WalletOperations::find_by_id(operation_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "wallet operation",
            id: operation_id.to_string(),
        })?;

    let status: WorkflowStatus = op
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: op.status.clone(),
            to: WorkflowStatus::Cancelled.to_string(),
        })?;
    let next = workflow::transition(status, WorkflowStatus::Cancelled)?;

    let mut active: wallet_operations::ActiveModel = op.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn op(
        current_approvals: i32,
        required_approvals: i32,
        confirmations: i32,
        required_confirmations: i32,
    ) -> wallet_operations::Model {
        let now = Utc::now().into();
        wallet_operations::Model {
            id: Uuid::new_v4(),
            operation_type: "withdrawal".to_string(),
            asset: "BTC".to_string(),
            amount: dec!(1.25),
            destination_address: Some("bc1q-treasury-cold".to_string()),
            status: "in_progress".to_string(),
            required_approvals,
            current_approvals,
            confirmations,
            required_confirmations,
            tx_hash: None,
            initiated_by: "treasury-bot".to_string(),
            executed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn not_executable_below_quorum_regardless_of_confirmations() {
        assert!(!is_executable(&op(1, 2, 100, 6)));
        assert!(!is_executable(&op(0, 1, 100, 0)));
    }

    #[test]
    fn not_executable_below_confirmation_floor() {
        assert!(!is_executable(&op(3, 2, 2, 6)));
    }

    #[test]
    fn executable_at_exact_thresholds() {
        assert!(is_executable(&op(2, 2, 6, 6)));
        assert!(is_executable(&op(2, 2, 0, 0)));
    }
}
