//! KYC workflow service
//!
//! Stage progression, AML screening, and completion gates. kyc_level only
//! ever rises; the level held at each stage is derived from how many
//! earlier stages are verified.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::entities::kyc_workflows::{self, Entity as KycWorkflows};
use crate::error::BmsError;
use crate::models::common::WorkflowStatus;
use crate::models::kyc::{CreateKycWorkflowRequest, KycStage, RiskLevel};
use crate::services::screening::ScreeningProvider;
use crate::validation::ValidateInsert;
use crate::workflow;

pub async fn create_workflow(
    db: &DatabaseConnection,
    request: CreateKycWorkflowRequest,
) -> Result<kyc_workflows::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now().into();
    let model = kyc_workflows::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(request.user_id),
        current_stage: Set(KycStage::Email.to_string()),
        kyc_level: Set(0),
        risk_level: Set(RiskLevel::Low.to_string()),
        status: Set(WorkflowStatus::Pending.to_string()),
        sanctions_check: Set(false),
        pep_check: Set(false),
        assigned_to: Set(request.assigned_to),
        approved_by: Set(None),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    tracing::info!(workflow_id = %created.id, user_id = %created.user_id, "KYC workflow opened");
    Ok(created)
}

/// Run sanctions/PEP screening for the workflow's user and fold the verdict
/// into the record. Risk only escalates; screening never lowers it.
pub async fn screen_workflow(
    db: &DatabaseConnection,
    screening: &dyn ScreeningProvider,
    workflow_id: Uuid,
) -> Result<kyc_workflows::Model, BmsError> {
    let txn = db.begin().await?;

    let wf = KycWorkflows::find_by_id(workflow_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "KYC workflow",
            id: workflow_id.to_string(),
        })?;

    let verdict = screening.screen(&wf.user_id).await?;

    let current_risk: RiskLevel = wf.risk_level.parse().unwrap_or(RiskLevel::Low);
    let new_risk = current_risk.max(verdict.risk);

    let mut active: kyc_workflows::ActiveModel = wf.into();
    active.sanctions_check = Set(!verdict.sanctions_hit);
    active.pep_check = Set(!verdict.pep_hit);
    active.risk_level = Set(new_risk.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        workflow_id = %workflow_id,
        risk = %updated.risk_level,
        sanctions_passed = updated.sanctions_check,
        pep_passed = updated.pep_check,
        "screening verdict recorded"
    );
    Ok(updated)
}

/// Mark the given stage verified. Only the workflow's current stage may be
/// completed; earlier or later stages are rejected.
pub async fn advance_stage(
    db: &DatabaseConnection,
    workflow_id: Uuid,
    attempted: KycStage,
) -> Result<kyc_workflows::Model, BmsError> {
    let txn = db.begin().await?;

    let wf = KycWorkflows::find_by_id(workflow_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "KYC workflow",
            id: workflow_id.to_string(),
        })?;

    let status: WorkflowStatus = wf
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: wf.status.clone(),
            to: WorkflowStatus::InProgress.to_string(),
        })?;
    if status.is_terminal() {
        return Err(BmsError::InvalidTransition {
            from: status.to_string(),
            to: WorkflowStatus::InProgress.to_string(),
        });
    }

    let current: KycStage = wf
        .current_stage
        .parse()
        .map_err(|_| BmsError::InvalidStageOrder {
            current: wf.current_stage.clone(),
            attempted: attempted.to_string(),
        })?;

    let next = workflow::verify_stage(current, attempted)?;

    let old_level = wf.kyc_level;
    let mut active: kyc_workflows::ActiveModel = wf.into();
    if let Some(next_stage) = next {
        active.current_stage = Set(next_stage.to_string());
        // Monotonic: never lower an already-granted level
        active.kyc_level = Set(old_level.max(next_stage.level()));
    } else {
        // Address verified; workflow stays at the final stage until completed
        active.kyc_level = Set(old_level.max(KycStage::Address.level()));
    }
    if status == WorkflowStatus::Pending {
        active.status = Set(workflow::transition(status, WorkflowStatus::InProgress)?.to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        workflow_id = %workflow_id,
        stage = %attempted,
        level = updated.kyc_level,
        "KYC stage verified"
    );
    Ok(updated)
}

/// Complete the workflow. Requires the final stage to be current and, when
/// risk is critical, a named approver.
pub async fn complete_workflow(
    db: &DatabaseConnection,
    workflow_id: Uuid,
    approved_by: Option<String>,
) -> Result<kyc_workflows::Model, BmsError> {
    let txn = db.begin().await?;

    let wf = KycWorkflows::find_by_id(workflow_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "KYC workflow",
            id: workflow_id.to_string(),
        })?;

    let current: KycStage = wf
        .current_stage
        .parse()
        .map_err(|_| BmsError::InvalidStageOrder {
            current: wf.current_stage.clone(),
            attempted: KycStage::Address.to_string(),
        })?;
    if current != KycStage::Address {
        return Err(BmsError::InvalidStageOrder {
            current: current.to_string(),
            attempted: KycStage::Address.to_string(),
        });
    }

    let risk: RiskLevel = wf.risk_level.parse().unwrap_or(RiskLevel::Low);
    if risk == RiskLevel::Critical && approved_by.is_none() {
        return Err(BmsError::ApprovalRequired);
    }

    let status: WorkflowStatus = wf
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: wf.status.clone(),
            to: WorkflowStatus::Completed.to_string(),
        })?;
    let next = workflow::transition(status, WorkflowStatus::Completed)?;

    let mut active: kyc_workflows::ActiveModel = wf.into();
    active.status = Set(next.to_string());
    if approved_by.is_some() {
        active.approved_by = Set(approved_by);
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(workflow_id = %workflow_id, "KYC workflow completed");
    Ok(updated)
}

pub async fn cancel_workflow(
    db: &DatabaseConnection,
    workflow_id: Uuid,
) -> Result<kyc_workflows::Model, BmsError> {
    let txn = db.begin().await?;

    let wf = KycWorkflows::find_by_id(workflow_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "KYC workflow",
            id: workflow_id.to_string(),
        })?;

    let status: WorkflowStatus = wf
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: wf.status.clone(),
            to: WorkflowStatus::Cancelled.to_string(),
        })?;
    let next = workflow::transition(status, WorkflowStatus::Cancelled)?;

    let mut active: kyc_workflows::ActiveModel = wf.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}
