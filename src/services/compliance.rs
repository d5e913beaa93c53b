//! Compliance report service
//!
//! filed_at is written exactly once; any second filing attempt is
//! rejected with the original timestamp.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::entities::compliance_reports::{self, Entity as ComplianceReports};
use crate::error::BmsError;
use crate::models::common::WorkflowStatus;
use crate::models::compliance::CreateComplianceReportRequest;
use crate::validation::ValidateInsert;
use crate::workflow;

pub async fn create_report(
    db: &DatabaseConnection,
    request: CreateComplianceReportRequest,
) -> Result<compliance_reports::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now().into();
    let model = compliance_reports::ActiveModel {
        id: Set(Uuid::new_v4()),
        report_type: Set(request.report_type),
        user_id: Set(request.user_id),
        transaction_ids: Set(serde_json::json!(request.transaction_ids)),
        status: Set(WorkflowStatus::Pending.to_string()),
        due_date: Set(request.due_date.map(Into::into)),
        filed_at: Set(None),
        filed_by: Set(None),
        summary: Set(request.summary),
        created_by: Set(request.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    tracing::info!(report_id = %created.id, report_type = %created.report_type, "compliance report opened");
    Ok(created)
}

/// File the report with the regulator. Completes the workflow and stamps
/// filed_at, exactly once.
pub async fn file_report(
    db: &DatabaseConnection,
    report_id: Uuid,
    filed_by: String,
) -> Result<compliance_reports::Model, BmsError> {
    let txn = db.begin().await?;

    let report = ComplianceReports::find_by_id(report_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "compliance report",
            id: report_id.to_string(),
        })?;

    if let Some(filed_at) = report.filed_at {
        return Err(BmsError::AlreadyFiled {
            filed_at: filed_at.to_rfc3339(),
        });
    }

    let status: WorkflowStatus = report
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: report.status.clone(),
            to: WorkflowStatus::Completed.to_string(),
        })?;
    // A report may be filed straight from pending; route it through
    // in_progress so the generic chain is respected.
    let next = if status == WorkflowStatus::Pending {
        let intermediate = workflow::transition(status, WorkflowStatus::InProgress)?;
        workflow::transition(intermediate, WorkflowStatus::Completed)?
    } else {
        workflow::transition(status, WorkflowStatus::Completed)?
    };

    let now = Utc::now();
    let mut active: compliance_reports::ActiveModel = report.into();
    active.status = Set(next.to_string());
    active.filed_at = Set(Some(now.into()));
    active.filed_by = Set(Some(filed_by));
    active.updated_at = Set(now.into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(report_id = %report_id, "compliance report filed");
    Ok(updated)
}

/// Move the report through the generic workflow chain without filing it
pub async fn transition_report(
    db: &DatabaseConnection,
    report_id: Uuid,
    to: WorkflowStatus,
) -> Result<compliance_reports::Model, BmsError> {
    let txn = db.begin().await?;

    let report = ComplianceReports::find_by_id(report_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "compliance report",
            id: report_id.to_string(),
        })?;

    // Completion is reserved for file_report, which stamps filed_at
    if to == WorkflowStatus::Completed {
        return Err(BmsError::InvalidTransition {
            from: report.status.clone(),
            to: to.to_string(),
        });
    }

    let status: WorkflowStatus = report
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: report.status.clone(),
            to: to.to_string(),
        })?;
    let next = workflow::transition(status, to)?;

    let mut active: compliance_reports::ActiveModel = report.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}
