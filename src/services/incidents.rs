//! Security incident service
//!
//! Transitions stamp contained_at/resolved_at and keep the three lifecycle
//! timestamps monotonically non-decreasing.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::entities::security_incidents::{self, Entity as SecurityIncidents};
use crate::error::BmsError;
use crate::models::incident::{CreateIncidentRequest, IncidentStatus};
use crate::validation::ValidateInsert;
use crate::workflow;

pub async fn create_incident(
    db: &DatabaseConnection,
    request: CreateIncidentRequest,
) -> Result<security_incidents::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now();
    let detected_at = request
        .detected_at
        .map(Into::into)
        .unwrap_or_else(|| now.into());

    let model = security_incidents::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(request.title),
        description: Set(request.description),
        severity: Set(request.severity),
        status: Set(IncidentStatus::Open.to_string()),
        detected_at: Set(detected_at),
        contained_at: Set(None),
        resolved_at: Set(None),
        reported_by: Set(request.reported_by),
        affected_systems: Set(serde_json::json!(request.affected_systems)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let created = model.insert(db).await?;
    tracing::warn!(
        incident_id = %created.id,
        severity = %created.severity,
        "security incident opened"
    );
    Ok(created)
}

pub async fn transition_incident(
    db: &DatabaseConnection,
    incident_id: Uuid,
    to: IncidentStatus,
) -> Result<security_incidents::Model, BmsError> {
    let txn = db.begin().await?;

    let incident = SecurityIncidents::find_by_id(incident_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "security incident",
            id: incident_id.to_string(),
        })?;

    let status: IncidentStatus = incident
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: incident.status.clone(),
            to: to.to_string(),
        })?;
    let next = workflow::transition_incident(status, to)?;

    let now = Utc::now();
    // detected_at <= contained_at <= resolved_at, always
    if next == IncidentStatus::Contained && now < incident.detected_at {
        return Err(BmsError::NonMonotonicTimestamp {
            field: "contained_at",
        });
    }
    if next == IncidentStatus::Resolved {
        if let Some(contained_at) = incident.contained_at {
            if now < contained_at {
                return Err(BmsError::NonMonotonicTimestamp {
                    field: "resolved_at",
                });
            }
        }
    }

    let mut active: security_incidents::ActiveModel = incident.into();
    active.status = Set(next.to_string());
    match next {
        IncidentStatus::Contained => active.contained_at = Set(Some(now.into())),
        IncidentStatus::Resolved => active.resolved_at = Set(Some(now.into())),
        _ => {}
    }
    active.updated_at = Set(now.into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(incident_id = %incident_id, status = %updated.status, "incident transitioned");
    Ok(updated)
}
