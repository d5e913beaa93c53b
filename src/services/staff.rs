//! Staff directory service

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::staff_members::{self, Entity as StaffMembers};
use crate::error::BmsError;
use crate::models::staff::CreateStaffRequest;
use crate::validation::ValidateInsert;

pub async fn create_staff(
    db: &DatabaseConnection,
    request: CreateStaffRequest,
) -> Result<staff_members::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now().into();
    let model = staff_members::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(request.email),
        full_name: Set(request.full_name),
        role: Set(request.role),
        department: Set(request.department),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    tracing::info!(staff_id = %created.id, role = %created.role, "staff member added");
    Ok(created)
}

/// Staff are never deleted; deactivation keeps the row for audit trails
pub async fn deactivate_staff(
    db: &DatabaseConnection,
    staff_id: Uuid,
) -> Result<staff_members::Model, BmsError> {
    let member = StaffMembers::find_by_id(staff_id)
        .one(db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "staff member",
            id: staff_id.to_string(),
        })?;

    let mut active: staff_members::ActiveModel = member.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(db).await?)
}
