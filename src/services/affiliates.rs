//! Affiliate program and commission service
//!
//! commission_paid can never overtake commission_earned. Accrual and
//! payout both run transactionally so concurrent payouts cannot overdraw.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::entities::affiliate_programs::{self, Entity as AffiliatePrograms};
use crate::entities::affiliate_trackings::{self, Entity as AffiliateTrackings};
use crate::error::BmsError;
use crate::models::affiliate::{CreateAffiliateProgramRequest, CreateAffiliateTrackingRequest};
use crate::models::common::WorkflowStatus;
use crate::validation::{FieldViolation, ValidateInsert};

pub async fn create_program(
    db: &DatabaseConnection,
    request: CreateAffiliateProgramRequest,
) -> Result<affiliate_programs::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let now = Utc::now().into();
    let model = affiliate_programs::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(request.name),
        commission_rate: Set(request.commission_rate),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    tracing::info!(program_id = %created.id, name = %created.name, "affiliate program created");
    Ok(created)
}

pub async fn create_tracking(
    db: &DatabaseConnection,
    request: CreateAffiliateTrackingRequest,
) -> Result<affiliate_trackings::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    // Referrals only attach to live programs
    let program = AffiliatePrograms::find_by_id(request.program_id)
        .one(db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "affiliate program",
            id: request.program_id.to_string(),
        })?;
    if !program.is_active {
        return Err(BmsError::Validation(vec![FieldViolation::new(
            "program_id",
            "inactive",
            "affiliate program is not active",
        )]));
    }

    let now = Utc::now().into();
    let model = affiliate_trackings::ActiveModel {
        id: Set(Uuid::new_v4()),
        program_id: Set(request.program_id),
        affiliate_id: Set(request.affiliate_id),
        referred_user_id: Set(request.referred_user_id),
        commission_earned: Set(Decimal::ZERO),
        commission_paid: Set(Decimal::ZERO),
        status: Set(WorkflowStatus::Pending.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(model.insert(db).await?)
}

/// Accrue newly earned commission
pub async fn record_commission(
    db: &DatabaseConnection,
    tracking_id: Uuid,
    amount: Decimal,
) -> Result<affiliate_trackings::Model, BmsError> {
    if amount <= Decimal::ZERO {
        return Err(BmsError::Validation(vec![FieldViolation::new(
            "amount",
            "out_of_range",
            "amount must be positive",
        )]));
    }

    let txn = db.begin().await?;

    let tracking = AffiliateTrackings::find_by_id(tracking_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "affiliate tracking",
            id: tracking_id.to_string(),
        })?;

    let new_earned = tracking.commission_earned + amount;
    let was_pending = tracking.status == WorkflowStatus::Pending.to_string();
    let mut active: affiliate_trackings::ActiveModel = tracking.into();
    active.commission_earned = Set(new_earned);
    if was_pending {
        // First accrual puts the referral in progress
        active.status = Set(WorkflowStatus::InProgress.to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Pay out commission. Rejected when the payout would push commission_paid
/// past commission_earned.
pub async fn pay_commission(
    db: &DatabaseConnection,
    tracking_id: Uuid,
    amount: Decimal,
) -> Result<affiliate_trackings::Model, BmsError> {
    if amount <= Decimal::ZERO {
        return Err(BmsError::Validation(vec![FieldViolation::new(
            "amount",
            "out_of_range",
            "amount must be positive",
        )]));
    }

    let txn = db.begin().await?;

    let tracking = AffiliateTrackings::find_by_id(tracking_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "affiliate tracking",
            id: tracking_id.to_string(),
        })?;

    let new_paid = tracking.commission_paid + amount;
    if new_paid > tracking.commission_earned {
        return Err(BmsError::CommissionExceedsEarned {
            paid: new_paid.to_string(),
            earned: tracking.commission_earned.to_string(),
        });
    }

    let mut active: affiliate_trackings::ActiveModel = tracking.into();
    active.commission_paid = Set(new_paid);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        tracking_id = %tracking_id,
        paid = %updated.commission_paid,
        earned = %updated.commission_earned,
        "commission paid out"
    );
    Ok(updated)
}

pub async fn deactivate_program(
    db: &DatabaseConnection,
    program_id: Uuid,
) -> Result<affiliate_programs::Model, BmsError> {
    let program = AffiliatePrograms::find_by_id(program_id)
        .one(db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "affiliate program",
            id: program_id.to_string(),
        })?;

    let mut active: affiliate_programs::ActiveModel = program.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(db).await?)
}
