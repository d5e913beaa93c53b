//! Affiliate program and commission-tracking types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAffiliateProgramRequest {
    pub name: String,
    /// Fraction in 0..=1, e.g. 0.25 for 25%
    pub commission_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAffiliateTrackingRequest {
    pub program_id: Uuid,
    pub affiliate_id: String,
    pub referred_user_id: String,
}

/// Request to accrue newly earned commission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCommissionRequest {
    pub amount: Decimal,
}

/// Request to pay out commission; rejected when it would exceed earnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayCommissionRequest {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateProgramResponse {
    pub id: Uuid,
    pub name: String,
    pub commission_rate: Decimal,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::affiliate_programs::Model> for AffiliateProgramResponse {
    fn from(model: crate::entities::affiliate_programs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            commission_rate: model.commission_rate,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateTrackingResponse {
    pub id: Uuid,
    pub program_id: Uuid,
    pub affiliate_id: String,
    pub referred_user_id: String,
    pub commission_earned: Decimal,
    pub commission_paid: Decimal,
    pub commission_outstanding: Decimal,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::affiliate_trackings::Model> for AffiliateTrackingResponse {
    fn from(model: crate::entities::affiliate_trackings::Model) -> Self {
        let outstanding = model.commission_earned - model.commission_paid;
        Self {
            id: model.id,
            program_id: model.program_id,
            affiliate_id: model.affiliate_id,
            referred_user_id: model.referred_user_id,
            commission_earned: model.commission_earned,
            commission_paid: model.commission_paid,
            commission_outstanding: outstanding,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}
