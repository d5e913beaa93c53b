//! KYC workflow types: verification stages, risk levels, request/response shapes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification stages, completed strictly in order
///
/// Stage progresses: email → phone → identity → address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStage {
    Email,
    Phone,
    Identity,
    Address,
}

impl KycStage {
    /// Next stage in the chain, None once at address
    pub fn next(&self) -> Option<KycStage> {
        match self {
            KycStage::Email => Some(KycStage::Phone),
            KycStage::Phone => Some(KycStage::Identity),
            KycStage::Identity => Some(KycStage::Address),
            KycStage::Address => None,
        }
    }

    /// KYC level held while this stage is the current one: every earlier
    /// stage is verified. Verifying email lifts a fresh workflow to level 1
    /// (current stage phone); verifying identity reaches the level-3 cap.
    pub fn level(&self) -> i16 {
        match self {
            KycStage::Email => 0,
            KycStage::Phone => 1,
            KycStage::Identity => 2,
            KycStage::Address => 3,
        }
    }
}

impl std::fmt::Display for KycStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KycStage::Email => write!(f, "email"),
            KycStage::Phone => write!(f, "phone"),
            KycStage::Identity => write!(f, "identity"),
            KycStage::Address => write!(f, "address"),
        }
    }
}

impl std::str::FromStr for KycStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(KycStage::Email),
            "phone" => Ok(KycStage::Phone),
            "identity" => Ok(KycStage::Identity),
            "address" => Ok(KycStage::Address),
            _ => Err(format!("Unknown KYC stage: {}", s)),
        }
    }
}

/// Customer risk rating from AML screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Request to open a KYC workflow for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateKycWorkflowRequest {
    pub user_id: String,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to mark the current stage verified and advance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceStageRequest {
    /// Stage the reviewer believes they are completing; rejected when it
    /// does not match the workflow's current stage
    pub stage: String,
}

/// Request to complete a workflow; sign-off required at critical risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteKycRequest {
    #[serde(default)]
    pub approved_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycWorkflowResponse {
    pub id: Uuid,
    pub user_id: String,
    pub current_stage: String,
    pub kyc_level: i16,
    pub risk_level: String,
    pub status: String,
    pub sanctions_check: bool,
    pub pep_check: bool,
    pub assigned_to: Option<Uuid>,
    pub approved_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::kyc_workflows::Model> for KycWorkflowResponse {
    fn from(model: crate::entities::kyc_workflows::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            current_stage: model.current_stage,
            kyc_level: model.kyc_level,
            risk_level: model.risk_level,
            status: model.status,
            sanctions_check: model.sanctions_check,
            pep_check: model.pep_check,
            assigned_to: model.assigned_to,
            approved_by: model.approved_by,
            notes: model.notes,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}
