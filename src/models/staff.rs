//! Staff directory types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    ComplianceOfficer,
    SupportAgent,
    TreasuryManager,
    SecurityAnalyst,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Admin => write!(f, "admin"),
            StaffRole::ComplianceOfficer => write!(f, "compliance_officer"),
            StaffRole::SupportAgent => write!(f, "support_agent"),
            StaffRole::TreasuryManager => write!(f, "treasury_manager"),
            StaffRole::SecurityAnalyst => write!(f, "security_analyst"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(StaffRole::Admin),
            "compliance_officer" => Ok(StaffRole::ComplianceOfficer),
            "support_agent" => Ok(StaffRole::SupportAgent),
            "treasury_manager" => Ok(StaffRole::TreasuryManager),
            "security_analyst" => Ok(StaffRole::SecurityAnalyst),
            _ => Err(format!("Unknown staff role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::staff_members::Model> for StaffResponse {
    fn from(model: crate::entities::staff_members::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role: model.role,
            department: model.department,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}
