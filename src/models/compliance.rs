//! Compliance report types

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report categories; sar and ctr carry regulatory filing deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Sar,
    Ctr,
    AnnualAudit,
    InternalReview,
}

impl ReportType {
    /// Regulatory filings must carry a due date
    pub fn requires_due_date(&self) -> bool {
        matches!(self, ReportType::Sar | ReportType::Ctr)
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Sar => write!(f, "sar"),
            ReportType::Ctr => write!(f, "ctr"),
            ReportType::AnnualAudit => write!(f, "annual_audit"),
            ReportType::InternalReview => write!(f, "internal_review"),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sar" => Ok(ReportType::Sar),
            "ctr" => Ok(ReportType::Ctr),
            "annual_audit" => Ok(ReportType::AnnualAudit),
            "internal_review" => Ok(ReportType::InternalReview),
            _ => Err(format!("Unknown report type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComplianceReportRequest {
    pub report_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub summary: Option<String>,
    pub created_by: String,
}

/// Request to file a report with the regulator; accepted exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReportRequest {
    pub filed_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReportResponse {
    pub id: Uuid,
    pub report_type: String,
    pub user_id: Option<String>,
    pub transaction_ids: serde_json::Value,
    pub status: String,
    pub due_date: Option<String>,
    pub filed_at: Option<String>,
    pub filed_by: Option<String>,
    pub summary: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::compliance_reports::Model> for ComplianceReportResponse {
    fn from(model: crate::entities::compliance_reports::Model) -> Self {
        Self {
            id: model.id,
            report_type: model.report_type,
            user_id: model.user_id,
            transaction_ids: model.transaction_ids,
            status: model.status,
            due_date: model.due_date.map(|t| t.to_rfc3339()),
            filed_at: model.filed_at.map(|t| t.to_rfc3339()),
            filed_by: model.filed_by,
            summary: model.summary,
            created_by: model.created_by,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}
