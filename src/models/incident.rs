//! Security incident types
//!
//! Lifecycle progresses strictly forward: open → investigating → contained → resolved.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentSeverity {
    Minor,
    Major,
    Critical,
    Catastrophic,
}

impl std::fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentSeverity::Minor => write!(f, "minor"),
            IncidentSeverity::Major => write!(f, "major"),
            IncidentSeverity::Critical => write!(f, "critical"),
            IncidentSeverity::Catastrophic => write!(f, "catastrophic"),
        }
    }
}

impl std::str::FromStr for IncidentSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(IncidentSeverity::Minor),
            "major" => Ok(IncidentSeverity::Major),
            "critical" => Ok(IncidentSeverity::Critical),
            "catastrophic" => Ok(IncidentSeverity::Catastrophic),
            _ => Err(format!("Unknown incident severity: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Open,
    Investigating,
    Contained,
    Resolved,
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentStatus::Open => write!(f, "open"),
            IncidentStatus::Investigating => write!(f, "investigating"),
            IncidentStatus::Contained => write!(f, "contained"),
            IncidentStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for IncidentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(IncidentStatus::Open),
            "investigating" => Ok(IncidentStatus::Investigating),
            "contained" => Ok(IncidentStatus::Contained),
            "resolved" => Ok(IncidentStatus::Resolved),
            _ => Err(format!("Unknown incident status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncidentRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub severity: String,
    /// Defaults to now when omitted
    #[serde(default)]
    pub detected_at: Option<DateTime<FixedOffset>>,
    pub reported_by: String,
    #[serde(default)]
    pub affected_systems: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionIncidentRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub severity: String,
    pub status: String,
    pub detected_at: String,
    pub contained_at: Option<String>,
    pub resolved_at: Option<String>,
    pub reported_by: String,
    pub affected_systems: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::security_incidents::Model> for IncidentResponse {
    fn from(model: crate::entities::security_incidents::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            severity: model.severity,
            status: model.status,
            detected_at: model.detected_at.to_rfc3339(),
            contained_at: model.contained_at.map(|t| t.to_rfc3339()),
            resolved_at: model.resolved_at.map(|t| t.to_rfc3339()),
            reported_by: model.reported_by,
            affected_systems: model.affected_systems,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}
