//! Insert validation layer
//!
//! Every create request is checked field by field before anything touches
//! the database. A failing payload yields the complete violation list and
//! nothing is persisted. Accepted payloads re-validate cleanly, so a record
//! can be serialized and pushed back through `validate_insert` unchanged.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::affiliate::{CreateAffiliateProgramRequest, CreateAffiliateTrackingRequest};
use crate::models::compliance::{CreateComplianceReportRequest, ReportType};
use crate::models::incident::{CreateIncidentRequest, IncidentSeverity};
use crate::models::kyc::CreateKycWorkflowRequest;
use crate::models::staff::{CreateStaffRequest, StaffRole};
use crate::models::ticket::{
    AuthorRole, CreateTicketMessageRequest, CreateTicketRequest, TicketPriority,
};
use crate::models::wallet_operation::{CreateWalletOperationRequest, WalletOperationType};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Maximum fractional digits for monetary amounts (matches the 30,8 columns)
const AMOUNT_SCALE: u32 = 8;
/// Maximum fractional digits for commission rates (matches the 5,4 column)
const RATE_SCALE: u32 = 4;

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Implemented by every create request; collects all violations rather than
/// stopping at the first
pub trait ValidateInsert {
    fn validate(&self) -> Result<(), Vec<FieldViolation>>;
}

/// Entity selector for the generic dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    KycWorkflow,
    WalletOperation,
    ComplianceReport,
    SupportTicket,
    TicketMessage,
    AffiliateProgram,
    AffiliateTracking,
    SecurityIncident,
    StaffMember,
}

/// Validate an untyped insert payload for the given entity.
///
/// Deserializes into the typed request, runs the field checks, and returns
/// the accepted record re-serialized. All-or-nothing: any violation rejects
/// the whole payload.
pub fn validate_insert(
    kind: EntityKind,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, Vec<FieldViolation>> {
    match kind {
        EntityKind::KycWorkflow => check::<CreateKycWorkflowRequest>(payload),
        EntityKind::WalletOperation => check::<CreateWalletOperationRequest>(payload),
        EntityKind::ComplianceReport => check::<CreateComplianceReportRequest>(payload),
        EntityKind::SupportTicket => check::<CreateTicketRequest>(payload),
        EntityKind::TicketMessage => check::<CreateTicketMessageRequest>(payload),
        EntityKind::AffiliateProgram => check::<CreateAffiliateProgramRequest>(payload),
        EntityKind::AffiliateTracking => check::<CreateAffiliateTrackingRequest>(payload),
        EntityKind::SecurityIncident => check::<CreateIncidentRequest>(payload),
        EntityKind::StaffMember => check::<CreateStaffRequest>(payload),
    }
}

fn check<T>(payload: &serde_json::Value) -> Result<serde_json::Value, Vec<FieldViolation>>
where
    T: DeserializeOwned + Serialize + ValidateInsert,
{
    let request: T = serde_json::from_value(payload.clone()).map_err(|e| {
        vec![FieldViolation::new(
            "payload",
            "malformed",
            format!("payload does not match entity shape: {}", e),
        )]
    })?;

    request.validate()?;

    serde_json::to_value(&request).map_err(|e| {
        vec![FieldViolation::new(
            "payload",
            "serialize",
            format!("accepted record failed to serialize: {}", e),
        )]
    })
}

// ---- field helpers ----

fn require_non_empty(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(
            field,
            "required",
            format!("{} must be a non-empty string", field),
        ));
    }
}

fn require_enum<T>(field: &'static str, value: &str, out: &mut Vec<FieldViolation>)
where
    T: FromStr<Err = String>,
{
    if let Err(msg) = value.parse::<T>() {
        out.push(FieldViolation::new(field, "invalid_enum", msg));
    }
}

fn require_positive_amount(field: &'static str, value: Decimal, out: &mut Vec<FieldViolation>) {
    if value <= Decimal::ZERO {
        out.push(FieldViolation::new(
            field,
            "out_of_range",
            format!("{} must be positive", field),
        ));
    }
    if value.scale() > AMOUNT_SCALE {
        out.push(FieldViolation::new(
            field,
            "precision",
            format!("{} must carry at most {} decimal places", field, AMOUNT_SCALE),
        ));
    }
}

fn require_email(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    if !EMAIL_RE.is_match(value) {
        out.push(FieldViolation::new(
            field,
            "format",
            format!("{} is not a valid email address", field),
        ));
    }
}

/// 0x-prefixed 32-byte transaction hash
pub fn require_tx_hash(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    let ok = value
        .strip_prefix("0x")
        .filter(|rest| rest.len() == 64)
        .map(|rest| hex::decode(rest).is_ok())
        .unwrap_or(false);
    if !ok {
        out.push(FieldViolation::new(
            field,
            "format",
            format!("{} must be a 0x-prefixed 64-character hex string", field),
        ));
    }
}

// ---- per-entity rules ----

impl ValidateInsert for CreateKycWorkflowRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("user_id", &self.user_id, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateWalletOperationRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_enum::<WalletOperationType>("operation_type", &self.operation_type, &mut out);
        require_non_empty("asset", &self.asset, &mut out);
        require_non_empty("initiated_by", &self.initiated_by, &mut out);
        require_positive_amount("amount", self.amount, &mut out);
        if self.required_approvals < 1 {
            out.push(FieldViolation::new(
                "required_approvals",
                "out_of_range",
                "required_approvals must be at least 1",
            ));
        }
        if self.required_confirmations < 0 {
            out.push(FieldViolation::new(
                "required_confirmations",
                "out_of_range",
                "required_confirmations must not be negative",
            ));
        }
        if let Ok(op_type) = self.operation_type.parse::<WalletOperationType>() {
            if op_type.requires_destination() {
                match self.destination_address.as_deref() {
                    Some(addr) if !addr.trim().is_empty() => {}
                    _ => out.push(FieldViolation::new(
                        "destination_address",
                        "required",
                        format!("destination_address is required for {}", op_type),
                    )),
                }
            }
        }
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateComplianceReportRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_enum::<ReportType>("report_type", &self.report_type, &mut out);
        require_non_empty("created_by", &self.created_by, &mut out);
        if let Ok(report_type) = self.report_type.parse::<ReportType>() {
            if report_type.requires_due_date() && self.due_date.is_none() {
                out.push(FieldViolation::new(
                    "due_date",
                    "required",
                    format!("due_date is required for {} reports", report_type),
                ));
            }
        }
        for (i, tx_id) in self.transaction_ids.iter().enumerate() {
            if tx_id.trim().is_empty() {
                out.push(FieldViolation::new(
                    "transaction_ids",
                    "required",
                    format!("transaction_ids[{}] must be a non-empty string", i),
                ));
            }
        }
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateTicketRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("user_id", &self.user_id, &mut out);
        require_non_empty("subject", &self.subject, &mut out);
        require_enum::<TicketPriority>("priority", &self.priority, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateTicketMessageRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("author_id", &self.author_id, &mut out);
        require_enum::<AuthorRole>("author_role", &self.author_role, &mut out);
        require_non_empty("body", &self.body, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateAffiliateProgramRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("name", &self.name, &mut out);
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            out.push(FieldViolation::new(
                "commission_rate",
                "out_of_range",
                "commission_rate must be between 0 and 1",
            ));
        }
        if self.commission_rate.scale() > RATE_SCALE {
            out.push(FieldViolation::new(
                "commission_rate",
                "precision",
                format!(
                    "commission_rate must carry at most {} decimal places",
                    RATE_SCALE
                ),
            ));
        }
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateAffiliateTrackingRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("affiliate_id", &self.affiliate_id, &mut out);
        require_non_empty("referred_user_id", &self.referred_user_id, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateIncidentRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("title", &self.title, &mut out);
        require_enum::<IncidentSeverity>("severity", &self.severity, &mut out);
        require_non_empty("reported_by", &self.reported_by, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

impl ValidateInsert for CreateStaffRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut out = Vec::new();
        require_non_empty("email", &self.email, &mut out);
        if !self.email.trim().is_empty() {
            require_email("email", &self.email, &mut out);
        }
        require_non_empty("full_name", &self.full_name, &mut out);
        require_enum::<StaffRole>("role", &self.role, &mut out);
        if out.is_empty() { Ok(()) } else { Err(out) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wallet_operation_rejects_unknown_type() {
        let payload = json!({
            "operation_type": "teleport",
            "asset": "BTC",
            "amount": "1.5",
            "required_approvals": 2,
            "initiated_by": "treasury-bot"
        });
        let err = validate_insert(EntityKind::WalletOperation, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "operation_type" && v.code == "invalid_enum"));
    }

    #[test]
    fn wallet_operation_rejects_excess_scale() {
        let payload = json!({
            "operation_type": "rebalance",
            "asset": "BTC",
            "amount": "1.123456789",
            "required_approvals": 2,
            "initiated_by": "treasury-bot"
        });
        let err = validate_insert(EntityKind::WalletOperation, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "amount" && v.code == "precision"));
    }

    #[test]
    fn withdrawal_requires_destination() {
        let payload = json!({
            "operation_type": "withdrawal",
            "asset": "ETH",
            "amount": "10",
            "required_approvals": 3,
            "initiated_by": "treasury-bot"
        });
        let err = validate_insert(EntityKind::WalletOperation, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "destination_address"));
    }

    #[test]
    fn sar_report_requires_due_date() {
        let payload = json!({
            "report_type": "sar",
            "created_by": "compliance-1"
        });
        let err = validate_insert(EntityKind::ComplianceReport, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "due_date" && v.code == "required"));
    }

    #[test]
    fn internal_review_needs_no_due_date() {
        let payload = json!({
            "report_type": "internal_review",
            "created_by": "compliance-1"
        });
        assert!(validate_insert(EntityKind::ComplianceReport, &payload).is_ok());
    }

    #[test]
    fn commission_rate_must_be_fraction() {
        let payload = json!({ "name": "VIP tier", "commission_rate": "1.5" });
        let err = validate_insert(EntityKind::AffiliateProgram, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "commission_rate" && v.code == "out_of_range"));
    }

    #[test]
    fn staff_email_format_checked() {
        let payload = json!({
            "email": "not-an-email",
            "full_name": "Dana Ops",
            "role": "support_agent"
        });
        let err = validate_insert(EntityKind::StaffMember, &payload).unwrap_err();
        assert!(err.iter().any(|v| v.field == "email" && v.code == "format"));
    }

    #[test]
    fn violations_accumulate_across_fields() {
        let payload = json!({
            "operation_type": "teleport",
            "asset": "",
            "amount": "-1",
            "required_approvals": 0,
            "initiated_by": ""
        });
        let err = validate_insert(EntityKind::WalletOperation, &payload).unwrap_err();
        assert!(err.len() >= 4);
    }

    #[test]
    fn accepted_payload_revalidates() {
        let payload = json!({
            "operation_type": "internal_transfer",
            "asset": "USDC",
            "amount": "250000.50",
            "required_approvals": 2,
            "required_confirmations": 12,
            "initiated_by": "treasury-bot"
        });
        let accepted = validate_insert(EntityKind::WalletOperation, &payload).unwrap();
        let again = validate_insert(EntityKind::WalletOperation, &accepted).unwrap();
        assert_eq!(accepted, again);
    }

    #[test]
    fn tx_hash_format() {
        let mut out = Vec::new();
        require_tx_hash(
            "tx_hash",
            "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
            &mut out,
        );
        assert!(out.is_empty());

        require_tx_hash("tx_hash", "0xdeadbeef", &mut out);
        require_tx_hash("tx_hash", "no-prefix", &mut out);
        assert_eq!(out.len(), 2);
    }
}
