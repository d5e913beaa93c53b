//! Workflow state machines
//!
//! Legal transitions per entity family. Everything here is pure; services
//! call into these checks inside their transactions.

use crate::error::BmsError;
use crate::models::common::WorkflowStatus;
use crate::models::incident::IncidentStatus;
use crate::models::kyc::KycStage;
use crate::models::ticket::TicketStatus;

/// Generic machine: pending → in_progress → completed, cancelled reachable
/// from pending or in_progress only. completed and cancelled are terminal.
pub fn can_transition(from: WorkflowStatus, to: WorkflowStatus) -> bool {
    use WorkflowStatus::*;
    matches!(
        (from, to),
        (Pending, InProgress) | (InProgress, Completed) | (Pending, Cancelled) | (InProgress, Cancelled)
    )
}

pub fn transition(from: WorkflowStatus, to: WorkflowStatus) -> Result<WorkflowStatus, BmsError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(BmsError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// A later KYC stage cannot complete while an earlier one is still pending,
/// so the only stage a reviewer may complete is the workflow's current one.
pub fn verify_stage(current: KycStage, attempted: KycStage) -> Result<Option<KycStage>, BmsError> {
    if attempted != current {
        return Err(BmsError::InvalidStageOrder {
            current: current.to_string(),
            attempted: attempted.to_string(),
        });
    }
    Ok(current.next())
}

/// Tickets move strictly forward: open → pending → resolved → closed
pub fn transition_ticket(from: TicketStatus, to: TicketStatus) -> Result<TicketStatus, BmsError> {
    use TicketStatus::*;
    let legal = matches!(
        (from, to),
        (Open, Pending) | (Pending, Resolved) | (Resolved, Closed)
    );
    if legal {
        Ok(to)
    } else {
        Err(BmsError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Incidents move strictly forward: open → investigating → contained → resolved
pub fn transition_incident(
    from: IncidentStatus,
    to: IncidentStatus,
) -> Result<IncidentStatus, BmsError> {
    use IncidentStatus::*;
    let legal = matches!(
        (from, to),
        (Open, Investigating) | (Investigating, Contained) | (Contained, Resolved)
    );
    if legal {
        Ok(to)
    } else {
        Err(BmsError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_chain() {
        use WorkflowStatus::*;
        assert_eq!(transition(Pending, InProgress).unwrap(), InProgress);
        assert_eq!(transition(InProgress, Completed).unwrap(), Completed);
    }

    #[test]
    fn cancel_only_before_completion() {
        use WorkflowStatus::*;
        assert!(transition(Pending, Cancelled).is_ok());
        assert!(transition(InProgress, Cancelled).is_ok());
        assert!(transition(Completed, Cancelled).is_err());
    }

    #[test]
    fn terminal_states_are_final() {
        use WorkflowStatus::*;
        for target in [Pending, InProgress, Completed, Cancelled] {
            assert!(!can_transition(Completed, target));
            assert!(!can_transition(Cancelled, target));
        }
    }

    #[test]
    fn no_skipping_in_progress() {
        use WorkflowStatus::*;
        let err = transition(Pending, Completed).unwrap_err();
        match err {
            crate::error::BmsError::InvalidTransition { from, to } => {
                assert_eq!(from, "pending");
                assert_eq!(to, "completed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn kyc_stage_order_enforced() {
        // Cannot verify identity while phone is still the current stage
        assert!(verify_stage(KycStage::Phone, KycStage::Identity).is_err());
        // Verifying the current stage advances to the next
        assert_eq!(
            verify_stage(KycStage::Phone, KycStage::Phone).unwrap(),
            Some(KycStage::Identity)
        );
        // Address is the last stage
        assert_eq!(verify_stage(KycStage::Address, KycStage::Address).unwrap(), None);
    }

    #[test]
    fn kyc_levels_rise_monotonically() {
        let mut stage = KycStage::Email;
        let mut level = stage.level();
        while let Some(next) = stage.next() {
            assert!(next.level() >= level);
            level = next.level();
            stage = next;
        }
        assert_eq!(level, 3);
    }

    #[test]
    fn ticket_chain_is_forward_only() {
        use TicketStatus::*;
        assert!(transition_ticket(Open, Pending).is_ok());
        assert!(transition_ticket(Pending, Resolved).is_ok());
        assert!(transition_ticket(Resolved, Closed).is_ok());
        assert!(transition_ticket(Resolved, Open).is_err());
        assert!(transition_ticket(Closed, Resolved).is_err());
        assert!(transition_ticket(Open, Resolved).is_err());
    }

    #[test]
    fn incident_chain_is_forward_only() {
        use IncidentStatus::*;
        assert!(transition_incident(Open, Investigating).is_ok());
        assert!(transition_incident(Investigating, Contained).is_ok());
        assert!(transition_incident(Contained, Resolved).is_ok());
        assert!(transition_incident(Resolved, Open).is_err());
        assert!(transition_incident(Open, Contained).is_err());
    }
}
