pub use super::affiliate_programs::Entity as AffiliatePrograms;
pub use super::affiliate_trackings::Entity as AffiliateTrackings;
pub use super::compliance_reports::Entity as ComplianceReports;
pub use super::kyc_workflows::Entity as KycWorkflows;
pub use super::security_incidents::Entity as SecurityIncidents;
pub use super::staff_members::Entity as StaffMembers;
pub use super::support_tickets::Entity as SupportTickets;
pub use super::ticket_messages::Entity as TicketMessages;
pub use super::wallet_operation_approvals::Entity as WalletOperationApprovals;
pub use super::wallet_operations::Entity as WalletOperations;
