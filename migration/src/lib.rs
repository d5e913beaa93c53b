pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_staff_members;
mod m20260801_000002_create_kyc_workflows;
mod m20260801_000003_create_wallet_operations;
mod m20260801_000004_create_wallet_operation_approvals;
mod m20260801_000005_create_compliance_reports;
mod m20260801_000006_create_support_tickets;
mod m20260801_000007_create_ticket_messages;
mod m20260801_000008_create_affiliate_programs;
mod m20260801_000009_create_affiliate_trackings;
mod m20260801_000010_create_security_incidents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_staff_members::Migration),
            Box::new(m20260801_000002_create_kyc_workflows::Migration),
            Box::new(m20260801_000003_create_wallet_operations::Migration),
            Box::new(m20260801_000004_create_wallet_operation_approvals::Migration),
            Box::new(m20260801_000005_create_compliance_reports::Migration),
            Box::new(m20260801_000006_create_support_tickets::Migration),
            Box::new(m20260801_000007_create_ticket_messages::Migration),
            Box::new(m20260801_000008_create_affiliate_programs::Migration),
            Box::new(m20260801_000009_create_affiliate_trackings::Migration),
            Box::new(m20260801_000010_create_security_incidents::Migration),
        ]
    }
}
