pub mod affiliates;
pub mod compliance;
pub mod incidents;
pub mod kyc;
pub mod notifications;
pub mod staff;
pub mod tickets;
pub mod treasury;
pub mod validation;
