pub mod affiliate;
pub mod common;
pub mod compliance;
pub mod incident;
pub mod kyc;
pub mod staff;
pub mod ticket;
pub mod wallet_operation;
