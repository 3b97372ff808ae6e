pub mod dashboard;
pub mod error;
pub mod naming;
pub mod payment;
pub mod status;
pub mod types;
pub mod validation;
