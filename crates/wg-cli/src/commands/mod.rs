//! Command implementations

pub mod approvals;
pub mod migrate;
pub mod status;
