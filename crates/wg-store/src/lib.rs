//! wg-store - Approval record store for Workspace Guardian
//!
//! Stores mutable approval rows with soft-delete semantics: approving
//! upserts a whole row keyed on `(resource_id, workspace_id)` through a
//! single MERGE, revoking flips flag fields in place, and rows are never
//! physically deleted. Expiration is evaluated at read time; there is no
//! background eviction.

pub mod error;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use model::{ApprovalRequest, ApprovedResource};
pub use store::ApprovalStore;
