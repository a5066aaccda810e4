//! Consistency services: the only decision-making layer.
//!
//! One service per entity kind. Each public operation runs inside exactly one
//! short-lived transaction: validation queries first, mutations last, commit
//! on success. Dropping the transaction on an error path (or on caller
//! cancellation) rolls everything back, so partial row sets never persist.
//!
//! Known limitation: existence and cascade-safety checks are separate queries
//! ahead of the final mutation. A concurrent transaction targeting the same
//! name can interleave between check and mutation when the store's isolation
//! level is weaker than serializable. No row locking or optimistic versioning
//! is layered on top; deployments pick their isolation level.

mod groups;
mod nas;
mod users;

pub use groups::GroupService;
pub use nas::NasService;
pub use users::UserService;

/// Default keyset page size shared by all three entity kinds.
pub const DEFAULT_PAGE_SIZE: i64 = 100;
