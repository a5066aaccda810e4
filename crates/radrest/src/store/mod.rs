//! Store adapters: mechanical row access for each entity kind.
//!
//! Adapters never make decisions; they execute existence probes, keyset name
//! scans, aggregate assembly and bulk writes against the scattered tables.
//! Every method borrows a `SqliteConnection` so the calling service owns the
//! surrounding transaction. The three adapters are deliberately independent
//! structs with no shared base.

mod groups;
mod nas;
mod users;

pub use groups::GroupStore;
pub use nas::NasStore;
pub use users::UserStore;
