//! Domain layer for managing FreeRADIUS configuration tables.
//!
//! Users and groups are not stored as single rows: their attributes and
//! memberships are scattered across independent tables (radcheck, radreply,
//! radgroupcheck, radgroupreply, radusergroup) with no foreign keys between
//! them. Whether an entity "exists" is derived from whether any of its rows
//! do, and the services in this crate enforce the referential and structural
//! rules the storage layer cannot.

pub mod db;
pub mod error;
pub mod model;
pub mod patch;
pub mod service;
pub mod store;
pub mod tables;

pub use db::{Database, DatabaseSetupError};
pub use error::{DomainError, DomainResult};
pub use model::{AttributeOpValue, Group, GroupUser, Nas, User, UserGroup};
pub use patch::{GroupPatch, NasPatch, UserPatch};
pub use service::{GroupService, NasService, UserService, DEFAULT_PAGE_SIZE};
pub use tables::Tables;
