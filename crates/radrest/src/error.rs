/// All expected domain outcomes, returned as values.
///
/// Everything except `Storage` is a recoverable business result the transport
/// layer translates to a client-facing response. `Storage` wraps driver
/// failures (connectivity, constraint violations outside our control); it
/// aborts the surrounding transaction and must never be conflated with the
/// business kinds.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("user '{0}' does not exist")]
    UserNotFound(String),

    #[error("group '{0}' does not exist")]
    GroupNotFound(String),

    #[error("NAS '{0}' does not exist")]
    NasNotFound(String),

    #[error("user '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("group '{0}' already exists")]
    GroupAlreadyExists(String),

    #[error("NAS '{0}' already exists")]
    NasAlreadyExists(String),

    #[error("'{name}' does not exist: create it first or allow peer creation")]
    PeerNotFound { name: String },

    #[error(
        "'{name}' would be deleted as it has no attributes of its own: \
         delete it first or disable peer-deletion prevention"
    )]
    PeerWouldBeDeleted { name: String },

    #[error("resulting entity would have no attributes and no memberships")]
    WouldHaveNoAttributes,

    #[error("group '{0}' still has members: delete them first or ignore members")]
    StillHasMembers(String),

    #[error("membership list has one or more duplicate names")]
    DuplicateMembership,

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("membership priority must be at least 1")]
    InvalidPriority,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
