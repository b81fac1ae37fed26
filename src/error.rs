use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schema setup or store file creation failed.
    #[error("store initialization failed: {0}")]
    Initialization(String),

    /// A user with this `user_id` already exists.
    #[error("user already exists: {user_id}")]
    DuplicateUser { user_id: String },

    /// A referral where referrer and referred are the same account.
    #[error("user {id} cannot refer themselves")]
    SelfReferral { id: i64 },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures of the storage engine itself, as opposed to a
    /// rejected request. Callers use this to decide whether a retry makes sense.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Database(_))
    }
}
