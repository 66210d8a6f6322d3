use thiserror::Error;

/// The reason an init-data validation attempt was rejected.
///
/// Only [`FailureReason::InvalidSignature`] points at tampering or a wrong bot token. The other variants mean the
/// payload was malformed, stale, or incomplete. None of the variants carry any part of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureReason {
    #[error("The init data does not contain a signature")]
    MissingSignature,
    #[error("The init data contains a missing or invalid auth_date")]
    InvalidAuthDate,
    #[error("The init data has expired")]
    Expired,
    #[error("The init data signature is invalid")]
    InvalidSignature,
    #[error("The user payload in the init data could not be read")]
    MalformedUserPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("The bot token must not be empty")]
    EmptyBotToken,
    #[error("Invalid maximum init data age. {0}")]
    InvalidMaxAge(String),
}
