//! Discord-specific error types.

use derive_getters::Getters;
use emojibot_error::{PlatformError, PlatformErrorKind};

/// Discord adapter error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Invalid Discord snowflake ID.
    #[display("Invalid ID: {_0}")]
    InvalidId(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<DiscordError> for PlatformError {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        match err.kind {
            DiscordErrorKind::InvalidId(id) => PlatformError::new(PlatformErrorKind::InvalidId(id)),
            other => PlatformError::new(PlatformErrorKind::Message(other.to_string())),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
