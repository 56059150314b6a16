//! Top-level error wrapper types.

use crate::{CatalogError, CommandError, ConfigError, PlatformError};

/// Every error an emojibot operation can produce.
///
/// # Examples
///
/// ```
/// use emojibot_error::{EmojibotError, EmojibotErrorKind, ConfigError};
///
/// let err: EmojibotError = ConfigError::new("missing catalog_path").into();
/// assert!(matches!(err.kind(), EmojibotErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum EmojibotErrorKind {
    /// Catalog load/save error
    #[from(CatalogError)]
    Catalog(CatalogError),
    /// User-facing command or rewrite error
    #[from(CommandError)]
    Command(CommandError),
    /// Chat platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Emojibot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Emojibot Error: {}", _0)]
pub struct EmojibotError(Box<EmojibotErrorKind>);

impl EmojibotError {
    /// Create a new error from a kind.
    pub fn new(kind: EmojibotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &EmojibotErrorKind {
        &self.0
    }

    /// Text to post back to the user who triggered the failure.
    ///
    /// Command errors are already phrased for users; everything else is
    /// reported with its kind so the user knows the bot gave up.
    pub fn user_message(&self) -> String {
        match self.kind() {
            EmojibotErrorKind::Command(e) => e.kind.to_string(),
            EmojibotErrorKind::Platform(e) => format!("Something went wrong: {}", e.kind),
            EmojibotErrorKind::Catalog(e) => format!("Something went wrong: {}", e.kind),
            EmojibotErrorKind::Config(e) => format!("Something went wrong: {}", e.message),
        }
    }
}

// Generic From implementation for any type that converts to EmojibotErrorKind
impl<T> From<T> for EmojibotError
where
    T: Into<EmojibotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for emojibot operations.
pub type EmojibotResult<T> = std::result::Result<T, EmojibotError>;
