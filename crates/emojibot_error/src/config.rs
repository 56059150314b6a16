//! Errors raised while loading bot configuration.

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojibot_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing bot token");
    /// assert!(err.message.contains("bot token"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A setting that loaded but fails its range check.
    ///
    /// ```
    /// use emojibot_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_setting("rewrite.fuzzy_threshold", "be between 0 and 1");
    /// assert_eq!(err.message, "rewrite.fuzzy_threshold must be between 0 and 1");
    /// ```
    #[track_caller]
    pub fn invalid_setting(key: &str, requirement: impl std::fmt::Display) -> Self {
        Self::new(format!("{} must {}", key, requirement))
    }
}
