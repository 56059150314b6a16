//! Opaque platform identifiers and normalized emoji names.

use emojibot_error::{CommandError, CommandErrorKind};
use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{}", _0)]
        pub struct $name(String);

        impl $name {
            /// Wrap a platform-assigned identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }
    };
}

opaque_id!(
    /// Community (guild) identifier.
    CommunityId
);
opaque_id!(
    /// Channel identifier.
    ChannelId
);
opaque_id!(
    /// User identifier.
    UserId
);
opaque_id!(
    /// Message identifier.
    MessageId
);

/// Lowercase emoji name without the `:` delimiters.
///
/// Rendered as `:name:` at the chat boundary via [`EmojiName::tag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}", _0)]
pub struct EmojiName(String);

impl EmojiName {
    /// Shortest name the platform accepts for a native emoji.
    pub const MIN_LEN: usize = 2;
    /// Longest name the platform accepts for a native emoji.
    pub const MAX_LEN: usize = 32;

    /// Normalize a reference as it appears in text or in a stored key.
    ///
    /// Accepts `name` or `:name:`, case-folds, and rejects empty names or
    /// names containing delimiters or whitespace.
    pub fn from_reference(raw: &str) -> Option<Self> {
        let name = strip_delimiters(raw.trim()).to_lowercase();
        if name.is_empty() || name.contains(':') || name.chars().any(char::is_whitespace) {
            None
        } else {
            Some(Self(name))
        }
    }

    /// Validate a name for a new registration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` unless the normalized name is 2-32 characters of
    /// ASCII letters, digits or underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojibot_core::EmojiName;
    ///
    /// assert_eq!(EmojiName::parse_new(":Party:").unwrap().as_str(), "party");
    /// assert!(EmojiName::parse_new("no spaces").is_err());
    /// ```
    pub fn parse_new(raw: &str) -> Result<Self, CommandError> {
        let name = strip_delimiters(raw.trim()).to_lowercase();
        let length_ok = (Self::MIN_LEN..=Self::MAX_LEN).contains(&name.chars().count());
        let charset_ok = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if length_ok && charset_ok {
            Ok(Self(name))
        } else {
            Err(CommandError::new(CommandErrorKind::InvalidName(
                raw.trim().to_string(),
            )))
        }
    }

    /// Borrow the bare name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Delimited form, e.g. `:party:`.
    pub fn tag(&self) -> String {
        format!(":{}:", self.0)
    }
}

fn strip_delimiters(raw: &str) -> &str {
    raw.strip_prefix(':')
        .and_then(|s| s.strip_suffix(':'))
        .unwrap_or(raw)
}
