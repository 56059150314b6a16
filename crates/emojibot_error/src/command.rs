//! User-facing command and rewrite errors.
//!
//! The display string of each kind is exactly what gets posted back to the
//! channel, so keep them short and addressed to the user.

/// Recoverable failures reported to the user who triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CommandErrorKind {
    /// Wrong number of arguments for a command.
    #[display("usage: {}", _0)]
    Usage(String),

    /// Name is empty or has characters the platform rejects.
    #[display("Invalid emoji name `{}`! Use 2-32 letters, digits or underscores.", _0)]
    InvalidName(String),

    /// Name already exists in the catalog or as a native emoji.
    #[display("Name :{}: already in use!", _0)]
    NameInUse(String),

    /// Name shadows a platform builtin emoji.
    #[display("That name collides with a Discord builtin emoji!")]
    BuiltinCollision(String),

    /// Resource could not be fetched or does not decode as an image.
    #[display("Invalid URL / image!")]
    InvalidImage(String),

    /// A pending upload was answered without an attachment.
    #[display("No photo found!")]
    NoAttachment,

    /// A pending upload was answered with several attachments.
    #[display("Attach exactly one image, found {}!", _0)]
    TooManyAttachments(usize),

    /// Removal of a name that is not in the catalog.
    #[display("The emoji :{}: doesn't exist!", _0)]
    NotFound(String),

    /// Listing page outside the available range.
    #[display("Invalid page number! {} available.", available)]
    InvalidPage {
        /// The page argument as typed
        requested: String,
        /// Number of pages that exist
        available: usize,
    },

    /// Native slot registration failed for one emoji.
    #[display("Couldn't register :{}: right now.", name)]
    NativeRegistration {
        /// Emoji that could not be registered
        name: String,
        /// Underlying platform failure
        reason: String,
    },
}

/// Command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    /// Error kind
    pub kind: CommandErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CommandError {
    /// Create a new command error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojibot_error::{CommandError, CommandErrorKind};
    ///
    /// let err = CommandError::new(CommandErrorKind::NoAttachment);
    /// assert_eq!(err.kind.to_string(), "No photo found!");
    /// ```
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
