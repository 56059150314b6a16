//! Chat platform error types.

/// Failures of the external chat platform capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Downloading image bytes failed.
    #[display("Fetch failed for {}: {}", url, reason)]
    Fetch {
        /// Requested URL
        url: String,
        /// Transport or status failure
        reason: String,
    },

    /// Listing the native emoji of a community failed.
    #[display("Native emoji listing failed: {}", _0)]
    List(String),

    /// Creating a native emoji failed.
    #[display("Native emoji registration failed: {}", _0)]
    Register(String),

    /// Deleting a native emoji failed.
    #[display("Native emoji deletion failed: {}", _0)]
    Delete(String),

    /// Deleting or sending a message failed.
    #[display("Message operation failed: {}", _0)]
    Message(String),

    /// Finding, creating or posting through a proxy identity failed.
    #[display("Proxy identity failed: {}", _0)]
    Proxy(String),

    /// An identifier from the platform could not be parsed.
    #[display("Invalid ID: {}", _0)]
    InvalidId(String),
}

/// Platform error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// Error kind
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
