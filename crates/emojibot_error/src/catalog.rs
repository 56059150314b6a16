//! Catalog persistence error types.

/// Kinds of catalog store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CatalogErrorKind {
    /// Backing file could not be read
    #[display("Failed to read catalog: {}", _0)]
    Read(String),
    /// Backing file is not a valid catalog document
    #[display("Failed to parse catalog: {}", _0)]
    Parse(String),
    /// Snapshot could not be written
    #[display("Failed to write catalog: {}", _0)]
    Write(String),
    /// A stored key is not a `:name:` reference
    #[display("Invalid emoji key in catalog: {}", _0)]
    InvalidKey(String),
}

/// Catalog error with location tracking.
///
/// # Examples
///
/// ```
/// use emojibot_error::{CatalogError, CatalogErrorKind};
///
/// let err = CatalogError::new(CatalogErrorKind::Read("emoji.json".to_string()));
/// assert!(format!("{}", err).contains("Failed to read"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Catalog Error: {} at line {} in {}", kind, line, file)]
pub struct CatalogError {
    /// The kind of error that occurred
    pub kind: CatalogErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CatalogError {
    /// Create a new catalog error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
