//! Blocklist of platform builtin emoji names.

use crate::EmojiName;
use emojibot_error::{CatalogError, CatalogErrorKind, EmojibotResult};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Names of the platform's builtin emoji, loaded once and read-only.
///
/// The backing document is a JSON object whose keys are the names; values
/// are ignored.
#[derive(Debug, Clone, Default)]
pub struct BuiltinNames {
    names: HashSet<String>,
}

impl BuiltinNames {
    /// Load the blocklist from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `Read` if the file cannot be read and `Parse` if it is not a
    /// JSON object.
    pub async fn load(path: impl AsRef<Path>) -> EmojibotResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Read(format!("{}: {}", path.display(), e)))
        })?;
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json)
            .map_err(|e| {
                CatalogError::new(CatalogErrorKind::Parse(format!("{}: {}", path.display(), e)))
            })?;

        let builtins = Self::from_names(object.keys());
        info!(count = builtins.len(), "Builtin emoji names loaded");
        Ok(builtins)
    }

    /// Build from an iterator of names (delimited or not, any case).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|n| EmojiName::from_reference(n.as_ref()))
            .map(|n| n.as_str().to_string())
            .collect();
        Self { names }
    }

    /// Whether the name shadows a builtin.
    pub fn contains(&self, name: &EmojiName) -> bool {
        self.names.contains(name.as_str())
    }

    /// Number of builtin names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the blocklist is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
