//! Scanning and rewriting `:name:` references in message text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// A native rendering (`<:name:123>` / `<a:name:123>`) or a plain `:name:` tag
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<a?:([^:\s<>]+):\d+>|:([^:\s<>]+):").expect("reference pattern is valid")
});

/// One emoji reference found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A `:name:` tag typed by the user, name as written.
    Tag(String),
    /// A platform rendering of an existing native emoji.
    Native(String),
}

impl Reference {
    /// Referenced name as written.
    pub fn name(&self) -> &str {
        match self {
            Self::Tag(name) | Self::Native(name) => name,
        }
    }
}

/// All references in order of appearance.
pub fn scan(text: &str) -> Vec<Reference> {
    REFERENCE
        .captures_iter(text)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(native), _) => Some(Reference::Native(native.as_str().to_string())),
            (None, Some(tag)) => Some(Reference::Tag(tag.as_str().to_string())),
            _ => None,
        })
        .collect()
}

/// Rewrite every `:name:` tag, leaving native renderings untouched.
///
/// `replace` receives the name as written and returns the replacement text
/// for the whole tag, or `None` to keep it.
pub fn rewrite_tags<F>(text: &str, mut replace: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    REFERENCE
        .replace_all(text, |caps: &Captures<'_>| match caps.get(2) {
            Some(tag) if caps.get(1).is_none() => {
                replace(tag.as_str()).unwrap_or_else(|| caps[0].to_string())
            }
            _ => caps[0].to_string(),
        })
        .into_owned()
}
