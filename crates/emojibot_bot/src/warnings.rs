//! Soft capacity warnings.

/// Non-fatal capacity problems; the message is still processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CapacityWarning {
    /// More distinct emoji in one message than the working limit.
    #[display("Too many emoji tags in a single message!")]
    TooManyInMessage {
        /// Distinct emoji referenced
        referenced: usize,
        /// Configured working limit
        limit: usize,
    },

    /// More distinct emoji than free native slots.
    #[display("Not enough free emoji slots!")]
    NotEnoughSlots {
        /// Distinct emoji referenced
        referenced: usize,
        /// Free native slots
        free: usize,
    },
}

/// Warnings for a message referencing `referenced` distinct emoji.
pub fn capacity_warnings(referenced: usize, limit: usize, free: usize) -> Vec<CapacityWarning> {
    let mut warnings = Vec::new();
    if referenced > limit {
        warnings.push(CapacityWarning::TooManyInMessage { referenced, limit });
    }
    if referenced > free {
        warnings.push(CapacityWarning::NotEnoughSlots { referenced, free });
    }
    warnings
}
