//! Frequent-emoji slot policy.

use crate::{CommunityCatalog, EmojiName, NativeSlotIndex};
use std::collections::BTreeSet;

/// Changes needed to make the native slots hold the current top-N.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDelta {
    /// Top-N names with no native slot yet.
    pub to_register: BTreeSet<EmojiName>,
    /// Managed slots no longer in the top-N.
    pub to_evict: BTreeSet<EmojiName>,
}

impl SlotDelta {
    /// Whether nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_register.is_empty() && self.to_evict.is_empty()
    }
}

/// The `capacity` most used names, ties broken by name.
pub fn frequent(catalog: &CommunityCatalog, capacity: usize) -> BTreeSet<EmojiName> {
    catalog
        .ranked()
        .into_iter()
        .take(capacity)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Compute the register/evict delta for a community.
///
/// Only managed slots are ever proposed for eviction. A name already present
/// natively, managed or not, is never proposed for registration. With
/// unchanged inputs, applying the delta and reconciling again yields an
/// empty delta.
pub fn reconcile(
    catalog: &CommunityCatalog,
    natives: &NativeSlotIndex,
    capacity: usize,
) -> SlotDelta {
    let top = frequent(catalog, capacity);

    let to_register = top
        .iter()
        .filter(|name| !natives.contains(name))
        .cloned()
        .collect();

    let to_evict = natives
        .managed()
        .filter_map(|emoji| EmojiName::from_reference(&emoji.name))
        .filter(|name| !top.contains(name))
        .collect();

    SlotDelta {
        to_register,
        to_evict,
    }
}
