//! Rewrite pipeline settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Knobs for command parsing, fuzzy matching and slot management.
///
/// Loaded from the `[rewrite]` table of the bot configuration; every field
/// has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct RewriteSettings {
    /// Prefix in front of `add`, `remove` and `list`.
    #[serde(default = "default_command_prefix")]
    command_prefix: String,

    /// Distinct emoji one message may reference before a warning.
    #[serde(default = "default_working_slots")]
    working_slots: usize,

    /// How many of the most used emoji stay resident.
    #[serde(default = "default_frequent_slots")]
    frequent_slots: usize,

    /// Platform limit on native emoji per community.
    #[serde(default = "default_native_capacity")]
    native_capacity: usize,

    /// Minimum similarity (exclusive) for a spelling correction.
    #[serde(default = "default_fuzzy_threshold")]
    fuzzy_threshold: f64,

    /// Byte budget of one `list` page, at least [`Self::MIN_LIST_PAGE_BUDGET`].
    #[serde(default = "default_list_page_budget")]
    list_page_budget: usize,

    /// Name of the per-channel proxy identity.
    #[serde(default = "default_proxy_name")]
    proxy_name: String,
}

impl RewriteSettings {
    /// Smallest page budget that fits the longest `:name: (N uses)` line.
    pub const MIN_LIST_PAGE_BUDGET: usize = 64;
}

fn default_command_prefix() -> String {
    "e!".to_string()
}

fn default_working_slots() -> usize {
    10
}

fn default_frequent_slots() -> usize {
    40
}

fn default_native_capacity() -> usize {
    50
}

fn default_fuzzy_threshold() -> f64 {
    0.7
}

fn default_list_page_budget() -> usize {
    2048
}

fn default_proxy_name() -> String {
    "EmojiBotWebhook".to_string()
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            working_slots: default_working_slots(),
            frequent_slots: default_frequent_slots(),
            native_capacity: default_native_capacity(),
            fuzzy_threshold: default_fuzzy_threshold(),
            list_page_budget: default_list_page_budget(),
            proxy_name: default_proxy_name(),
        }
    }
}
