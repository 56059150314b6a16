//! Command handlers.

use crate::AppConfig;
use emojibot_core::{BuiltinNames, CatalogStore};
use emojibot_discord::EmojiBot;
use std::sync::Arc;
use tracing::{info, instrument};

/// Catalog and blocklist loaded from the configured paths.
pub struct LoadedState {
    /// Catalog store backed by the configured file.
    pub store: Arc<CatalogStore>,
    /// Builtin emoji names.
    pub builtins: Arc<BuiltinNames>,
}

/// Load the catalog and blocklist named by `config`.
///
/// # Errors
///
/// Returns an error if either file is missing or malformed.
pub async fn load_state(config: &AppConfig) -> Result<LoadedState, Box<dyn std::error::Error>> {
    let store = CatalogStore::load(config.catalog_path()).await?;
    let builtins = BuiltinNames::load(config.builtins_path()).await?;
    Ok(LoadedState {
        store: Arc::new(store),
        builtins: Arc::new(builtins),
    })
}

/// Validate everything the bot needs at startup and log a summary.
///
/// # Errors
///
/// Returns the same errors startup would.
#[instrument(skip_all)]
pub async fn check(config: &AppConfig) -> Result<LoadedState, Box<dyn std::error::Error>> {
    let state = load_state(config).await?;
    let catalog = state.store.snapshot().await;
    info!(
        communities = catalog.len(),
        emoji = catalog.emoji_count(),
        builtins = state.builtins.len(),
        token_present = config.token().is_ok(),
        "Configuration check passed"
    );
    Ok(state)
}

/// Connect to Discord and serve until the gateway connection ends.
///
/// # Errors
///
/// Returns an error if startup state cannot be loaded, no token is
/// configured, or the client fails.
#[instrument(skip_all)]
pub async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.token()?;
    let state = load_state(config).await?;
    info!(
        catalog = %config.catalog_path().display(),
        "Starting emoji bot"
    );

    let mut bot = EmojiBot::new(
        token,
        state.store,
        state.builtins,
        config.rewrite().clone(),
    )
    .await?;
    bot.start().await?;
    Ok(())
}
