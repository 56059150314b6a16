//! Configuration loading and startup check tests.

use emojibot::{AppConfig, check};
use emojibot_bot::RewriteSettings;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_empty_file_uses_defaults() {
    let config = AppConfig::from_toml("").unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.rewrite().command_prefix(), "e!");
    assert_eq!(config.logging().level(), "info");
    assert!(!config.logging().json());
}

#[test]
fn test_rewrite_and_logging_tables() {
    let config = AppConfig::from_toml(
        r#"
        bot_token = "abc"

        [rewrite]
        command_prefix = "!"
        frequent_slots = 20
        fuzzy_threshold = 0.8

        [logging]
        level = "debug"
        json = true
        "#,
    )
    .unwrap();

    assert_eq!(config.token().unwrap(), "abc");
    assert_eq!(config.rewrite().command_prefix(), "!");
    assert_eq!(*config.rewrite().frequent_slots(), 20);
    assert_eq!(*config.rewrite().native_capacity(), 50);
    assert_eq!(*config.rewrite().fuzzy_threshold(), 0.8);
    assert_eq!(config.logging().level(), "debug");
    assert!(*config.logging().json());
}

#[test]
fn test_out_of_range_settings_are_rejected() {
    assert!(AppConfig::from_toml("[rewrite]\nfuzzy_threshold = 1.5").is_err());
    assert!(AppConfig::from_toml("[rewrite]\nfrequent_slots = 60").is_err());
    assert!(AppConfig::from_toml("[rewrite]\ncommand_prefix = \" \"").is_err());
    assert!(AppConfig::from_toml("[rewrite]\nlist_page_budget = 0").is_err());
}

#[test]
fn test_page_budget_must_fit_longest_line() {
    let err = AppConfig::from_toml("[rewrite]\nlist_page_budget = 8").unwrap_err();
    assert!(err.message.contains("at least 64"), "{}", err.message);

    // 32-char name with the largest possible count
    let longest = format!(":{}: ({} uses)\n", "a".repeat(32), u64::MAX);
    assert!(longest.len() <= RewriteSettings::MIN_LIST_PAGE_BUDGET);

    let config = AppConfig::from_toml("[rewrite]\nlist_page_budget = 64").unwrap();
    assert_eq!(*config.rewrite().list_page_budget(), 64);
}

#[test]
fn test_malformed_toml_is_rejected() {
    let err = AppConfig::from_toml("catalog_path = [").unwrap_err();
    assert!(err.message.contains("Invalid configuration"), "{}", err.message);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"), "{}", err.message);
}

#[test]
fn test_paths_resolve_against_config_directory() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "emojibot.toml", "catalog_path = \"data/emojis.json\"");

    let config = AppConfig::from_file(&path).unwrap();

    assert_eq!(config.catalog_path(), &dir.path().join("data/emojis.json"));
    assert_eq!(config.builtins_path(), &dir.path().join("builtins.json"));
}

#[tokio::test]
async fn test_check_loads_catalog_and_blocklist() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "emojis.json",
        r#"{"1001": {":party:": {"url": "http://x/p.png", "creator": 42, "uses": 3}}}"#,
    );
    write(&dir, "builtins.json", r#"{":smile:": "x", ":wave:": "y"}"#);
    let path = write(&dir, "emojibot.toml", "");

    let config = AppConfig::from_file(&path).unwrap();
    let state = check(&config).await.unwrap();

    let catalog = state.store.snapshot().await;
    assert_eq!(catalog.emoji_count(), 1);
    assert_eq!(state.builtins.len(), 2);
}

#[tokio::test]
async fn test_check_fails_on_missing_catalog() {
    let dir = TempDir::new().unwrap();
    write(&dir, "builtins.json", "{}");
    let path = write(&dir, "emojibot.toml", "");

    let config = AppConfig::from_file(&path).unwrap();

    assert!(check(&config).await.is_err());
}
