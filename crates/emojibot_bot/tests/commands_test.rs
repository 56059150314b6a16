//! Command surface tests: add, remove, list and settings.

mod common;

use common::*;
use emojibot_bot::{Command, RewriteOutcome, RewriteSettings};
use emojibot_core::{Attachment, Catalog, ChannelId, EmojiRecord, UserId};
use emojibot_error::CommandErrorKind;

fn catalog_of(entries: &[(&str, u64)]) -> Catalog {
    let mut catalog = Catalog::default();
    let community = catalog.community_mut(&guild());
    for (n, uses) in entries {
        community.insert(
            name(n),
            EmojiRecord::new(GOOD_URL, UserId::from(USER)).with_use_count(*uses),
        );
    }
    catalog
}

#[test]
fn test_parse_usage_errors() {
    let err = Command::parse("e!add", "e!").unwrap_err();
    assert_eq!(err.kind, CommandErrorKind::Usage("e!add name [url]".into()));

    let err = Command::parse("e!remove a b", "e!").unwrap_err();
    assert_eq!(err.kind, CommandErrorKind::Usage("e!remove name".into()));

    let err = Command::parse("e!list 1 2", "e!").unwrap_err();
    assert_eq!(err.kind, CommandErrorKind::Usage("e!list [page]".into()));
}

#[test]
fn test_parse_ignores_unknown_words() {
    assert_eq!(Command::parse("e!dance", "e!").unwrap(), None);
    assert_eq!(Command::parse("add party", "e!").unwrap(), None);
    assert_eq!(Command::parse("   ", "e!").unwrap(), None);
    assert_eq!(
        Command::parse("e!List 2", "e!").unwrap(),
        Some(Command::List {
            page: Some("2".into())
        })
    );
}

#[tokio::test]
async fn test_add_with_url() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add party {GOOD_URL}")))
        .await;

    assert_eq!(outcome, RewriteOutcome::Command);
    let catalog = h.pipeline.store().community(&guild()).await;
    let record = catalog.get(&name("party")).unwrap();
    assert_eq!(record.source_url(), GOOD_URL);
    assert_eq!(record.creator_id(), &UserId::from(USER));
    assert_eq!(*record.use_count(), 0);
    assert_eq!(
        h.platform.notices(),
        vec!["Successfully added :party:".to_string()]
    );
}

#[tokio::test]
async fn test_add_rejects_builtin_name() {
    let h = harness_with(
        MockPlatform::new(),
        RewriteSettings::default(),
        Catalog::default(),
        &[":smile:"],
    );

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add smile {GOOD_URL}")))
        .await;

    assert_eq!(
        outcome,
        RewriteOutcome::Rejected("That name collides with a Discord builtin emoji!".into())
    );
    assert!(h.pipeline.store().community(&guild()).await.is_empty());
}

#[tokio::test]
async fn test_add_rejects_native_name() {
    let platform = MockPlatform::new().with_native("Legacy", false);
    let h = harness(platform, RewriteSettings::default());

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add legacy {GOOD_URL}")))
        .await;

    assert_eq!(
        outcome,
        RewriteOutcome::Rejected("Name :legacy: already in use!".into())
    );
}

#[tokio::test]
async fn test_add_rejects_duplicate_ignoring_case() {
    let h = harness_with(
        MockPlatform::new(),
        RewriteSettings::default(),
        catalog_of(&[("party", 2)]),
        &[],
    );

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add PARTY {GOOD_URL}")))
        .await;

    assert_eq!(
        outcome,
        RewriteOutcome::Rejected("Name :party: already in use!".into())
    );
    let catalog = h.pipeline.store().community(&guild()).await;
    assert_eq!(*catalog.get(&name("party")).unwrap().use_count(), 2);
}

#[tokio::test]
async fn test_add_rejects_invalid_name() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add x {GOOD_URL}")))
        .await;

    assert!(matches!(outcome, RewriteOutcome::Rejected(ref m) if m.starts_with("Invalid emoji name")));
}

#[tokio::test]
async fn test_add_rejects_non_image() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add party {BAD_URL}")))
        .await;

    assert_eq!(outcome, RewriteOutcome::Rejected("Invalid URL / image!".into()));
    assert!(h.pipeline.store().community(&guild()).await.is_empty());
}

#[tokio::test]
async fn test_add_rejects_unreachable_url() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    let outcome = h
        .pipeline
        .process(&message("e!add party http://x/missing.png"))
        .await;

    assert_eq!(outcome, RewriteOutcome::Rejected("Invalid URL / image!".into()));
}

#[tokio::test]
async fn test_add_without_url_waits_for_upload() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    let outcome = h.pipeline.process(&message("e!add party")).await;

    assert_eq!(outcome, RewriteOutcome::Command);
    assert!(
        h.pipeline
            .pending()
            .contains(&UserId::from(USER), &ChannelId::from(CHANNEL))
    );
    assert!(h.pipeline.store().community(&guild()).await.is_empty());
    assert_eq!(
        h.platform.notices(),
        vec!["Send the image for :party: as your next message in this channel.".to_string()]
    );
}

#[tokio::test]
async fn test_second_add_replaces_pending_name() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());
    h.pipeline.process(&message("e!add first")).await;
    h.pipeline.process(&message("e!add second")).await;

    assert_eq!(h.pipeline.pending().len(), 1);
    assert_eq!(
        h.pipeline
            .pending()
            .resolve(&UserId::from(USER), &ChannelId::from(CHANNEL)),
        Some(name("second"))
    );
}

#[tokio::test]
async fn test_upload_after_second_add_binds_newest_name() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());
    h.pipeline.process(&message("e!add first")).await;
    let outcome = h.pipeline.process(&message("e!add second")).await;
    assert_eq!(outcome, RewriteOutcome::Command);

    let upload = message_from(USER, "", vec![Attachment::new(GOOD_URL, "img.png")]);
    let outcome = h.pipeline.process(&upload).await;

    assert_eq!(outcome, RewriteOutcome::UploadBound(name("second")));
    let catalog = h.pipeline.store().community(&guild()).await;
    assert!(catalog.contains(&name("second")));
    assert!(!catalog.contains(&name("first")));
    assert!(h.pipeline.pending().is_empty());
}

#[tokio::test]
async fn test_add_with_url_drops_pending_upload() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());
    h.pipeline.process(&message("e!add first")).await;

    let outcome = h
        .pipeline
        .process(&message(&format!("e!add other {GOOD_URL}")))
        .await;

    assert_eq!(outcome, RewriteOutcome::Command);
    assert!(h.pipeline.pending().is_empty());
    let catalog = h.pipeline.store().community(&guild()).await;
    assert!(catalog.contains(&name("other")));
    assert!(!catalog.contains(&name("first")));
}

#[tokio::test]
async fn test_other_command_still_answers_pending_upload() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());
    h.pipeline.process(&message("e!add first")).await;

    let outcome = h.pipeline.process(&message("e!list")).await;

    assert_eq!(outcome, RewriteOutcome::Rejected("No photo found!".into()));
    assert!(h.pipeline.pending().is_empty());
    assert!(h.platform.listings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_unknown_name() {
    let h = harness_with(
        MockPlatform::new(),
        RewriteSettings::default(),
        catalog_of(&[("party", 0)]),
        &[],
    );

    let outcome = h.pipeline.process(&message("e!remove nothere")).await;

    assert_eq!(
        outcome,
        RewriteOutcome::Rejected("The emoji :nothere: doesn't exist!".into())
    );
    assert_eq!(h.pipeline.store().community(&guild()).await.len(), 1);
}

#[tokio::test]
async fn test_remove_evicts_managed_slot() {
    let platform = MockPlatform::new().with_native("party", true);
    let h = harness_with(
        platform,
        RewriteSettings::default(),
        catalog_of(&[("party", 5)]),
        &[],
    );

    let outcome = h.pipeline.process(&message("e!remove :Party:")).await;

    assert_eq!(outcome, RewriteOutcome::Command);
    assert!(h.pipeline.store().community(&guild()).await.is_empty());
    assert!(h.platform.native_names().is_empty());
    assert_eq!(
        h.platform.notices(),
        vec!["Successfully removed :party:".to_string()]
    );
}

#[tokio::test]
async fn test_remove_keeps_unmanaged_slot() {
    let platform = MockPlatform::new().with_native("party", false);
    let h = harness_with(
        platform,
        RewriteSettings::default(),
        catalog_of(&[("party", 5)]),
        &[],
    );

    h.pipeline.process(&message("e!remove party")).await;

    assert!(h.pipeline.store().community(&guild()).await.is_empty());
    assert_eq!(h.platform.native_names(), vec!["party".to_string()]);
}

#[tokio::test]
async fn test_list_single_page() {
    let h = harness_with(
        MockPlatform::new(),
        RewriteSettings::default(),
        catalog_of(&[("aa", 1), ("bb", 3)]),
        &[],
    );

    h.pipeline.process(&message("e!list")).await;

    let listings = h.platform.listings.lock().unwrap().clone();
    assert_eq!(
        listings,
        vec![(
            "Emojis on Test Guild".to_string(),
            ":bb: (3 uses)\n:aa: (1 uses)\n".to_string()
        )]
    );
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let h = harness(MockPlatform::new(), RewriteSettings::default());

    h.pipeline.process(&message("e!list")).await;

    let listings = h.platform.listings.lock().unwrap().clone();
    assert_eq!(listings[0].1, "No emoji registered yet.");
}

#[tokio::test]
async fn test_list_pages() {
    let settings = RewriteSettings::default().with_list_page_budget(30);
    let h = harness_with(
        MockPlatform::new(),
        settings,
        catalog_of(&[("aa", 0), ("bb", 0), ("cc", 0)]),
        &[],
    );

    h.pipeline.process(&message("e!list 2")).await;

    let listings = h.platform.listings.lock().unwrap().clone();
    assert_eq!(
        listings,
        vec![(
            "Emojis on Test Guild (page 2 of 2)".to_string(),
            ":cc: (0 uses)\n".to_string()
        )]
    );
}

#[tokio::test]
async fn test_list_invalid_page() {
    let h = harness_with(
        MockPlatform::new(),
        RewriteSettings::default(),
        catalog_of(&[("aa", 0)]),
        &[],
    );

    for page in ["0", "2", "two"] {
        let outcome = h
            .pipeline
            .process(&message(&format!("e!list {page}")))
            .await;
        assert_eq!(
            outcome,
            RewriteOutcome::Rejected("Invalid page number! 1 available.".into())
        );
    }
    assert!(h.platform.listings.lock().unwrap().is_empty());
}

#[test]
fn test_settings_defaults_from_partial_toml() {
    let settings: RewriteSettings = toml::from_str("working_slots = 3").unwrap();

    assert_eq!(*settings.working_slots(), 3);
    assert_eq!(settings.command_prefix(), "e!");
    assert_eq!(*settings.frequent_slots(), 40);
    assert_eq!(*settings.native_capacity(), 50);
    assert_eq!(*settings.fuzzy_threshold(), 0.7);
    assert_eq!(*settings.list_page_budget(), 2048);
    assert_eq!(settings.proxy_name(), "EmojiBotWebhook");
}
