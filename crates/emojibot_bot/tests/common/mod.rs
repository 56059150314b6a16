//! Shared test fixtures: an in-memory platform and message builders.

#![allow(dead_code)]

use async_trait::async_trait;
use emojibot_bot::{RewritePipeline, RewriteSettings};
use emojibot_core::{
    AuthorBuilder, BuiltinNames, Catalog, CatalogStore, ChannelId, CommunityId, EmojiName,
    EmojiPlatform, IncomingMessage, IncomingMessageBuilder, NativeEmoji, NativeHandle,
    PlatformResult, ProxyHandle, Attachment,
};
use emojibot_error::{PlatformError, PlatformErrorKind};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const GUILD: &str = "1001";
pub const CHANNEL: &str = "2002";
pub const USER: &str = "3003";
pub const GOOD_URL: &str = "http://x/img.png";
pub const BAD_URL: &str = "http://x/page.html";

/// A post made through a proxy identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPost {
    pub text: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// In-memory platform recording every call.
#[derive(Default)]
pub struct MockPlatform {
    images: Mutex<HashMap<String, Vec<u8>>>,
    natives: Mutex<Vec<NativeEmoji>>,
    failing_registrations: Mutex<HashSet<String>>,
    proxies_unavailable: AtomicBool,
    next_id: AtomicUsize,
    pub deleted_messages: Mutex<Vec<String>>,
    pub deleted_emoji: Mutex<Vec<String>>,
    pub posts: Mutex<Vec<ProxyPost>>,
    pub notices: Mutex<Vec<String>>,
    pub listings: Mutex<Vec<(String, String)>>,
    pub proxies: Mutex<HashMap<String, ProxyHandle>>,
}

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::new(8, 8)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

impl MockPlatform {
    pub fn new() -> Self {
        let platform = Self::default();
        platform.serve(GOOD_URL, png_bytes());
        platform.serve(BAD_URL, b"<html>nope</html>".to_vec());
        platform
    }

    pub fn serve(&self, url: &str, bytes: Vec<u8>) {
        self.images.lock().unwrap().insert(url.to_string(), bytes);
    }

    pub fn with_native(self, name: &str, managed: bool) -> Self {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.natives.lock().unwrap().push(native(name, managed, id));
        self
    }

    pub fn fail_registration_of(&self, name: &str) {
        self.failing_registrations
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    pub fn fail_proxy_lookups(&self) {
        self.proxies_unavailable.store(true, Ordering::SeqCst);
    }

    pub fn native_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .natives
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<ProxyPost> {
        self.posts.lock().unwrap().clone()
    }
}

fn native(name: &str, managed: bool, id: usize) -> NativeEmoji {
    NativeEmoji {
        handle: NativeHandle(id.to_string()),
        name: name.to_string(),
        managed,
        markup: format!("<:{name}:{id}>"),
    }
}

#[async_trait]
impl EmojiPlatform for MockPlatform {
    async fn fetch_image_bytes(&self, url: &str) -> PlatformResult<Vec<u8>> {
        self.images.lock().unwrap().get(url).cloned().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::Fetch {
                url: url.to_string(),
                reason: "404".to_string(),
            })
        })
    }

    async fn list_native_emoji(&self, _community: &CommunityId) -> PlatformResult<Vec<NativeEmoji>> {
        Ok(self.natives.lock().unwrap().clone())
    }

    async fn register_native_emoji(
        &self,
        _community: &CommunityId,
        name: &EmojiName,
        _image: &[u8],
    ) -> PlatformResult<NativeEmoji> {
        if self.failing_registrations.lock().unwrap().contains(name.as_str()) {
            return Err(PlatformError::new(PlatformErrorKind::Register(
                "rejected".to_string(),
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let emoji = native(name.as_str(), true, id);
        self.natives.lock().unwrap().push(emoji.clone());
        Ok(emoji)
    }

    async fn delete_native_emoji(
        &self,
        _community: &CommunityId,
        handle: &NativeHandle,
    ) -> PlatformResult<()> {
        let mut natives = self.natives.lock().unwrap();
        let before = natives.len();
        natives.retain(|e| &e.handle != handle);
        if natives.len() == before {
            return Err(PlatformError::new(PlatformErrorKind::Delete(handle.to_string())));
        }
        self.deleted_emoji.lock().unwrap().push(handle.to_string());
        Ok(())
    }

    async fn delete_message(&self, message: &IncomingMessage) -> PlatformResult<()> {
        self.deleted_messages
            .lock()
            .unwrap()
            .push(message.id.to_string());
        Ok(())
    }

    async fn channel_proxy(&self, channel: &ChannelId, _proxy_name: &str) -> PlatformResult<ProxyHandle> {
        if self.proxies_unavailable.load(Ordering::SeqCst) {
            return Err(PlatformError::new(PlatformErrorKind::Proxy(
                "missing permission".to_string(),
            )));
        }
        let mut proxies = self.proxies.lock().unwrap();
        let handle = proxies
            .entry(channel.to_string())
            .or_insert_with(|| ProxyHandle {
                channel: channel.clone(),
                id: format!("hook-{channel}"),
            });
        Ok(handle.clone())
    }

    async fn post_as_proxy(
        &self,
        _proxy: &ProxyHandle,
        text: &str,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> PlatformResult<()> {
        self.posts.lock().unwrap().push(ProxyPost {
            text: text.to_string(),
            display_name: display_name.to_string(),
            avatar_url: avatar_url.map(str::to_string),
        });
        Ok(())
    }

    async fn send_notice(&self, _channel: &ChannelId, text: &str) -> PlatformResult<()> {
        self.notices.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_listing(&self, _channel: &ChannelId, title: &str, body: &str) -> PlatformResult<()> {
        self.listings
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    async fn community_name(&self, _community: &CommunityId) -> PlatformResult<String> {
        Ok("Test Guild".to_string())
    }
}

static MESSAGE_IDS: AtomicUsize = AtomicUsize::new(1);

/// Message from the default user in the default channel.
pub fn message(content: &str) -> IncomingMessage {
    message_from(USER, content, Vec::new())
}

pub fn message_from(user: &str, content: &str, attachments: Vec<Attachment>) -> IncomingMessage {
    IncomingMessageBuilder::default()
        .id(MESSAGE_IDS.fetch_add(1, Ordering::SeqCst).to_string().as_str())
        .community(GUILD)
        .channel(CHANNEL)
        .author(
            AuthorBuilder::default()
                .id(user)
                .display_name(format!("user-{user}"))
                .avatar_url(Some(format!("http://cdn/{user}.png")))
                .build()
                .expect("valid author"),
        )
        .content(content)
        .attachments(attachments)
        .build()
        .expect("valid message")
}

pub struct Harness {
    pub platform: Arc<MockPlatform>,
    pub pipeline: RewritePipeline,
}

pub fn harness(platform: MockPlatform, settings: RewriteSettings) -> Harness {
    harness_with(platform, settings, Catalog::default(), &[])
}

pub fn harness_with(
    platform: MockPlatform,
    settings: RewriteSettings,
    catalog: Catalog,
    builtins: &[&str],
) -> Harness {
    let platform = Arc::new(platform);
    let pipeline = RewritePipeline::new(
        platform.clone(),
        Arc::new(CatalogStore::in_memory(catalog)),
        Arc::new(BuiltinNames::from_names(builtins)),
        settings,
    );
    Harness { platform, pipeline }
}

pub fn name(s: &str) -> EmojiName {
    EmojiName::parse_new(s).unwrap()
}

pub fn guild() -> CommunityId {
    CommunityId::from(GUILD)
}
