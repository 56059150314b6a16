//! The `add`, `remove` and `list` command surface.

use crate::RewritePipeline;
use crate::listing::paginate;
use emojibot_core::{EmojiName, EmojiRecord, IncomingMessage, NativeSlotIndex};
use emojibot_error::{CommandError, CommandErrorKind, EmojibotResult};
use tracing::{info, instrument};

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <name> [url]`
    Add {
        /// Requested name as typed
        name: String,
        /// Image URL; without one the next attachment is used
        url: Option<String>,
    },
    /// `remove <name>`
    Remove {
        /// Name as typed
        name: String,
    },
    /// `list [page]`
    List {
        /// 1-based page as typed
        page: Option<String>,
    },
}

impl Command {
    /// Parse a message as a command.
    ///
    /// Returns `Ok(None)` if the first word is not a known command. The
    /// command word is matched case-insensitively; arguments keep their case.
    ///
    /// # Errors
    ///
    /// Returns `Usage` for a known command with the wrong argument count.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojibot_bot::Command;
    ///
    /// let cmd = Command::parse("E!ADD party http://x/Img.png", "e!").unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Add { name: "party".into(), url: Some("http://x/Img.png".into()) })
    /// );
    /// assert_eq!(Command::parse("hello :party:", "e!").unwrap(), None);
    /// ```
    pub fn parse(content: &str, prefix: &str) -> Result<Option<Self>, CommandError> {
        let mut words = content.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let head = head.to_lowercase();
        let Some(verb) = head.strip_prefix(&prefix.to_lowercase()) else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let usage = |shape: &str| {
            Err(CommandError::new(CommandErrorKind::Usage(format!(
                "{prefix}{shape}"
            ))))
        };

        let command = match (verb, args.as_slice()) {
            ("add", [name]) => Self::Add {
                name: name.to_string(),
                url: None,
            },
            ("add", [name, url]) => Self::Add {
                name: name.to_string(),
                url: Some(url.to_string()),
            },
            ("add", _) => return usage("add name [url]"),
            ("remove", [name]) => Self::Remove {
                name: name.to_string(),
            },
            ("remove", _) => return usage("remove name"),
            ("list", []) => Self::List { page: None },
            ("list", [page]) => Self::List {
                page: Some(page.to_string()),
            },
            ("list", _) => return usage("list [page]"),
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

impl RewritePipeline {
    /// Run a parsed command on behalf of a message's author.
    ///
    /// # Errors
    ///
    /// Returns validation, image, not-found and page errors for the caller
    /// to report.
    pub async fn execute(&self, message: &IncomingMessage, command: Command) -> EmojibotResult<()> {
        match command {
            Command::Add { name, url } => self.add(message, &name, url.as_deref()).await,
            Command::Remove { name } => self.remove(message, &name).await,
            Command::List { page } => self.list(message, page.as_deref()).await,
        }
    }

    #[instrument(skip(self, message, url), fields(community = %message.community))]
    async fn add(&self, message: &IncomingMessage, name: &str, url: Option<&str>) -> EmojibotResult<()> {
        let name = EmojiName::parse_new(name)?;
        self.ensure_available(&message.community, &name).await?;

        match url {
            Some(url) => {
                self.fetch_validated(url).await?;
                let record = EmojiRecord::new(url, message.author.id.clone());
                self.store
                    .add_emoji(&message.community, &name, record)
                    .await?;
                self.notify(message, &format!("Successfully added {}", name.tag()))
                    .await;
            }
            None => {
                let prompt = format!(
                    "Send the image for {} as your next message in this channel.",
                    name.tag()
                );
                self.pending
                    .await_upload(&message.author.id, &message.channel, name);
                self.notify(message, &prompt).await;
            }
        }
        Ok(())
    }

    #[instrument(skip(self, message), fields(community = %message.community))]
    async fn remove(&self, message: &IncomingMessage, name: &str) -> EmojibotResult<()> {
        let name = EmojiName::from_reference(name)
            .ok_or_else(|| CommandError::new(CommandErrorKind::NotFound(name.to_string())))?;
        if !self.store.community(&message.community).await.contains(&name) {
            return Err(CommandError::new(CommandErrorKind::NotFound(name.to_string())).into());
        }

        let natives = NativeSlotIndex::new(
            self.platform
                .list_native_emoji(&message.community)
                .await?,
        );
        if let Some(native) = natives.get(&name).filter(|n| n.managed) {
            self.platform
                .delete_native_emoji(&message.community, &native.handle)
                .await?;
            info!(name = %name, "Evicted slot of removed emoji");
        }

        self.store.remove_emoji(&message.community, &name).await?;
        self.notify(message, &format!("Successfully removed {}", name.tag()))
            .await;
        Ok(())
    }

    #[instrument(skip(self, message), fields(community = %message.community))]
    async fn list(&self, message: &IncomingMessage, page: Option<&str>) -> EmojibotResult<()> {
        let catalog = self.store.community(&message.community).await;
        let pages = paginate(&catalog, *self.settings.list_page_budget());

        let invalid = || {
            CommandError::new(CommandErrorKind::InvalidPage {
                requested: page.unwrap_or_default().to_string(),
                available: pages.len(),
            })
        };
        let index = match page {
            None => 0,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(invalid)?,
        };
        let body = pages.get(index).ok_or_else(invalid)?;

        let community_name = self
            .platform
            .community_name(&message.community)
            .await?;
        let title = if pages.len() > 1 {
            format!(
                "Emojis on {community_name} (page {} of {})",
                index + 1,
                pages.len()
            )
        } else {
            format!("Emojis on {community_name}")
        };
        let body = if body.is_empty() {
            "No emoji registered yet."
        } else {
            body.as_str()
        };

        self.platform
            .send_listing(&message.channel, &title, body)
            .await?;
        Ok(())
    }
}
