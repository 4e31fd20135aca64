//! Chat relay: placeholder, completion, in-place edit

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, error};

use crate::client::CompletionClient;
use crate::error::Error;
use crate::{ChatId, MessageId};

pub const PLACEHOLDER_TEXT: &str = "Думаю...";

pub const GREETING_TEXT: &str
  = "Привет! Я AI-агент, подключенный к YandexGPT. Задайте мне любой вопрос.";

/// The two outbound primitives the relay needs from a chat platform
#[async_trait]
pub trait ChatPlatform: Send + Sync
{   /// Post a new message, returning its identity
    async fn send_text(
      &self
    , chat: ChatId
    , text: &str
    ) -> Result<MessageId, Error>;

    /// Replace the content of an existing message
    async fn edit_text(
      &self
    , chat: ChatId
    , message: MessageId
    , text: &str
    ) -> Result<(), Error>;
}

/// What one relayed message produced
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome
{   pub chat: ChatId
  , pub placeholder: MessageId
  , pub reply: String
}

/// Inbound events the relay reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound
{   /// `/start`
    Start
  , /// Plain text, not a command
    Text(String)
}

impl Inbound
{   /// Classify raw message text. Commands other than `/start` are ignored,
    /// as is `/start@name` when `name` is not `bot_username`.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Inbound>
    {   let trimmed = text.trim();
        if trimmed.is_empty()
        {   return None;
        }
        if let Some(command) = trimmed.strip_prefix('/')
        {   let head = command.split_whitespace().next().unwrap_or("");
            let (name, mention) = match head.split_once('@')
            {   Some((name, mention)) => (name, Some(mention))
              , None => (head, None)
            };
            let addressed_here = match (mention, bot_username)
            {   (Some(mention), Some(own)) => mention.eq_ignore_ascii_case(own)
              , (Some(_), None) => false
              , (None, _) => true
            };
            return if name == "start" && addressed_here
            {   Some(Inbound::Start)
            } else
            {   None
            };
        }
        Some(Inbound::Text(text.to_string()))
    }
}

pub struct ChatRelay
{   client: Arc<CompletionClient>
  , platform: Arc<dyn ChatPlatform>
  , bot_username: Option<String>
}

impl ChatRelay
{   pub fn new(
      client: Arc<CompletionClient>
    , platform: Arc<dyn ChatPlatform>
    ) -> Self
    {   ChatRelay
        {   client
          , platform
          , bot_username: None
        }
    }

    /// Username commands must mention when they carry an `@name` suffix
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self
    {   self.bot_username = Some(username.into());
        self
    }

    /// Route one raw inbound message. Returns None for ignored input.
    pub async fn dispatch(
      &self
    , chat: ChatId
    , text: &str
    ) -> Result<Option<RelayOutcome>, Error>
    {   match Inbound::parse(text, self.bot_username.as_deref())
        {   Some(Inbound::Start) => {
              self.handle_start(chat).await?;
              Ok(None)
            }
          , Some(Inbound::Text(text)) => {
              self.handle_text(chat, &text).await.map(Some)
            }
          , None => {
              debug!("Ignoring message in chat {}", chat.0);
              Ok(None)
            }
        }
    }

    /// Answer the greeting command with the static introduction
    pub async fn handle_start(&self, chat: ChatId)
      -> Result<MessageId, Error>
    {   info!("Greeting chat {}", chat.0);
        self.platform.send_text(chat, GREETING_TEXT).await
    }

    /// Placeholder, then completion, then edit of that same placeholder.
    /// Each step starts only after the previous one finished.
    pub async fn handle_text(
      &self
    , chat: ChatId
    , text: &str
    ) -> Result<RelayOutcome, Error>
    {   debug!("Relaying message from chat {}", chat.0);

        let placeholder = self.platform
          .send_text(chat, PLACEHOLDER_TEXT)
          .await
          .map_err(|e| {
            error!("Failed to send placeholder to chat {}: {}", chat.0, e);
            e
          })?;

        let reply = self.client.get_response(text).await;

        self.platform
          .edit_text(chat, placeholder, &reply)
          .await
          .map_err(|e| {
            error!(
              "Failed to edit message {} in chat {}: {}",
              placeholder.0, chat.0, e
            );
            e
          })?;

        Ok(RelayOutcome
        {   chat
          , placeholder
          , reply
        })
    }
}
