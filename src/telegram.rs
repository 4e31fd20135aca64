//! Telegram adapter: teloxide long polling in, `ChatPlatform` out

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, error};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::prelude::{Bot, Dispatcher, Message, Requester, ResponseResult, Update};
use teloxide::types::{ChatId as TelegramChatId, MessageId as TelegramMessageId};

use crate::client::CompletionClient;
use crate::config::TelegramConfig;
use crate::error::Error;
use crate::relay::{ChatPlatform, ChatRelay};
use crate::{ChatId, MessageId};

/// Telegram rejects messages longer than this many UTF-16 code units
pub const MAX_MESSAGE_UNITS: usize = 4096;

/// Cut `text` to the platform limit without splitting a character
pub fn truncate_for_telegram(text: &str) -> String
{   let mut units = 0;
    let mut end = text.len();
    for (index, ch) in text.char_indices()
    {   units += ch.len_utf16();
        if units > MAX_MESSAGE_UNITS
        {   end = index;
            break;
        }
    }
    text[..end].to_string()
}

pub struct TelegramPlatform
{   bot: Bot
}

impl TelegramPlatform
{   pub fn new(bot: Bot) -> Self
    {   TelegramPlatform { bot }
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform
{   async fn send_text(
      &self
    , chat: ChatId
    , text: &str
    ) -> Result<MessageId, Error>
    {   let sent = self.bot
          .send_message(TelegramChatId(chat.0), truncate_for_telegram(text))
          .await
          .map_err(|e| Error::Platform(e.to_string()))?;
        Ok(MessageId(sent.id.0))
    }

    async fn edit_text(
      &self
    , chat: ChatId
    , message: MessageId
    , text: &str
    ) -> Result<(), Error>
    {   self.bot
          .edit_message_text(
            TelegramChatId(chat.0),
            TelegramMessageId(message.0),
            truncate_for_telegram(text)
          )
          .await
          .map_err(|e| Error::Platform(e.to_string()))?;
        Ok(())
    }
}

/// Poll Telegram until interrupted, relaying every text message
pub async fn run(
  config: &TelegramConfig
, client: Arc<CompletionClient>
)
{   let bot = Bot::new(config.bot_token.clone());
    let platform = Arc::new(TelegramPlatform::new(bot.clone()));
    let mut relay = ChatRelay::new(client, platform);
    match bot.get_me().await
    {   Ok(me) => {
          if let Some(username) = me.user.username.clone()
          {   info!("Running as @{}", username);
              relay = relay.with_bot_username(username);
          }
        }
      , Err(e) => {
          error!("Could not fetch bot identity: {}", e);
        }
    }
    let relay = Arc::new(relay);

    let handler = Update::filter_message().endpoint(on_message);

    info!("Starting bot...");
    Dispatcher::builder(bot, handler)
      .dependencies(dptree::deps![relay])
      .enable_ctrlc_handler()
      .build()
      .dispatch()
      .await;
    info!("Bot stopped");
}

async fn on_message(
  msg: Message
, relay: Arc<ChatRelay>
) -> ResponseResult<()>
{   let Some(text) = msg.text()
    else
    {   return Ok(());
    };

    let chat = ChatId(msg.chat.id.0);
    if let Err(e) = relay.dispatch(chat, text).await
    {   error!("Relay failed for chat {}: {}", chat.0, e);
    }
    Ok(())
}
