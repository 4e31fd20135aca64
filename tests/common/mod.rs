#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use heyai::config::YandexGptConfig;
use heyai::error::Error;
use heyai::providers::CompletionTransport;
use heyai::relay::ChatPlatform;
use heyai::request::CompletionRequest;
use heyai::{ChatId, MessageId};

pub const FIXED_TIMESTAMP: &str = "Fri Oct 16 12:00:00 2026";

pub fn fixed_clock() -> String
{   FIXED_TIMESTAMP.to_string()
}

pub fn test_config() -> YandexGptConfig
{   YandexGptConfig::new("test-key", "b1gfolder")
}

/// Upstream success body carrying `text` as the first alternative
pub fn upstream_body(text: &str) -> String
{   serde_json::json!({
      "result": {
        "alternatives": [
          {
            "message": { "role": "assistant", "text": text },
            "status": "ALTERNATIVE_STATUS_FINAL"
          }
        ],
        "usage": { "inputTextTokens": "10", "completionTokens": "5", "totalTokens": "15" },
        "modelVersion": "23.10.2024"
      }
    }).to_string()
}

/// Model reply in the success envelope shape with a stale timestamp
pub fn model_success_reply(text: &str) -> String
{   serde_json::json!({
      "status": "success",
      "data": {
        "text": text,
        "metadata": {
          "model": "yandexgpt",
          "timestamp": "Mon Jan 01 00:00:00 2001",
          "tokens_used": 42
        }
      },
      "error": null
    }).to_string()
}

/// Transport that always hands back the same outcome
pub struct FakeTransport
{   outcome: Result<String, Error>
  , pub seen: Mutex<Vec<CompletionRequest>>
  , pub calls: AtomicUsize
}

impl FakeTransport
{   pub fn ok(body: impl Into<String>) -> Self
    {   FakeTransport::with_outcome(Ok(body.into()))
    }

    pub fn failing(err: Error) -> Self
    {   FakeTransport::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<String, Error>) -> Self
    {   FakeTransport
        {   outcome
          , seen: Mutex::new(vec![])
          , calls: AtomicUsize::new(0)
        }
    }
}

#[async_trait]
impl CompletionTransport for FakeTransport
{   async fn post_completion(
      &self
    , request: &CompletionRequest
    ) -> Result<String, Error>
    {   self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action
{   Send(ChatId, MessageId, String)
  , Edit(ChatId, MessageId, String)
}

/// Chat platform that records every outbound action in order
pub struct FakePlatform
{   pub actions: Mutex<Vec<Action>>
  , next_id: AtomicI32
  , pub fail_send: bool
  , pub fail_edit: bool
}

impl FakePlatform
{   pub fn new() -> Self
    {   FakePlatform
        {   actions: Mutex::new(vec![])
          , next_id: AtomicI32::new(100)
          , fail_send: false
          , fail_edit: false
        }
    }

    pub fn actions(&self) -> Vec<Action>
    {   self.actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform
{   async fn send_text(
      &self
    , chat: ChatId
    , text: &str
    ) -> Result<MessageId, Error>
    {   if self.fail_send
        {   return Err(Error::Platform("send refused".to_string()));
        }
        let id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.actions.lock().unwrap()
          .push(Action::Send(chat, id, text.to_string()));
        Ok(id)
    }

    async fn edit_text(
      &self
    , chat: ChatId
    , message: MessageId
    , text: &str
    ) -> Result<(), Error>
    {   if self.fail_edit
        {   return Err(Error::Platform("edit refused".to_string()));
        }
        self.actions.lock().unwrap()
          .push(Action::Edit(chat, message, text.to_string()));
        Ok(())
    }
}
