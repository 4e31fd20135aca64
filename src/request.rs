//! Upstream completion request envelope

use serde::{Deserialize, Serialize};

use crate::config::YandexGptConfig;
use crate::Role;

/// One role-tagged turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message
{   pub role: Role
  , pub text: String
}

/// Sampling options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions
{   pub stream: bool
  , pub temperature: f32
  , /// The API takes this as a decimal string
    pub max_tokens: String
}

/// Completion request as the upstream API expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest
{   pub model_uri: String
  , pub completion_options: CompletionOptions
  , pub messages: Vec<Message>
}

impl CompletionRequest
{   /// Single system turn followed by a single user turn
    pub fn new(
      config: &YandexGptConfig
    , system_prompt: String
    , user_text: String
    ) -> Self
    {   CompletionRequest
        {   model_uri: config.model_uri()
          , completion_options: CompletionOptions
            {   stream: false
              , temperature: config.temperature
              , max_tokens: config.max_tokens.to_string()
            }
          , messages: vec![
              Message
              {   role: Role::System
                , text: system_prompt
              }
            , Message
              {   role: Role::User
                , text: user_text
              }
            ]
        }
    }

    /// Text of the user turn
    pub fn user_text(&self) -> Option<&str>
    {   self.messages.iter()
          .find(|m| m.role == Role::User)
          .map(|m| m.text.as_str())
    }
}

// ===== Upstream response shape =====

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse
{   pub result: CompletionResult
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResult
{   pub alternatives: Vec<Alternative>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alternative
{   pub message: AlternativeMessage
}

/// Only the text of a generated message is read; its role tag may be
/// missing or use the API's own spelling.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeMessage
{   pub text: String
}
