pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod envelope;
pub mod retry;
pub mod client;
pub mod relay;
pub mod telegram;
use serde::{Deserialize, Serialize};

/*

heyai relays chat messages to YandexGPT and answers with a
fixed success/error JSON envelope.

heyai/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Shared identifiers and re-exports
│   ├── main.rs         # Binary: env config, logging, Telegram polling
│   ├── error.rs        # Error type, envelope codes and messages
│   ├── config.rs       # Environment-sourced configuration
│   ├── request.rs      # Upstream request/response types
│   ├── envelope.rs     # Envelope returned to the chat
│   ├── retry.rs        # Retry-after advice
│   ├── client.rs       # CompletionClient
│   ├── relay.rs        # ChatRelay pipeline
│   ├── telegram.rs     # teloxide adapter and dispatcher
│   └── providers/
│       ├── mod.rs      # CompletionTransport trait
│       └── yandex.rs   # reqwest transport
└── tests/

*/

pub use client::CompletionClient;
pub use config::RelayConfig;
pub use error::Error;
pub use relay::{ChatPlatform, ChatRelay};

/// RELAY STRUCTURES:

/// Role tag of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   /// Instructions for the model
    System
  , /// The chat user's text
    User
  , /// Model output
    Assistant
}

/// Conversation the message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
pub struct ChatId(pub i64);

/// Identity of a message inside a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
pub struct MessageId(pub i32);
