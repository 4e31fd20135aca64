//! Configuration for the relay, sourced from the environment

use serde::{Deserialize, Serialize};
use log::debug;

use crate::error::Error;

pub const DEFAULT_API_URL: &str
  = "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const DEFAULT_MODEL: &str = "yandexgpt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig
{   /// Bot token issued by BotFather
    pub bot_token: String
}

/// YandexGPT completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexGptConfig
{   /// API key sent as `Authorization: Api-Key <key>`
    pub api_key: String
  , /// Cloud folder the model is billed to
    pub folder_id: String
  , /// Completion endpoint
    pub api_url: String
  , /// Model name inside the folder
    pub model: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
  , /// Upper bound on generated tokens
    pub max_tokens: u32
  , /// Sampling temperature
    pub temperature: f32
}

impl YandexGptConfig
{   /// Config with default tunables for the given credentials
    pub fn new(
      api_key: impl Into<String>
    , folder_id: impl Into<String>
    ) -> Self
    {   YandexGptConfig
        {   api_key: api_key.into()
          , folder_id: folder_id.into()
          , api_url: DEFAULT_API_URL.to_string()
          , model: DEFAULT_MODEL.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , max_tokens: DEFAULT_MAX_TOKENS
          , temperature: DEFAULT_TEMPERATURE
        }
    }

    /// `gpt://<folder>/<model>`
    pub fn model_uri(&self) -> String
    {   format!("gpt://{}/{}", self.folder_id, self.model)
    }
}

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig
{   pub telegram: TelegramConfig
  , pub yandex: YandexGptConfig
}

impl RelayConfig
{   /// Read configuration from process environment
    pub fn from_env() -> Result<Self, Error>
    {   RelayConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
      F: Fn(&str) -> Option<String>
    {   let required = |key: &str| -> Result<String, Error>
        {   lookup(key)
              .filter(|v| !v.trim().is_empty())
              .ok_or_else(|| Error::MissingConfig(key.to_string()))
        };

        let mut yandex = YandexGptConfig::new(
          required("YANDEX_API_KEY")?
        , required("YANDEX_FOLDER_ID")?
        );

        if let Some(url) = lookup("YANDEX_GPT_API_URL")
        {   yandex.api_url = url;
        }
        if let Some(model) = lookup("YANDEX_GPT_MODEL")
        {   yandex.model = model;
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT")
        {   yandex.timeout_secs = parse_var("REQUEST_TIMEOUT", &raw)?;
        }
        if let Some(raw) = lookup("MAX_TOKENS")
        {   yandex.max_tokens = parse_var("MAX_TOKENS", &raw)?;
        }
        if let Some(raw) = lookup("TEMPERATURE")
        {   yandex.temperature = parse_var("TEMPERATURE", &raw)?;
        }

        let config = RelayConfig
        {   telegram: TelegramConfig
            {   bot_token: required("TELEGRAM_BOT_TOKEN")?
            }
          , yandex
        };
        debug!(
          "Loaded config: model {}, timeout {}s",
          config.yandex.model_uri(),
          config.yandex.timeout_secs
        );
        Ok(config)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, Error>
where
  T: std::str::FromStr
, T::Err: std::fmt::Display
{   raw.trim().parse::<T>().map_err(|e| {
      Error::InvalidConfiguration(
        format!("{}={:?}: {}", key, raw, e)
      )
    })
}
