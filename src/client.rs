use std::sync::Arc;

use log::{debug, trace, warn, error};
use serde_json::Value;

use crate::config::YandexGptConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::Error;
use crate::providers::{CompletionTransport, YandexTransport};
use crate::request::{CompletionRequest, CompletionResponse};
use crate::retry::RetryPolicy;

/// Format of the per-call timestamp, e.g. `Fri Oct 16 12:00:00 2026`
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

const FENCE: &str = "```";

/// Source of the per-call timestamp
pub type Clock = fn() -> String;

/// Local wall-clock time in [`TIMESTAMP_FORMAT`]
pub fn local_timestamp() -> String
{   chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Wraps the upstream completion API and normalizes every outcome
/// into a serialized [`ResponseEnvelope`].
pub struct CompletionClient
{   config: YandexGptConfig
  , transport: Arc<dyn CompletionTransport>
  , retry_policy: RetryPolicy
  , clock: Clock
}

impl CompletionClient
{   /// Client talking to the real YandexGPT endpoint
    pub fn new(config: YandexGptConfig) -> Result<Self, Error>
    {   let transport = YandexTransport::new(&config)?;
        Ok(CompletionClient::with_transport(config, Arc::new(transport)))
    }

    /// Client over an arbitrary transport
    pub fn with_transport(
      config: YandexGptConfig
    , transport: Arc<dyn CompletionTransport>
    ) -> Self
    {   debug!("Creating CompletionClient for {}", config.model_uri());
        CompletionClient
        {   config
          , transport
          , retry_policy: RetryPolicy::default()
          , clock: local_timestamp
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Clock) -> Self
    {   self.clock = clock;
        self
    }

    /// Send `user_text` upstream and return a serialized envelope.
    /// Never fails: every error becomes an error envelope.
    pub async fn get_response(&self, user_text: &str) -> String
    {   let timestamp = (self.clock)();
        let request = CompletionRequest::new(
          &self.config
        , system_prompt(&timestamp)
        , user_text.to_string()
        );

        match self.complete(&request, &timestamp).await
        {   Ok(text) => text
          , Err(err) => {
              error!("YandexGPT call failed: {}", err);
              ResponseEnvelope::from_error(
                &err, &timestamp, &self.retry_policy
              ).to_json()
            }
        }
    }

    async fn complete(
      &self
    , request: &CompletionRequest
    , timestamp: &str
    ) -> Result<String, Error>
    {   let body = self.transport.post_completion(request).await?;
        trace!("YandexGPT raw body: {}", body);

        let data: Value = serde_json::from_str(&body).map_err(|e| {
          error!("JSON decode error from YandexGPT API: {}", e);
          Error::JsonDecode(e.to_string())
        })?;

        let cleaned = extract_text(data)?;
        Ok(fix_timestamp(&cleaned, timestamp))
    }
}

/// Fence-stripped text of the first alternative. `ApiStructure` if there
/// is no alternative or nothing is left once the fences are gone.
pub fn extract_text(data: Value) -> Result<String, Error>
{   let response_keys = data.as_object()
      .map(|o| o.keys().cloned().collect::<Vec<_>>());

    let parsed = serde_json::from_value::<CompletionResponse>(data);
    let cleaned = parsed.ok()
      .and_then(|r| r.result.alternatives.into_iter().next())
      .map(|alternative| clean_code_fences(&alternative.message.text))
      .filter(|text| !text.is_empty());

    match cleaned
    {   Some(text) => Ok(text)
      , None => {
          error!(
            "Unexpected API response structure, keys: {:?}",
            response_keys
          );
          Err(Error::ApiStructure { response_keys })
        }
    }
}

/// Drop a leading fence line (with any language tag) and a trailing
/// fence line. Text without a leading fence is only trimmed.
pub fn clean_code_fences(text: &str) -> String
{   let text = text.trim();
    if !text.starts_with(FENCE)
    {   return text.to_string();
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.len() > 1
    {   lines.remove(0);
    }
    if lines.last().map(|l| l.trim() == FENCE).unwrap_or(false)
    {   lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Overwrite `data.metadata.timestamp` with the call's own timestamp.
/// Text that is not JSON, or JSON without that object, is returned as-is.
pub fn fix_timestamp(text: &str, timestamp: &str) -> String
{   let mut parsed: Value = match serde_json::from_str(text)
    {   Ok(v) => v
      , Err(e) => {
          warn!("Could not parse model reply as JSON to fix timestamp: {}", e);
          return text.to_string();
        }
    };

    let metadata = parsed.get_mut("data")
      .and_then(|d| d.get_mut("metadata"))
      .and_then(|m| m.as_object_mut());

    match metadata
    {   Some(metadata) => {
          metadata.insert(
            "timestamp".to_string(),
            Value::from(timestamp)
          );
          serde_json::to_string_pretty(&parsed)
            .unwrap_or_else(|_| text.to_string())
        }
      , None => {
          debug!("Model reply has no data.metadata, leaving it untouched");
          text.to_string()
        }
    }
}

/// Instruction turn describing the exact reply shape
pub fn system_prompt(timestamp: &str) -> String
{   format!(
r#"Ты — умный и полезный AI-агент. ВАЖНО: Всегда отвечай строго в следующем формате в виде строки, но чтоб его можно было распарсить как JSON:

{{
  "status": "success",
  "data": {{
    "text": "Основной текст ответа от модели",
    "metadata": {{
      "model": "yandexgpt",
      "timestamp": "{timestamp}",
      "tokens_used": количество использованных токенов
    }}
  }},
  "error": null
}}

Или в случае ошибки:

{{
  "status": "error",
  "data": null,
  "error": {{
    "code": "код ошибки",
    "message": "Описание ошибки",
    "details": {{
      "retry_after": 60
    }}
  }}
}}

ОБЯЗАТЕЛЬНО используй timestamp: "{timestamp}" в поле metadata.timestamp
ОБЯЗАТЕЛЬНО удали ``` из начала и конца ответа. Не используй блоки кода, не добавляй символы ``` или другое форматирование."#,
      timestamp = timestamp
    )
}
