use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace, error};

use crate::config::YandexGptConfig;
use crate::error::Error;
use crate::request::CompletionRequest;
use super::CompletionTransport;

/// reqwest transport for the YandexGPT completion endpoint
pub struct YandexTransport
{   api_url: String
  , api_key: String
  , http_client: reqwest::Client
}

impl YandexTransport
{   /// Build a transport whose requests are bounded by the config timeout
    pub fn new(config: &YandexGptConfig) -> Result<Self, Error>
    {   debug!(
          "Creating YandexTransport for {} (timeout {}s)",
          config.api_url, config.timeout_secs
        );
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            Error::InvalidConfiguration(e.to_string())
          })?;

        Ok(YandexTransport
        {   api_url: config.api_url.clone()
          , api_key: config.api_key.clone()
          , http_client
        })
    }
}

#[async_trait]
impl CompletionTransport for YandexTransport
{   async fn post_completion(
      &self
    , request: &CompletionRequest
    ) -> Result<String, Error>
    {   trace!("YandexGPT request: {:?}", request);

        let response = self.http_client
          .post(&self.api_url)
          .header("Authorization", format!("Api-Key {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error calling YandexGPT API: {}", e);
            classify(e)
          })?;

        let status = response.status();
        trace!("YandexGPT response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await.unwrap_or_default();
            error!("YandexGPT API returned {}: {}", status, body);
            return Err(Error::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(|e| {
          error!("Failed to read YandexGPT response body: {}", e);
          classify(e)
        })
    }
}

/// Map a reqwest failure onto the relay's transport categories
fn classify(e: reqwest::Error) -> Error
{   if e.is_timeout()
    {   return Error::Timeout;
    }
    if e.is_connect()
    {   return Error::ConnectionFailed(e.to_string());
    }
    if let Some(status) = e.status()
    {   return Error::HttpStatus(status.as_u16());
    }
    Error::RequestFailed
    {   kind: kind_of(&e).to_string()
      , message: e.to_string()
    }
}

fn kind_of(e: &reqwest::Error) -> &'static str
{   if e.is_builder()
    {   "BuilderError"
    } else if e.is_redirect()
    {   "RedirectError"
    } else if e.is_body()
    {   "BodyError"
    } else if e.is_decode()
    {   "DecodeError"
    } else
    {   "RequestError"
    }
}
