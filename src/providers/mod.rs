//! Completion API transports

pub mod yandex;

use async_trait::async_trait;

// Re-export for convenience
pub use yandex::YandexTransport;

/// Delivers one completion request and hands back the raw body.
///
/// A non-success status is reported as `Error::HttpStatus`; the body of a
/// success response is returned untouched so the client can classify
/// decode and structure problems itself.
#[async_trait]
pub trait CompletionTransport: Send + Sync
{   async fn post_completion(
      &self
    , request: &crate::request::CompletionRequest
    ) -> Result<String, crate::error::Error>;
}
