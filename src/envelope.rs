//! Response envelope returned to the relay's caller
//!
//! Every answer, good or bad, is serialized into this shape:
//!
//! ```json
//! { "status": "success", "data": { ... }, "error": null }
//! { "status": "error", "data": null, "error": { ... } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::error;

use crate::error::Error;
use crate::retry::RetryPolicy;

/// Used only if serializing an envelope ever fails
const FALLBACK_ENVELOPE: &str = r#"{
  "status": "error",
  "data": null,
  "error": {
    "code": "unknown_error",
    "message": "Произошла непредвиденная ошибка",
    "details": {
      "retry_after": 60
    }
  }
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status
{   Success
  , Error
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata
{   pub model: String
  , pub timestamp: String
  , #[serde(default)]
    pub tokens_used: Option<Value>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessData
{   pub text: String
  , pub metadata: Metadata
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorDetails
{   pub timestamp: String
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>
  , /// Top-level keys of an unexpected body, or "invalid_response"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_keys: Option<Value>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody
{   pub code: String
  , pub message: String
  , pub details: ErrorDetails
}

/// Discriminated success/error envelope. Exactly one of
/// `data` and `error` is populated, the other serializes as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope
{   pub status: Status
  , pub data: Option<SuccessData>
  , pub error: Option<ErrorBody>
}

impl ResponseEnvelope
{   /// Error envelope for a classified failure
    pub fn from_error(
      err: &Error
    , timestamp: &str
    , policy: &RetryPolicy
    ) -> Self
    {   let mut details = ErrorDetails
        {   timestamp: timestamp.to_string()
          , retry_after: policy.retry_after(err)
          , ..ErrorDetails::default()
        };

        match err
        {   Error::HttpStatus(status) => {
              details.status_code = Some(*status);
            }
          , Error::RequestFailed { kind, .. } => {
              details.error_type = Some(kind.clone());
            }
          , Error::ApiStructure { response_keys } => {
              details.response_keys = Some(match response_keys
              {   Some(keys) => Value::from(keys.clone())
                , None => Value::from("invalid_response")
              });
            }
          , Error::Timeout
          | Error::ConnectionFailed(_)
          | Error::JsonDecode(_) => {}
          , other => {
              details.error_type = Some(other.kind_name().to_string());
              details.error_message = Some(other.to_string());
            }
        }

        ResponseEnvelope
        {   status: Status::Error
          , data: None
          , error: Some(ErrorBody
            {   code: err.code().to_string()
              , message: err.user_message()
              , details
            })
        }
    }

    /// True when the status tag agrees with the populated slot
    pub fn is_consistent(&self) -> bool
    {   match self.status
        {   Status::Success => self.data.is_some() && self.error.is_none()
          , Status::Error => self.data.is_none() && self.error.is_some()
        }
    }

    /// Pretty JSON with two-space indent, non-ASCII kept literal
    pub fn to_json(&self) -> String
    {   serde_json::to_string_pretty(self).unwrap_or_else(|e| {
          error!("Failed to serialize envelope: {}", e);
          FALLBACK_ENVELOPE.to_string()
        })
    }
}
