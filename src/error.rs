use std::fmt;

/// Custom error type for relay operations
/// Implements Clone so fakes can hand out the same failure twice
#[derive(Debug, Clone, PartialEq)]
pub enum Error
{   /// Required environment variable is not set
    MissingConfig(String)
  , /// Invalid configuration value
    InvalidConfiguration(String)
  , /// Upstream call exceeded the request timeout
    Timeout
  , /// Could not connect to the upstream API
    ConnectionFailed(String)
  , /// Upstream answered with a non-success HTTP status
    HttpStatus(u16)
  , /// Any other transport-layer failure
    RequestFailed
    {   kind: String
      , message: String
    }
  , /// Upstream body is not valid JSON
    JsonDecode(String)
  , /// Upstream JSON does not contain a completion alternative.
    /// `response_keys` is None when the body was not a JSON object.
    ApiStructure
    {   response_keys: Option<Vec<String>>
    }
  , /// Chat platform refused a send or edit
    Platform(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// Envelope error code reported to the caller
    pub fn code(&self) -> &'static str
    {   match self
        {   Error::Timeout => "timeout_error"
          , Error::HttpStatus(_) => "http_error"
          , Error::ConnectionFailed(_) => "connection_error"
          , Error::RequestFailed { .. } => "request_error"
          , Error::JsonDecode(_) => "json_decode_error"
          , Error::ApiStructure { .. } => "api_structure_error"
          , _ => "unknown_error"
        }
    }

    /// Human readable message placed in the error envelope
    pub fn user_message(&self) -> String
    {   match self
        {   Error::Timeout => {
              "Превышено время ожидания ответа от API".to_string()
            }
          , Error::HttpStatus(status) => {
              format!("HTTP ошибка: {}", status)
            }
          , Error::ConnectionFailed(_) => {
              "Ошибка подключения к API".to_string()
            }
          , Error::RequestFailed { .. } => {
              "Ошибка при выполнении запроса к API".to_string()
            }
          , Error::JsonDecode(_) => {
              "Не удалось декодировать JSON ответ от API".to_string()
            }
          , Error::ApiStructure { .. } => {
              "Неожиданная структура ответа от Yandex API".to_string()
            }
          , _ => "Произошла непредвиденная ошибка".to_string()
        }
    }

    /// Variant name, reported as `error_type` for unclassified failures
    pub fn kind_name(&self) -> &'static str
    {   match self
        {   Error::MissingConfig(_) => "MissingConfig"
          , Error::InvalidConfiguration(_) => "InvalidConfiguration"
          , Error::Timeout => "Timeout"
          , Error::ConnectionFailed(_) => "ConnectionFailed"
          , Error::HttpStatus(_) => "HttpStatus"
          , Error::RequestFailed { .. } => "RequestFailed"
          , Error::JsonDecode(_) => "JsonDecode"
          , Error::ApiStructure { .. } => "ApiStructure"
          , Error::Platform(_) => "Platform"
          , Error::Other(_) => "Other"
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingConfig(var) => {
              write!(f, "Missing environment variable: {}", var)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::ConnectionFailed(msg) => {
              write!(f, "Connection failed: {}", msg)
            }
          , Error::HttpStatus(status) => {
              write!(f, "HTTP status {}", status)
            }
          , Error::RequestFailed { kind, message } => {
              write!(f, "Request failed ({}): {}", kind, message)
            }
          , Error::JsonDecode(msg) => {
              write!(f, "JSON decode error: {}", msg)
            }
          , Error::ApiStructure { response_keys } => {
              write!(f,
                "Unexpected API response structure, keys: {:?}",
                response_keys
              )
            }
          , Error::Platform(msg) => {
              write!(f, "Chat platform error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
