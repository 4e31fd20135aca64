//! Retry-after advice attached to error envelopes
//!
//! Nothing here retries. The hint is surfaced to whichever layer
//! re-invokes the relay.

use log::debug;

use crate::error::Error;

/// Hint for failures that are likely to clear up quickly
pub const SHORT_BACKOFF_SECS: u64 = 30;

/// Hint for throttling, outages and unclassified failures
pub const LONG_BACKOFF_SECS: u64 = 60;

/// HTTP statuses that signal the upstream is overloaded
pub const THROTTLING_STATUSES: [u16; 2] = [429, 503];

/// Retry policy mapping failures to advisory delays
#[derive(Debug, Clone)]
pub struct RetryPolicy
{   pub short_backoff_secs: u64
  , pub long_backoff_secs: u64
}

impl RetryPolicy
{   /// Create a new retry policy
    pub fn new(
      short_backoff_secs: u64
    , long_backoff_secs: u64
    ) -> Self
    {   RetryPolicy
        {   short_backoff_secs
          , long_backoff_secs
        }
    }

    /// Seconds the caller should wait before trying again.
    /// None marks a failure that retrying will not fix.
    pub fn retry_after(
      &self
    , error: &Error
    ) -> Option<u64>
    {   let hint = match error
        {   Error::Timeout => Some(self.short_backoff_secs)
          , Error::HttpStatus(status)
              if THROTTLING_STATUSES.contains(status) => {
              Some(self.long_backoff_secs)
            }
          , Error::HttpStatus(_) => Some(self.short_backoff_secs)
          , Error::ConnectionFailed(_) => Some(self.long_backoff_secs)
          , Error::RequestFailed { .. } => Some(self.short_backoff_secs)
          , Error::JsonDecode(_) => Some(self.short_backoff_secs)
          , Error::ApiStructure { .. } => None
          , _ => Some(self.long_backoff_secs)
        };
        debug!("Retry hint for {}: {:?}", error.code(), hint);
        hint
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::new(SHORT_BACKOFF_SECS, LONG_BACKOFF_SECS)
    }
}
