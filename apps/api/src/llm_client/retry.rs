//! Retry decorator for any `CompletionBackend`.
//!
//! The wrapped backend stays single-attempt; this layer owns the policy.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{CompletionBackend, CompletionRequest, LlmError};

const BASE_DELAY_MS: u64 = 1000;

pub struct RetryingBackend<B> {
    inner: B,
    max_attempts: u32,
}

impl<B: CompletionBackend> RetryingBackend<B> {
    /// `max_attempts` counts the first call; values below 1 are treated as 1.
    pub fn new(inner: B, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
        }
    }
}

/// Exponential backoff before attempt `attempt` (1-based retries): 1s, 2s, 4s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << (attempt - 1).min(16))
}

#[async_trait]
impl<B: CompletionBackend> CompletionBackend for RetryingBackend<B> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_attempts => {
                    attempt += 1;
                    let delay = backoff(attempt);
                    warn!(
                        "LLM call attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
