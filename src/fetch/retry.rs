//! Retry policy for subtitle downloads.
//!
//! The observable behavior is a fixed bound of attempts with no delay
//! between them and no distinction between error kinds. That behavior is
//! deliberately preserved; isolating it behind [`RetryPolicy`] keeps the
//! call sites stable if backoff or error classification is added later.

use tracing::debug;

/// Total download attempts before giving up (including the first).
pub const DOWNLOAD_MAX_ATTEMPTS: u32 = 10;

/// Decision on whether to retry a failed download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry immediately.
    Retry {
        /// Which attempt number this will be (1-indexed).
        attempt: u32,
    },
    /// Stop retrying.
    GiveUp {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Bounded, delay-free retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DOWNLOAD_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with a custom attempt bound (minimum 1).
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decides whether to retry after the given attempt failed.
    ///
    /// `attempt` is the 1-indexed number of the attempt that just failed.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::GiveUp {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        RetryDecision::Retry {
            attempt: attempt + 1,
        }
    }
}
