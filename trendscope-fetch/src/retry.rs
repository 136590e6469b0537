//! Retry policy for rate-limited requests.
//!
//! Delay before retry `n` (0-based) is `base_delay * 2^n` plus a random
//! jitter in `[0, max_jitter)`. With the defaults that is
//! `750ms * 2^n + [0, 250)ms`, for at most three retries.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classify::Classification;

/// Default number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Default base delay in milliseconds.
pub const BASE_DELAY_MS: u64 = 750;

/// Default upper bound (exclusive) of the random jitter in milliseconds.
pub const MAX_JITTER_MS: u64 = 250;

// ============================================================================
// Retry Mode
// ============================================================================

/// Whether a call may retry at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryMode {
    /// Retry rate limits and redirects up to the policy's budget.
    #[default]
    Opportunistic,
    /// Start at the final attempt index: one best-effort try.
    SingleShot,
}

impl From<bool> for RetryMode {
    fn from(allow_opportunistic_retry: bool) -> Self {
        if allow_opportunistic_retry {
            Self::Opportunistic
        } else {
            Self::SingleShot
        }
    }
}

// ============================================================================
// Retry Decision
// ============================================================================

/// What the transport does after classifying a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep, then send the next attempt.
    Backoff(Duration),
    /// Send the next attempt immediately.
    RetryNow,
    /// Hand the current body back to the caller.
    Finish,
}

// ============================================================================
// Retry Policy
// ============================================================================

/// Backoff schedule and retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Exclusive upper bound of the random jitter in milliseconds.
    pub max_jitter_ms: u64,
}

impl RetryPolicy {
    /// Creates a policy with the given retry budget and default delays.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay_ms: BASE_DELAY_MS,
            max_jitter_ms: MAX_JITTER_MS,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_jitter_ms: 0,
        }
    }

    /// Keeps the retry budget but never sleeps. Useful in tests.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay_ms: 0,
            max_jitter_ms: 0,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, millis: u64) -> Self {
        self.base_delay_ms = millis;
        self
    }

    /// Sets the jitter bound.
    pub fn with_max_jitter(mut self, millis: u64) -> Self {
        self.max_jitter_ms = millis;
        self
    }

    /// Attempt index the first request starts at.
    pub fn initial_attempt(&self, mode: RetryMode) -> u32 {
        match mode {
            RetryMode::Opportunistic => 0,
            RetryMode::SingleShot => self.max_retries,
        }
    }

    /// Returns true if another attempt is allowed after `attempt`.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Deterministic part of the delay: `base * 2^attempt`.
    pub fn base_delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Delay for `attempt` with an explicit jitter value.
    pub fn delay_with_jitter(&self, attempt: u32, jitter_ms: u64) -> Duration {
        self.base_delay_for_attempt(attempt) + Duration::from_millis(jitter_ms)
    }

    /// Delay for `attempt` with random jitter in `[0, max_jitter_ms)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.max_jitter_ms)
        };
        self.delay_with_jitter(attempt, jitter)
    }

    /// Decision table for a classified response at `attempt`.
    ///
    /// | classification | attempts left | decision |
    /// |---|---|---|
    /// | rate limited | yes | backoff |
    /// | redirect | yes | retry now |
    /// | anything | no | finish |
    /// | terminal | - | finish |
    pub fn decide(&self, classification: Classification, attempt: u32) -> RetryDecision {
        if !self.has_attempts_left(attempt) {
            return RetryDecision::Finish;
        }
        match classification {
            Classification::RateLimited => RetryDecision::Backoff(self.delay_for_attempt(attempt)),
            Classification::Redirect => RetryDecision::RetryNow,
            Classification::Terminal => RetryDecision::Finish,
        }
    }

    /// Determines if a transport-level error should be retried.
    pub fn should_retry_error(error: &reqwest::Error) -> bool {
        // Retry on connection errors and timeouts
        error.is_connect() || error.is_timeout()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES)
    }
}
