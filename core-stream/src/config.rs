//! # Retry Configuration
//!
//! Retry and backoff policy for the retry stage. The constants mirror the
//! defaults the client shipped with, but both knobs are caller-configurable.

use std::time::Duration;

/// Default maximum number of open attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Delay used between attempts under [`Backoff::Fixed`] by default.
pub const DEFAULT_FIXED_DELAY: Duration = Duration::from_millis(2500);

/// Base delay for [`Backoff::Exponential`] by default.
pub const DEFAULT_EXPONENTIAL_BASE: Duration = Duration::from_secs(1);

/// Backoff strategy between open attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed(Duration),
    /// `base * 2^attempt`, where `attempt` counts from 0.
    Exponential { base: Duration },
}

impl Backoff {
    /// Delay before the retry following failed attempt number `attempt`
    /// (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(delay) => *delay,
            // Exponent capped so the multiplication cannot overflow
            Backoff::Exponential { base } => *base * 2u32.saturating_pow(attempt.min(16)),
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            base: DEFAULT_EXPONENTIAL_BASE,
        }
    }
}

/// Configuration for [`RetryTransport`](crate::retry::RetryTransport).
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum total open attempts (first try included).
    pub max_attempts: u32,
    /// Backoff strategy between attempts.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    /// Fixed-interval policy with the default delay.
    pub fn fixed() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::Fixed(DEFAULT_FIXED_DELAY),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be > 0".to_string());
        }
        let base = match self.backoff {
            Backoff::Fixed(d) => d,
            Backoff::Exponential { base } => base,
        };
        if base == Duration::ZERO {
            return Err("backoff delay must be > 0".to_string());
        }
        Ok(())
    }
}
