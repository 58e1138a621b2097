// ── Exponential backoff ──
//
// Used where a status fetch itself fails for a while (the cloud services
// front end answers 502 with an HTML body during SDDC transitions).

use std::time::Duration;

use rand::Rng;

use crate::error::CoreError;

/// Exponential backoff configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Delay after the first failure. Default: 5s.
    pub base: Duration,
    /// Upper bound on the un-jittered delay. Default: 120s.
    pub max: Duration,
    /// Failures tolerated before giving up. Default: 12.
    pub max_retries: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(5),
            max: Duration::from_secs(120),
            max_retries: 12,
        }
    }
}

/// Exponential backoff with jitter.
///
/// `delay = min(base * 2^attempt, max)`, plus a uniform jitter in
/// `[0, delay / 2)`.
pub fn calculate_backoff(attempt: u32, config: &BackoffConfig) -> Duration {
    let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
    let capped = config.base.saturating_mul(factor).min(config.max);
    let half = capped / 2;
    if half.is_zero() {
        return capped;
    }
    capped + rand::thread_rng().gen_range(Duration::ZERO..half)
}

/// Counts failures of one retried loop against its budget.
///
/// The count is never reset by a success in between: a loop that keeps
/// alternating between answers and failures still runs out.
#[derive(Debug)]
pub struct RetryBudget {
    config: BackoffConfig,
    failures: u32,
}

impl RetryBudget {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            failures: 0,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Record a failure. Returns the delay to wait before the next try,
    /// or `RetriesExhausted` wrapping `err` once the budget is spent.
    pub fn record_failure(&mut self, operation: &str, err: CoreError) -> Result<Duration, CoreError> {
        self.failures += 1;
        if self.failures > self.config.max_retries {
            return Err(CoreError::RetriesExhausted {
                operation: operation.to_owned(),
                attempts: self.failures,
                source: Box::new(err),
            });
        }
        Ok(calculate_backoff(self.failures - 1, &self.config))
    }
}
