use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for startup connectivity checks against the catalog store
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts made after the first one; `0` means try exactly once
    pub max_retries: u32,
    /// Pause before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Ceiling for a single pause, in milliseconds
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Scale each pause by a random factor in [0.5, 1.0]
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Un-jittered pauses between attempts, one per allowed retry.
    pub fn schedule(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::successors(Some(self.initial_delay_ms.min(self.max_delay_ms)), |prev| {
            Some(((*prev as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms))
        })
        .take(self.max_retries as usize)
    }

    fn pause(&self, base_ms: u64) -> Duration {
        let ms = if self.use_jitter {
            let factor: f64 = rand::thread_rng().gen_range(0.5..=1.0);
            (base_ms as f64 * factor) as u64
        } else {
            base_ms
        };
        Duration::from_millis(ms)
    }
}

/// No retries, 100ms first pause, 5s ceiling, doubling, jittered.
impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Call `operation` once, then once more after each pause in the config's schedule,
/// stopping at the first success. The final error is returned as is.
///
/// # Example
/// ```ignore
/// use database::{RetryConfig, retry_with_backoff};
///
/// let config = RetryConfig::new().with_max_retries(5);
/// retry_with_backoff(|| database::mongodb::verify_connection(&client), config).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let total = config.max_retries + 1;
    let mut pauses = config.schedule();
    let mut attempt = 1;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let Some(base_ms) = pauses.next() else {
            if total > 1 {
                warn!(attempts = total, "Giving up: {}", err);
            }
            return Err(err);
        };

        let pause = config.pause(base_ms);
        debug!("Attempt {}/{} failed: {}; next try in {:?}", attempt, total, err, pause);
        tokio::time::sleep(pause).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_op(
        calls: Arc<AtomicU32>,
        fail_until: u32,
    ) -> impl FnMut() -> std::future::Ready<Result<&'static str, String>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n < fail_until {
                Err(format!("ping {n} refused"))
            } else {
                Ok("pong")
            })
        }
    }

    #[tokio::test]
    async fn test_default_makes_a_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry_with_backoff(counting_op(calls.clone(), u32::MAX), RetryConfig::default()).await;

        assert_eq!(result.unwrap_err(), "ping 1 refused");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_within_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new()
            .with_max_retries(4)
            .with_initial_delay(1)
            .without_jitter();

        let result = retry_with_backoff(counting_op(calls.clone(), 3), config).await;

        assert_eq!(result.unwrap(), "pong");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_budget_spent() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(1)
            .without_jitter();

        let result = retry_with_backoff(counting_op(calls.clone(), u32::MAX), config).await;

        assert_eq!(result.unwrap_err(), "ping 3 refused");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_schedule_doubles_up_to_ceiling() {
        let config = RetryConfig::new()
            .with_max_retries(7)
            .with_initial_delay(1000)
            .with_max_delay(5000);
        let schedule: Vec<u64> = config.schedule().collect();
        assert_eq!(schedule, vec![1000, 2000, 4000, 5000, 5000, 5000, 5000]);

        assert_eq!(RetryConfig::default().schedule().count(), 0);
    }

    #[test]
    fn test_jittered_pause_stays_within_half_to_full() {
        let config = RetryConfig::default();
        for _ in 0..100 {
            let pause = config.pause(1000).as_millis();
            assert!((500..=1000).contains(&pause), "{pause}");
        }
        assert_eq!(
            config.without_jitter().pause(1000),
            Duration::from_millis(1000)
        );
    }
}
