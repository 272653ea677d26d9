//! Fixed inter-send pacing. The only defense against provider rate limits.

use std::time::Duration;

/// Unconditional fixed pause between consecutive send attempts. No jitter,
/// no backoff, no exemption for failures.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Zero-delay throttle for tests.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Sleep for the configured interval. Called once per dispatch iteration,
    /// after each send attempt.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_throttle_returns_immediately() {
        let throttle = Throttle::disabled();
        let start = std::time::Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn pause_sleeps_for_configured_delay() {
        let throttle = Throttle::new(Duration::from_millis(50));
        let start = std::time::Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
