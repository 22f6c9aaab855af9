//! Pause between consecutive integration steps

use std::time::Duration;

use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StepDelay: Send + Sync {
    /// Wait once between two steps
    async fn wait(&self);
}

/// Sleeps for the same duration after every step but the last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(Duration);

impl FixedDelay {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

#[async_trait]
impl StepDelay for FixedDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_configured_duration() {
        let delay = FixedDelay::from_millis(2000);
        let started = tokio::time::Instant::now();

        delay.wait().await;

        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let delay = FixedDelay::none();
        let started = std::time::Instant::now();

        delay.wait().await;

        assert!(started.elapsed() < Duration::from_millis(100));
        assert!(delay.duration().is_zero());
    }
}
