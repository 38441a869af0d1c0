//! Readiness policies
//!
//! Staged content gets a chance to settle (fonts, embedded imagery) before it
//! is captured. The wait is asynchronous and never blocks the runtime.

use std::time::Duration;

/// Delay used when nothing else is configured
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// How long to wait between staging and capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessPolicy {
    /// Capture immediately; the content has no external resources to load
    Immediate,
    /// Wait a fixed amount of time
    FixedDelay(Duration),
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::FixedDelay(DEFAULT_SETTLE_DELAY)
    }
}

impl ReadinessPolicy {
    /// Policy for a delay in milliseconds; zero means immediate
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Self::Immediate
        } else {
            Self::FixedDelay(Duration::from_millis(millis))
        }
    }

    /// Time this policy waits
    pub fn delay(&self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::FixedDelay(d) => *d,
        }
    }

    /// Wait until the staged content is considered ready
    pub async fn wait(&self) {
        if let Self::FixedDelay(delay) = self {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "waiting for staged content to settle");
            tokio::time::sleep(*delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_from_millis() {
        assert_eq!(ReadinessPolicy::from_millis(0), ReadinessPolicy::Immediate);
        assert_eq!(
            ReadinessPolicy::from_millis(2000),
            ReadinessPolicy::default()
        );
        assert_eq!(ReadinessPolicy::from_millis(15).delay(), Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_fixed_delay_waits() {
        let start = Instant::now();
        ReadinessPolicy::FixedDelay(Duration::from_millis(20)).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_immediate_does_not_wait() {
        let start = Instant::now();
        ReadinessPolicy::Immediate.wait().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
