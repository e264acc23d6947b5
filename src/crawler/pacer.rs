//! Pacing between page requests
//!
//! The harvester calls [`Pacer::pause`] after every page fetch. The delay is
//! courtesy towards the forum, not a correctness concern, so tests swap in
//! [`NoDelay`].

use crate::HarvestError;
use async_trait::async_trait;
use std::time::Duration;

/// Default pause between page requests
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Strategy for waiting between page requests
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits after a page fetch
    async fn pause(&self);

    /// Nominal length of one pause, used for time estimates
    fn delay(&self) -> Duration;
}

/// Sleeps a fixed duration after every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a delay from fractional seconds
    ///
    /// # Returns
    ///
    /// * `Ok(FixedDelay)` - `seconds` is finite and not negative
    /// * `Err(HarvestError::InvalidDelay)` - Anything else
    pub fn from_secs_f64(seconds: f64) -> Result<Self, HarvestError> {
        Duration::try_from_secs_f64(seconds)
            .map(Self::new)
            .map_err(|_| HarvestError::InvalidDelay(seconds))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}

/// Does not wait at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}

    fn delay(&self) -> Duration {
        Duration::ZERO
    }
}
