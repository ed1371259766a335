use std::time::Duration;

use async_trait::async_trait;
use rand::{thread_rng, Rng};

/// Suspension point used to emulate network latency.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Yields to the runtime for the full duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

/// Uniformly random duration in `[min, max]` at millisecond resolution.
pub fn jitter(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let span = (max - min).as_millis() as u64;
    min + Duration::from_millis(thread_rng().gen_range(0..=span))
}

/// Holds every sleep until the shared [`tokio::sync::Notify`] is signalled.
#[cfg(test)]
pub(crate) struct GateDelay(pub std::sync::Arc<tokio::sync::Notify>);

#[cfg(test)]
#[async_trait]
impl Delay for GateDelay {
    async fn sleep(&self, _duration: Duration) {
        self.0.notified().await;
    }
}
