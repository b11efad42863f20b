//! Queue polling: interval-driven refresh of the queue board cache entry.
//!
//! The board has no push channel upstream, so it polls. Two guards keep the
//! loop well-behaved where the naive version was not:
//! - requests never overlap: the loop awaits each refresh before sleeping
//!   again, so a slow server cannot pile up in-flight fetches;
//! - consecutive failures back off exponentially up to a cap, resetting to
//!   the configured interval on the first success.

use std::sync::Arc;
use std::time::Duration;

use matron_client::{ResourceCache, RestClient};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::controller::queue_entries_loader;
use crate::keys;

pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the poller to stop and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

pub fn spawn_queue_poller(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    interval: Duration,
    max_backoff: Duration,
) -> PollerHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let loader = queue_entries_loader(client);
        let mut failures: u32 = 0;
        let mut delay = interval;
        let mut first = true;

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep(delay) => {
                    let state = if first {
                        first = false;
                        let loader = loader.clone();
                        cache.fetch(keys::QUEUE_ENTRIES, move || loader()).await
                    } else {
                        cache.mutate(keys::QUEUE_ENTRIES).await
                    };

                    if state.error.is_some() {
                        failures += 1;
                        delay = saturating_backoff(interval, failures).min(max_backoff);
                        tracing::warn!(
                            failures,
                            next_poll_ms = delay.as_millis() as u64,
                            "Queue poll failed, backing off"
                        );
                    } else {
                        if failures > 0 {
                            tracing::info!("Queue poll recovered");
                        }
                        failures = 0;
                        delay = interval;
                    }
                }
            }
        }

        tracing::debug!("Queue poller stopped");
    });

    PollerHandle { shutdown, task }
}

fn saturating_backoff(interval: Duration, failures: u32) -> Duration {
    interval.saturating_mul(2u32.saturating_pow(failures.min(16)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_failure() {
        let base = Duration::from_millis(100);
        assert_eq!(saturating_backoff(base, 1), Duration::from_millis(200));
        assert_eq!(saturating_backoff(base, 2), Duration::from_millis(400));
        assert_eq!(saturating_backoff(base, 3), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_saturates_instead_of_overflowing() {
        let base = Duration::from_millis(3000);
        // Deep failure counts must not panic.
        let _ = saturating_backoff(base, 40);
    }
}
