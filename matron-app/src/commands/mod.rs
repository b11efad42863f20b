//! Mutation commands.
//!
//! Every command follows the same contract: validate the payload (nothing
//! invalid reaches the wire), run the write, and on success invalidate the
//! affected cache keys exactly once and emit a success notification. On
//! failure the cache is left untouched and an error notification carries the
//! server-supplied message when one exists. Errors are consumed here, never
//! rethrown.

pub mod beds;
pub mod lists;
pub mod queues;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matron_client::{ApiError, ResourceCache, RestClient};

use crate::notify::Notifier;

/// Shared context for mutation commands: the client, the cache the list
/// controllers read from, and the notification sink. `is_busy` mirrors the
/// triggering control's disabled/loading state while a write is in flight.
pub struct CommandContext {
    pub client: Arc<RestClient>,
    pub cache: Arc<ResourceCache>,
    pub notifier: Notifier,
    in_flight: AtomicUsize,
}

impl CommandContext {
    pub fn new(client: Arc<RestClient>, cache: Arc<ResourceCache>, notifier: Notifier) -> Self {
        Self {
            client,
            cache,
            notifier,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// True while any command on this context is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub(crate) fn begin(&self) -> BusyGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard { ctx: self }
    }

    /// Standard failure path: notify, leave the cache alone.
    pub(crate) fn fail(&self, error: &ApiError) {
        self.notifier.error(error.user_message());
    }
}

pub(crate) struct BusyGuard<'a> {
    ctx: &'a CommandContext,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.ctx.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
