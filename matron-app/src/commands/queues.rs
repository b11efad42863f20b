//! Queue commands: enqueue, transition, end.

use chrono::Utc;
use matron_client::{TransitionPayload, VisitQueueEntryPayload};

use super::CommandContext;
use crate::keys;

/// Refresh both the board and the metrics cards after a queue write.
async fn refresh_queue_views(ctx: &CommandContext) {
    ctx.cache.mutate(keys::QUEUE_ENTRIES).await;
    ctx.cache.mutate(keys::QUEUE_METRICS).await;
}

/// Place a patient in a service queue under their active visit.
pub async fn enqueue_patient(ctx: &CommandContext, payload: &VisitQueueEntryPayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.create_visit_queue_entry(payload).await {
        Ok(_) => {
            refresh_queue_views(ctx).await;
            ctx.notifier.success("Patient added to the queue");
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

/// Move an entry to a new status and/or priority.
pub async fn transition_entry(
    ctx: &CommandContext,
    entry_uuid: &str,
    payload: &TransitionPayload,
) -> bool {
    let _busy = ctx.begin();

    match ctx.client.transition_queue_entry(entry_uuid, payload).await {
        Ok(_) => {
            refresh_queue_views(ctx).await;
            ctx.notifier.success("Queue entry updated");
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

/// Remove an entry from the active board, stamping it with the current time.
pub async fn end_entry(ctx: &CommandContext, entry_uuid: &str) -> bool {
    let _busy = ctx.begin();

    let ended_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string();
    match ctx.client.end_queue_entry(entry_uuid, &ended_at).await {
        Ok(_) => {
            refresh_queue_views(ctx).await;
            ctx.notifier.success("Queue entry ended");
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}
