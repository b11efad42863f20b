//! Patient-list commands.

use matron_client::{CohortMemberPayload, CohortPayload};

use super::CommandContext;
use crate::keys;

pub async fn create_patient_list(ctx: &CommandContext, payload: &CohortPayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.create_patient_list(payload).await {
        Ok(_) => {
            ctx.cache.mutate(keys::PATIENT_LISTS).await;
            ctx.notifier
                .success(format!("List {} created", payload.name));
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

pub async fn add_patient_to_list(ctx: &CommandContext, payload: &CohortMemberPayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.add_cohort_member(payload).await {
        Ok(_) => {
            // Both the member table and the list overview (member counts).
            ctx.cache.mutate(&keys::cohort_members(&payload.cohort)).await;
            ctx.cache.mutate(keys::PATIENT_LISTS).await;
            ctx.notifier.success("Patient added to list");
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}
