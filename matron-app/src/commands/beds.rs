//! Bed administration commands.

use matron_client::{BedPayload, BedTagPayload, BedTypePayload};

use super::CommandContext;
use crate::keys;

/// Create a bed and attach tags to it.
///
/// This is a two-phase saga: the bed write, then one `bedTagMap` write per
/// tag. When a mapping write fails, the mappings already created in this saga
/// are compensated (deleted) and the bed itself is voided, so a failed save
/// leaves no half-tagged bed behind. Returns true when fully applied.
pub async fn create_bed(ctx: &CommandContext, payload: &BedPayload, tag_uuids: &[String]) -> bool {
    let _busy = ctx.begin();

    let bed = match ctx.client.create_bed(payload).await {
        Ok(bed) => bed,
        Err(e) => {
            ctx.fail(&e);
            return false;
        }
    };

    let bed_uuid = bed.uuid.unwrap_or_default();
    let mut created_maps: Vec<String> = Vec::new();

    for tag_uuid in tag_uuids {
        match ctx.client.create_bed_tag_map(&bed_uuid, tag_uuid).await {
            Ok(map) => {
                if let Some(uuid) = map.uuid {
                    created_maps.push(uuid);
                }
            }
            Err(e) => {
                compensate(ctx, &bed_uuid, &created_maps).await;
                ctx.fail(&e);
                return false;
            }
        }
    }

    ctx.cache.mutate(keys::BEDS).await;
    ctx.notifier
        .success(format!("Bed {} created", payload.bed_number));
    true
}

/// Roll back a partially applied bed save: delete the tag mappings created so
/// far, then void the bed.
async fn compensate(ctx: &CommandContext, bed_uuid: &str, created_maps: &[String]) {
    for map_uuid in created_maps {
        if let Err(e) = ctx.client.delete_bed_tag_map(map_uuid).await {
            tracing::warn!(map_uuid, error = %e, "Compensation failed for bed tag mapping");
        }
    }
    if let Err(e) = ctx.client.delete_bed(bed_uuid, "bed tag mapping failed").await {
        tracing::warn!(bed_uuid, error = %e, "Compensation failed for bed");
    }
}

pub async fn update_bed(ctx: &CommandContext, uuid: &str, payload: &BedPayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.update_bed(uuid, payload).await {
        Ok(_) => {
            ctx.cache.mutate(keys::BEDS).await;
            ctx.notifier
                .success(format!("Bed {} updated", payload.bed_number));
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

/// Void a bed. The delete endpoint requires a non-empty reason; an empty one
/// is rejected client-side without a request.
pub async fn delete_bed(ctx: &CommandContext, uuid: &str, reason: &str) -> bool {
    let _busy = ctx.begin();

    match ctx.client.delete_bed(uuid, reason).await {
        Ok(()) => {
            ctx.cache.mutate(keys::BEDS).await;
            ctx.notifier.success("Bed deleted");
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

pub async fn create_bed_type(ctx: &CommandContext, payload: &BedTypePayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.create_bed_type(payload).await {
        Ok(_) => {
            ctx.cache.mutate(keys::BED_TYPES).await;
            ctx.notifier
                .success(format!("Bed type {} created", payload.display_name));
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}

pub async fn create_bed_tag(ctx: &CommandContext, payload: &BedTagPayload) -> bool {
    let _busy = ctx.begin();

    match ctx.client.create_bed_tag(payload).await {
        Ok(_) => {
            ctx.cache.mutate(keys::BED_TAGS).await;
            ctx.notifier
                .success(format!("Bed tag {} created", payload.name));
            true
        }
        Err(e) => {
            ctx.fail(&e);
            false
        }
    }
}
