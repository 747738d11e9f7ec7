//! Detects and repairs items whose status disagrees with the ledger.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{activity_log::ActivityLogEntry, actor::Actor, item::StatusDrift},
    repositories::{begin_transaction, commit_transaction, item_status},
    services::activity_log::ActivityLogServiceTrait,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationReport {
    pub drifted: Vec<StatusDrift>,
    /// True when the drifted rows were rewritten.
    pub repaired: bool,
}

/// Lists drifted items without changing anything.
pub async fn check(pool: &PgPool) -> Result<ReconciliationReport, AppError> {
    let drifted = item_status::find_status_drift(pool).await?;
    if !drifted.is_empty() {
        tracing::warn!(count = drifted.len(), "item status drift detected");
    }
    Ok(ReconciliationReport {
        drifted,
        repaired: false,
    })
}

/// Rewrites every drifted status to what the ledger implies, in one
/// transaction, and logs one `update` entry per repaired item.
pub async fn repair(
    pool: &PgPool,
    activity_log: &dyn ActivityLogServiceTrait,
    actor: &Actor,
) -> Result<ReconciliationReport, AppError> {
    let mut tx = begin_transaction(pool).await?;
    let drifted = item_status::lock_status_drift(&mut tx).await?;

    let mut entries = Vec::with_capacity(drifted.len());
    for drift in &drifted {
        let expected = drift.expected_status();
        item_status::set_item_status(&mut tx, drift.item(), expected).await?;
        entries.push(ActivityLogEntry::item_status(
            actor,
            drift.item(),
            drift.recorded_status,
            expected,
            "status reconciliation",
        ));
    }
    commit_transaction(tx).await?;

    if !drifted.is_empty() {
        tracing::warn!(
            count = drifted.len(),
            actor_id = %actor.id,
            "repaired item status drift"
        );
    }
    activity_log.record(entries).await;
    Ok(ReconciliationReport {
        drifted,
        repaired: true,
    })
}
