use axum::{
    extract::{Extension, State},
    Json,
};

use crate::{
    error::AppError,
    models::actor::{Actor, Permission},
    services::reconciliation::{self, ReconciliationReport},
    state::AppState,
};

/// `GET /api/admin/reconciliation`
pub async fn status_drift_report(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ReconciliationReport>, AppError> {
    actor.require(Permission::Administer)?;
    // drift must be measured against the primary, not a lagging replica
    let report = reconciliation::check(&state.write_pool).await?;
    Ok(Json(report))
}

/// `POST /api/admin/reconciliation`
pub async fn repair_status_drift(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ReconciliationReport>, AppError> {
    actor.require(Permission::Administer)?;
    let report =
        reconciliation::repair(&state.write_pool, state.activity_log.as_ref(), &actor).await?;
    tracing::info!(
        repaired = report.drifted.len(),
        actor_id = %actor.id,
        "status reconciliation requested"
    );
    Ok(Json(report))
}
