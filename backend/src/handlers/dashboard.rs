use axum::{
    extract::{Extension, State},
    Json,
};

use crate::{
    error::AppError,
    models::{
        actor::{Actor, Permission},
        dashboard::DashboardStats,
    },
    services::dashboard,
    state::AppState,
};

pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<DashboardStats>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let stats = dashboard::stats(state.read_pool(), state.activity_log.as_ref()).await?;
    Ok(Json(stats))
}
