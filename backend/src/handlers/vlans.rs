use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{
        actor::{Actor, Permission},
        vlan::{CreateVlan, UpdateVlan, Vlan},
    },
    repositories::VlanRepository,
    services::records::RecordService,
    state::AppState,
    types::VlanId,
};

use super::common::{parse_id, validate_input};

fn service(state: &AppState) -> RecordService<Vlan, VlanRepository> {
    RecordService::new(state, VlanRepository::new())
}

pub async fn list_vlans(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Vlan>>, AppError> {
    actor.require(Permission::ReadInventory)?;
    Ok(Json(service(&state).list().await?))
}

pub async fn get_vlan(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Vlan>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let id: VlanId = parse_id(&id, "VLAN")?;
    Ok(Json(service(&state).get(id).await?))
}

pub async fn create_vlan(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateVlan>, JsonRejection>,
) -> Result<(StatusCode, Json<Vlan>), AppError> {
    actor.require(Permission::WriteInventory)?;
    let Json(payload) = payload?;
    validate_input(&payload)?;
    let created = service(&state)
        .create(&actor, payload.normalized())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vlan(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateVlan>, JsonRejection>,
) -> Result<Json<Vlan>, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: VlanId = parse_id(&id, "VLAN")?;
    let Json(patch) = payload?;
    validate_input(&patch)?;
    Ok(Json(service(&state).update(&actor, id, patch).await?))
}

pub async fn delete_vlan(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: VlanId = parse_id(&id, "VLAN")?;
    service(&state).delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
