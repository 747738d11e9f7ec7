use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{
        actor::{Actor, Permission},
        assignment::{AssignmentFilter, AssignmentResponse, CreateAssignment, UpdateAssignment},
    },
    services::assignment::AssignmentLedger,
    state::AppState,
    types::AssignmentId,
};

use super::common::{parse_id, validate_input};

const LABEL: &str = "assignment";

pub async fn list_assignments(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    query: Result<Query<AssignmentFilter>, QueryRejection>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let Query(filter) = query?;
    if filter.item_id.is_some() && filter.item_type.is_none() {
        return Err(AppError::BadRequest(
            "item_id requires item_type".into(),
        ));
    }
    let assignments = AssignmentLedger::new(&state).list(&filter).await?;
    Ok(Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_assignment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<AssignmentResponse>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let id: AssignmentId = parse_id(&id, LABEL)?;
    let assignment = AssignmentLedger::new(&state).get(id).await?;
    Ok(Json(assignment.into()))
}

pub async fn create_assignment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateAssignment>, JsonRejection>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    actor.require(Permission::WriteInventory)?;
    let Json(payload) = payload?;
    validate_input(&payload)?;
    let created = AssignmentLedger::new(&state)
        .create(&actor, payload.normalized())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAssignment>, JsonRejection>,
) -> Result<Json<AssignmentResponse>, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: AssignmentId = parse_id(&id, LABEL)?;
    let Json(patch) = payload?;
    validate_input(&patch)?;
    let updated = AssignmentLedger::new(&state)
        .update(&actor, id, patch)
        .await?;
    Ok(Json(updated.into()))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: AssignmentId = parse_id(&id, LABEL)?;
    AssignmentLedger::new(&state).delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/assignments/{id}/return`
pub async fn return_assignment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<AssignmentResponse>, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: AssignmentId = parse_id(&id, LABEL)?;
    let returned = AssignmentLedger::new(&state)
        .return_item(&actor, id)
        .await?;
    Ok(Json(returned.into()))
}
