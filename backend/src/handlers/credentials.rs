//! Credential endpoints. Every route needs `ManageCredentials`; only the
//! single-record read returns the stored password.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{
        actor::{Actor, Permission},
        credential::{CreateCredential, Credential, CredentialSummary, UpdateCredential},
    },
    repositories::CredentialRepository,
    services::records::RecordService,
    state::AppState,
    types::CredentialId,
};

use super::common::{parse_id, validate_input};

fn service(state: &AppState) -> RecordService<Credential, CredentialRepository> {
    RecordService::new(state, CredentialRepository::new())
}

pub async fn list_credentials(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<CredentialSummary>>, AppError> {
    actor.require(Permission::ManageCredentials)?;
    let credentials = service(&state).list().await?;
    Ok(Json(
        credentials
            .into_iter()
            .map(CredentialSummary::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_credential(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Credential>, AppError> {
    actor.require(Permission::ManageCredentials)?;
    let id: CredentialId = parse_id(&id, "credential")?;
    Ok(Json(service(&state).get(id).await?))
}

pub async fn create_credential(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateCredential>, JsonRejection>,
) -> Result<(StatusCode, Json<CredentialSummary>), AppError> {
    actor.require(Permission::ManageCredentials)?;
    let Json(payload) = payload?;
    validate_input(&payload)?;
    let created = service(&state)
        .create(&actor, payload.normalized())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_credential(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCredential>, JsonRejection>,
) -> Result<Json<CredentialSummary>, AppError> {
    actor.require(Permission::ManageCredentials)?;
    let id: CredentialId = parse_id(&id, "credential")?;
    let Json(patch) = payload?;
    validate_input(&patch)?;
    let updated = service(&state).update(&actor, id, patch).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_credential(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    actor.require(Permission::ManageCredentials)?;
    let id: CredentialId = parse_id(&id, "credential")?;
    service(&state).delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
