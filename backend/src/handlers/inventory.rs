//! Handlers shared by the three assignable registries. Each registry is
//! mounted with its own model, e.g. `get(list_items::<Hardware>)`.

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
        assignment::AssignmentResponse,
        general_inventory::GeneralInventoryItem,
        hardware::Hardware,
        item::InventoryItem,
        network_device::NetworkDevice,
    },
    repositories::{
        GeneralInventoryRepository, HardwareRepository, ItemRepository, NetworkDeviceRepository,
        Repository,
    },
    services::inventory::InventoryService,
    state::AppState,
};

use super::common::{parse_id, validate_input, ItemListQuery};

/// Binds a registry model to its repository and path label.
pub trait InventoryResource: InventoryItem + Sized {
    type Repo: ItemRepository<Self> + Default + Send + Sync + 'static;
    const LABEL: &'static str;
}

impl InventoryResource for Hardware {
    type Repo = HardwareRepository;
    const LABEL: &'static str = "hardware";
}

impl InventoryResource for NetworkDevice {
    type Repo = NetworkDeviceRepository;
    const LABEL: &'static str = "network device";
}

impl InventoryResource for GeneralInventoryItem {
    type Repo = GeneralInventoryRepository;
    const LABEL: &'static str = "inventory item";
}

type ItemId<T> = <<T as InventoryResource>::Repo as Repository<T>>::Id;

fn service<T: InventoryResource>(state: &AppState) -> InventoryService<T, T::Repo> {
    InventoryService::new(state, T::Repo::default())
}

pub async fn list_items<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    query: Result<Query<ItemListQuery>, QueryRejection>,
) -> Result<Json<Vec<T>>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let Query(query) = query?;
    let items = service::<T>(&state).list(query.status).await?;
    Ok(Json(items))
}

pub async fn get_item<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let id: ItemId<T> = parse_id(&id, T::LABEL)?;
    let item = service::<T>(&state).get(id).await?;
    Ok(Json(item))
}

pub async fn create_item<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<T::Create>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), AppError> {
    actor.require(Permission::WriteInventory)?;
    let Json(payload) = payload?;
    validate_input(&payload)?;
    let created = service::<T>(&state)
        .create(&actor, T::normalize(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_item<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<T::Update>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: ItemId<T> = parse_id(&id, T::LABEL)?;
    let Json(patch) = payload?;
    validate_input(&patch)?;
    let updated = service::<T>(&state).update(&actor, id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_item<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    actor.require(Permission::WriteInventory)?;
    let id: ItemId<T> = parse_id(&id, T::LABEL)?;
    service::<T>(&state).delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/{registry}/{id}/assignments`
pub async fn item_assignments<T: InventoryResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let id: ItemId<T> = parse_id(&id, T::LABEL)?;
    let history = service::<T>(&state).history(id).await?;
    Ok(Json(
        history
            .into_iter()
            .map(AssignmentResponse::from)
            .collect::<Vec<_>>(),
    ))
}
