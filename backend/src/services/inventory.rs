//! Item registries: CRUD for hardware, network devices and general inventory
//! with the status rules that keep items consistent with the assignment
//! ledger.

use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        activity_log::{ActivityAction, ActivityLogEntry},
        actor::Actor,
        assignment::Assignment,
        item::{InventoryItem, ItemStatus},
    },
    repositories::{
        begin_transaction, commit_transaction, AssignmentRepository, ItemRepository,
    },
    services::activity_log::ActivityLogServiceTrait,
    state::AppState,
};

/// Status an item may be created with. `assigned` only ever comes from the
/// ledger.
pub fn initial_status(requested: Option<ItemStatus>) -> Result<ItemStatus, AppError> {
    match requested {
        Some(ItemStatus::Assigned) => Err(AppError::BadRequest(
            "Items cannot be created as assigned; create an assignment instead".into(),
        )),
        Some(status) => Ok(status),
        None => Ok(ItemStatus::InStock),
    }
}

/// Checks a status edit made through the registry rather than the ledger.
pub fn check_status_change(
    current: ItemStatus,
    next: ItemStatus,
    has_active_assignment: bool,
) -> Result<(), AppError> {
    if current == next {
        return Ok(());
    }
    if next == ItemStatus::Assigned {
        return Err(AppError::Conflict(
            "Status 'assigned' is set by creating an assignment".into(),
        ));
    }
    if current == ItemStatus::Assigned && has_active_assignment {
        return Err(AppError::Conflict(
            "Item has an active assignment; return it before changing the status".into(),
        ));
    }
    Ok(())
}

pub struct InventoryService<T, R> {
    repo: R,
    assignments: AssignmentRepository,
    write_pool: PgPool,
    read_pool: PgPool,
    activity_log: Arc<dyn ActivityLogServiceTrait>,
    _item: PhantomData<fn() -> T>,
}

impl<T, R> InventoryService<T, R>
where
    T: InventoryItem,
    R: ItemRepository<T>,
{
    pub fn new(state: &AppState, repo: R) -> Self {
        Self {
            repo,
            assignments: AssignmentRepository::new(),
            write_pool: state.write_pool.clone(),
            read_pool: state.read_pool().clone(),
            activity_log: state.activity_log.clone(),
            _item: PhantomData,
        }
    }

    pub async fn list(&self, status: Option<ItemStatus>) -> Result<Vec<T>, AppError> {
        match status {
            Some(status) => self.repo.find_by_status(&self.read_pool, status).await,
            None => self.repo.find_all(&self.read_pool).await,
        }
    }

    pub async fn get(&self, id: R::Id) -> Result<T, AppError> {
        self.repo.find_by_id(&self.read_pool, id).await
    }

    /// Every assignment that ever referenced the item, newest first.
    pub async fn history(&self, id: R::Id) -> Result<Vec<Assignment>, AppError> {
        self.repo.find_by_id(&self.read_pool, id).await?;
        self.assignments
            .find_for_item(&self.read_pool, R::item_ref(id))
            .await
    }

    pub async fn create(&self, actor: &Actor, payload: T::Create) -> Result<T, AppError> {
        initial_status(T::create_status(&payload))?;

        let mut tx = begin_transaction(&self.write_pool).await?;
        let created = self.repo.create(&mut tx, &payload).await?;
        commit_transaction(tx).await?;

        let item = created.item_ref();
        self.activity_log
            .record(vec![ActivityLogEntry::new(
                actor,
                ActivityAction::Add,
                item.kind().as_str(),
                Some(item.raw_id()),
                format!("Created {} '{}'", item, created.name()),
            )])
            .await;
        Ok(created)
    }

    pub async fn update(&self, actor: &Actor, id: R::Id, patch: T::Update) -> Result<T, AppError> {
        let requested = T::patch_status(&patch);

        let mut tx = begin_transaction(&self.write_pool).await?;
        let mut current = self.repo.lock_by_id(&mut tx, id).await?;
        let item = current.item_ref();
        let before = current.status();

        if let Some(next) = requested.filter(|next| *next != before) {
            let has_active = self.assignments.has_active_for_item(&mut tx, item).await?;
            check_status_change(before, next, has_active)?;
            current.set_status(next);
        }
        current.apply_patch(patch);

        let updated = self.repo.update(&mut tx, &current).await?;
        commit_transaction(tx).await?;

        let details = if updated.status() == before {
            format!("Updated {} '{}'", item, updated.name())
        } else {
            format!(
                "Updated {} '{}' (status {} -> {})",
                item,
                updated.name(),
                before,
                updated.status()
            )
        };
        self.activity_log
            .record(vec![ActivityLogEntry::new(
                actor,
                ActivityAction::Update,
                item.kind().as_str(),
                Some(item.raw_id()),
                details,
            )])
            .await;
        Ok(updated)
    }

    /// Deletes an item that no assignment references. Assignment history is
    /// only removed through the ledger, one logged delete at a time.
    pub async fn delete(&self, actor: &Actor, id: R::Id) -> Result<(), AppError> {
        let mut tx = begin_transaction(&self.write_pool).await?;
        let current = self.repo.lock_by_id(&mut tx, id).await?;
        let item = current.item_ref();

        if let Some(open) = self.assignments.find_open_for_item(&mut tx, item).await? {
            return Err(AppError::Conflict(format!(
                "{} has an open assignment (#{}); return or delete it first",
                item, open.id
            )));
        }
        let history = self.assignments.count_for_item(&mut tx, item).await?;
        if history > 0 {
            return Err(AppError::Conflict(format!(
                "{} still has {} recorded assignment(s); delete them first or retire the item",
                item, history
            )));
        }
        self.repo.delete(&mut tx, id).await?;
        commit_transaction(tx).await?;

        self.activity_log
            .record(vec![ActivityLogEntry::new(
                actor,
                ActivityAction::Delete,
                item.kind().as_str(),
                Some(item.raw_id()),
                format!("Deleted {} '{}'", item, current.name()),
            )])
            .await;
        Ok(())
    }
}
