//! Assignment ledger.
//!
//! Every operation runs in one transaction that locks the referenced item
//! row first and the assignment row second, so the assignment write and the
//! item status write commit or roll back together. Activity entries are
//! recorded after the commit.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        activity_log::{entity, ActivityAction, ActivityLogEntry},
        actor::Actor,
        assignment::{
            Assignment, AssignmentFilter, AssignmentStatus, CreateAssignment, NewAssignment,
            UpdateAssignment,
        },
        item::{ItemRef, ItemStatus, LockedItem},
    },
    repositories::{
        begin_transaction, commit_transaction, item_status, AssignmentRepository, Repository,
    },
    services::activity_log::ActivityLogServiceTrait,
    state::AppState,
    types::AssignmentId,
};

#[derive(Clone)]
pub struct AssignmentLedger {
    repo: AssignmentRepository,
    write_pool: PgPool,
    read_pool: PgPool,
    activity_log: Arc<dyn ActivityLogServiceTrait>,
}

impl AssignmentLedger {
    pub fn new(state: &AppState) -> Self {
        Self {
            repo: AssignmentRepository::new(),
            write_pool: state.write_pool.clone(),
            read_pool: state.read_pool().clone(),
            activity_log: state.activity_log.clone(),
        }
    }

    pub async fn list(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, AppError> {
        self.repo.find_filtered(&self.read_pool, filter).await
    }

    pub async fn get(&self, id: AssignmentId) -> Result<Assignment, AppError> {
        self.repo.find_by_id(&self.read_pool, id).await
    }

    /// Opens an assignment against an in-stock item.
    pub async fn create(
        &self,
        actor: &Actor,
        payload: CreateAssignment,
    ) -> Result<Assignment, AppError> {
        let item = payload
            .item()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let status = payload.status.unwrap_or(AssignmentStatus::Active);
        if !status.is_open() {
            return Err(AppError::BadRequest(
                "New assignments must be active or pending".into(),
            ));
        }

        let mut tx = begin_transaction(&self.write_pool).await?;
        let locked = lock_existing_item(&mut tx, item).await?;
        if locked.status != ItemStatus::InStock {
            return Err(AppError::Conflict(format!(
                "{} '{}' is {} and cannot be assigned",
                item, locked.name, locked.status
            )));
        }
        if let Some(open) = self.repo.find_open_for_item(&mut tx, item).await? {
            return Err(AppError::Conflict(format!(
                "{} already has an open assignment (#{})",
                item, open.id
            )));
        }

        let new = NewAssignment {
            item,
            assigned_to: payload.assigned_to,
            department: payload.department,
            assignment_date: payload.assignment_date.unwrap_or_else(Utc::now),
            status,
            notes: payload.notes,
        };
        let created = self.repo.create(&mut tx, &new).await?;

        let verb = if status.holds_item() {
            "Assigned"
        } else {
            "Reserved"
        };
        let mut entries = vec![ActivityLogEntry::new(
            actor,
            ActivityAction::Assign,
            entity::ASSIGNMENT,
            Some(created.id.get()),
            format!(
                "{} {} '{}' to {}",
                verb, item, locked.name, created.assigned_to
            ),
        )];
        if status.holds_item() {
            item_status::set_item_status(&mut tx, item, ItemStatus::Assigned).await?;
            entries.push(ActivityLogEntry::item_status(
                actor,
                item,
                locked.status,
                ItemStatus::Assigned,
                &format!("assignment #{}", created.id),
            ));
        }
        commit_transaction(tx).await?;

        tracing::info!(
            assignment_id = %created.id,
            item = %item,
            status = %created.status,
            actor_id = %actor.id,
            "assignment created"
        );
        self.activity_log.record(entries).await;
        Ok(created)
    }

    /// Patches an assignment and applies the item status effect of its
    /// status change, if any.
    pub async fn update(
        &self,
        actor: &Actor,
        id: AssignmentId,
        patch: UpdateAssignment,
    ) -> Result<Assignment, AppError> {
        // item reference is immutable, so it is safe to read before locking
        let item = self.repo.find_by_id(&self.write_pool, id).await?.item;

        let mut tx = begin_transaction(&self.write_pool).await?;
        let locked = item_status::lock_item(&mut tx, item).await?;
        let mut current = self.repo.lock_by_id(&mut tx, id).await?;

        match patch.item() {
            Some(Err(e)) => return Err(AppError::BadRequest(e.to_string())),
            Some(Ok(requested)) if requested != current.item => {
                return Err(AppError::BadRequest(
                    "The item of an assignment cannot be changed; create a new assignment instead"
                        .into(),
                ));
            }
            _ => {}
        }

        let before = current.status;
        let next = patch.status.unwrap_or(before);
        if patch.status.is_some() {
            before
                .check_transition(next)
                .map_err(|e| AppError::Conflict(e.to_string()))?;
        }
        if next == AssignmentStatus::Returned && patch.clears_return_date() {
            return Err(AppError::BadRequest(
                "A returned assignment keeps its return date".into(),
            ));
        }

        let mut entries = Vec::new();
        if let Some(item_next) = before.item_status_after(next) {
            let locked = locked.ok_or_else(|| AppError::NotFound(format!("{} not found", item)))?;
            if item_next == ItemStatus::Assigned && locked.status != ItemStatus::InStock {
                return Err(AppError::Conflict(format!(
                    "{} '{}' is {} and cannot be assigned",
                    item, locked.name, locked.status
                )));
            }
            item_status::set_item_status(&mut tx, item, item_next).await?;
            entries.push(ActivityLogEntry::item_status(
                actor,
                item,
                locked.status,
                item_next,
                &format!("assignment #{} {}", id, next),
            ));
        }

        current.apply(&patch);
        current.status = next;
        let newly_returned = before != next && next == AssignmentStatus::Returned;
        if newly_returned && current.return_date.is_none() {
            current.return_date = Some(Utc::now());
        }
        let updated = self.repo.update(&mut tx, &current).await?;
        commit_transaction(tx).await?;

        let details = if before == next {
            format!("Updated assignment #{} for {}", id, item)
        } else {
            format!("Assignment #{} for {}: {} -> {}", id, item, before, next)
        };
        entries.insert(
            0,
            ActivityLogEntry::new(
                actor,
                ActivityAction::Update,
                entity::ASSIGNMENT,
                Some(id.get()),
                details,
            ),
        );
        self.activity_log.record(entries).await;
        Ok(updated)
    }

    /// Deletes the assignment; an active one releases its item.
    pub async fn delete(
        &self,
        actor: &Actor,
        id: AssignmentId,
    ) -> Result<(), AppError> {
        let item = self.repo.find_by_id(&self.write_pool, id).await?.item;

        let mut tx = begin_transaction(&self.write_pool).await?;
        let locked = item_status::lock_item(&mut tx, item).await?;
        let current = self.repo.lock_by_id(&mut tx, id).await?;
        self.repo.delete(&mut tx, id).await?;

        let mut entries = vec![ActivityLogEntry::new(
            actor,
            ActivityAction::Delete,
            entity::ASSIGNMENT,
            Some(id.get()),
            format!(
                "Deleted {} assignment #{} for {} ({})",
                current.status, id, item, current.assigned_to
            ),
        )];
        if let (true, Some(locked)) = (current.status.holds_item(), locked) {
            item_status::set_item_status(&mut tx, item, ItemStatus::InStock).await?;
            entries.push(ActivityLogEntry::item_status(
                actor,
                item,
                locked.status,
                ItemStatus::InStock,
                &format!("assignment #{} deleted", id),
            ));
        }
        commit_transaction(tx).await?;

        self.activity_log.record(entries).await;
        Ok(())
    }

    /// Closes an active assignment now. Returning twice is a conflict.
    pub async fn return_item(
        &self,
        actor: &Actor,
        id: AssignmentId,
    ) -> Result<Assignment, AppError> {
        self.update(actor, id, UpdateAssignment::returned_at(Utc::now()))
            .await
    }
}

async fn lock_existing_item(
    conn: &mut sqlx::PgConnection,
    item: ItemRef,
) -> Result<LockedItem, AppError> {
    item_status::lock_item(conn, item)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", item)))
}
