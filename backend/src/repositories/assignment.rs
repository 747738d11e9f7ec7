//! Assignment ledger repository.
//!
//! Rows keep three nullable item columns; everything above this module sees
//! an [`ItemRef`] instead.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::assignment::{
    Assignment, AssignmentFilter, AssignmentRow, AssignmentStatus, NewAssignment,
};
use crate::models::item::ItemRef;
use crate::repositories::common::push_clause;
use crate::repositories::repository::{not_found, Repository};
use crate::types::AssignmentId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

const TABLE_NAME: &str = "assignments";
const SELECT_COLUMNS: &str = "id, hardware_id, network_device_id, general_inventory_id, \
     assigned_to, department, assignment_date, return_date, status, notes, last_updated";
const OPEN_STATUSES: &str = "('active', 'pending')";

#[derive(Debug, Default, Clone, Copy)]
pub struct AssignmentRepository;

fn into_assignment(row: AssignmentRow) -> Result<Assignment, AppError> {
    let id = row.id;
    Assignment::try_from(row).map_err(|e| {
        AppError::InternalServerError(anyhow::anyhow!("assignment {} is malformed: {}", id, e))
    })
}

fn into_assignments(rows: Vec<AssignmentRow>) -> Result<Vec<Assignment>, AppError> {
    rows.into_iter().map(into_assignment).collect()
}

impl AssignmentRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }

    /// Lists assignments newest first, optionally filtered.
    pub async fn find_filtered(
        &self,
        db: &PgPool,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(Self::base_select_query());
        let mut has_clause = false;
        if let Some(status) = filter.status {
            push_clause(&mut builder, &mut has_clause);
            builder.push("status = ").push_bind(status);
        }
        if let Some(kind) = filter.item_type {
            push_clause(&mut builder, &mut has_clause);
            match filter.item_id {
                Some(item_id) => {
                    builder
                        .push(kind.assignment_column())
                        .push(" = ")
                        .push_bind(item_id);
                }
                None => {
                    builder.push(kind.assignment_column()).push(" IS NOT NULL");
                }
            }
        }
        if let Some(assigned_to) = filter.assigned_to.as_ref() {
            push_clause(&mut builder, &mut has_clause);
            builder
                .push("assigned_to ILIKE ")
                .push_bind(format!("%{}%", assigned_to.trim()));
        }
        builder.push(" ORDER BY assignment_date DESC, id DESC");

        let rows = builder
            .build_query_as::<AssignmentRow>()
            .fetch_all(db)
            .await?;
        into_assignments(rows)
    }

    /// Full history of one item, newest first.
    pub async fn find_for_item(
        &self,
        db: &PgPool,
        item: ItemRef,
    ) -> Result<Vec<Assignment>, AppError> {
        let query = format!(
            "{} WHERE {} = $1 ORDER BY assignment_date DESC, id DESC",
            Self::base_select_query(),
            item.kind().assignment_column()
        );
        let rows = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(item.raw_id())
            .fetch_all(db)
            .await?;
        into_assignments(rows)
    }

    /// The active or pending assignment of an item, if any. Callers hold the
    /// item's row lock.
    pub async fn find_open_for_item(
        &self,
        conn: &mut PgConnection,
        item: ItemRef,
    ) -> Result<Option<Assignment>, AppError> {
        let query = format!(
            "{} WHERE {} = $1 AND status IN {} LIMIT 1",
            Self::base_select_query(),
            item.kind().assignment_column(),
            OPEN_STATUSES
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(item.raw_id())
            .fetch_optional(conn)
            .await?;
        row.map(into_assignment).transpose()
    }

    pub async fn has_active_for_item(
        &self,
        conn: &mut PgConnection,
        item: ItemRef,
    ) -> Result<bool, AppError> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1 AND status = $2)",
            TABLE_NAME,
            item.kind().assignment_column()
        );
        let exists = sqlx::query_scalar::<_, bool>(&query)
            .bind(item.raw_id())
            .bind(AssignmentStatus::Active)
            .fetch_one(conn)
            .await?;
        Ok(exists)
    }

    /// Number of assignments of any status that reference the item.
    pub async fn count_for_item(
        &self,
        conn: &mut PgConnection,
        item: ItemRef,
    ) -> Result<i64, AppError> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            TABLE_NAME,
            item.kind().assignment_column()
        );
        let count = sqlx::query_scalar::<_, i64>(&query)
            .bind(item.raw_id())
            .fetch_one(conn)
            .await?;
        Ok(count)
    }

    pub async fn count_open(&self, db: &PgPool) -> Result<i64, AppError> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE status IN {}",
            TABLE_NAME, OPEN_STATUSES
        );
        let count = sqlx::query_scalar::<_, i64>(&query).fetch_one(db).await?;
        Ok(count)
    }
}

#[async_trait]
impl Repository<Assignment> for AssignmentRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = AssignmentId;
    type New = NewAssignment;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Assignment>, AppError> {
        self.find_filtered(db, &AssignmentFilter::default()).await
    }

    async fn find_by_id(&self, db: &PgPool, id: AssignmentId) -> Result<Assignment, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found("Assignment"))?;
        into_assignment(row)
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: AssignmentId,
    ) -> Result<Assignment, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Assignment"))?;
        into_assignment(row)
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        item: &NewAssignment,
    ) -> Result<Assignment, AppError> {
        let query = format!(
            "INSERT INTO {} (hardware_id, network_device_id, general_inventory_id, assigned_to, \
             department, assignment_date, status, notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(item.item.hardware_id())
            .bind(item.item.network_device_id())
            .bind(item.item.general_inventory_id())
            .bind(&item.assigned_to)
            .bind(&item.department)
            .bind(item.assignment_date)
            .bind(item.status)
            .bind(&item.notes)
            .fetch_one(conn)
            .await?;
        into_assignment(row)
    }

    /// Writes everything except the item reference, which never changes.
    async fn update(
        &self,
        conn: &mut PgConnection,
        item: &Assignment,
    ) -> Result<Assignment, AppError> {
        let query = format!(
            "UPDATE {} SET assigned_to = $2, department = $3, assignment_date = $4, \
             return_date = $5, status = $6, notes = $7, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(item.id)
            .bind(&item.assigned_to)
            .bind(&item.department)
            .bind(item.assignment_date)
            .bind(item.return_date)
            .bind(item.status)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Assignment"))?;
        into_assignment(row)
    }

    async fn delete(&self, conn: &mut PgConnection, id: AssignmentId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Assignment"));
        }
        Ok(())
    }
}
