use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::activity_log::{ActivityLog, ActivityLogEntry};
use crate::repositories::common::push_clause;

const SELECT_COLUMNS: &str = "id, user_id, action, item_type, item_id, details, timestamp";

#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilters {
    pub item_type: Option<String>,
    pub item_id: Option<i64>,
}

pub async fn insert_activity_log(
    pool: &PgPool,
    entry: &ActivityLogEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO activity_logs (user_id, action, item_type, item_id, details, timestamp) \
         VALUES ($1, $2, $3, $4, $5, NOW())",
    )
    .bind(&entry.user_id)
    .bind(entry.action)
    .bind(&entry.item_type)
    .bind(entry.item_id)
    .bind(&entry.details)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Newest entries first.
pub async fn list_activity_logs(
    pool: &PgPool,
    filters: &ActivityLogFilters,
    limit: i64,
) -> Result<Vec<ActivityLog>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM activity_logs", SELECT_COLUMNS));
    let mut has_clause = false;
    if let Some(item_type) = filters.item_type.as_ref() {
        push_clause(&mut builder, &mut has_clause);
        builder.push("item_type = ").push_bind(item_type.clone());
    }
    if let Some(item_id) = filters.item_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("item_id = ").push_bind(item_id);
    }
    builder
        .push(" ORDER BY timestamp DESC, id DESC LIMIT ")
        .push_bind(limit);

    builder.build_query_as::<ActivityLog>().fetch_all(pool).await
}
