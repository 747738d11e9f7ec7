//! Status reads and writes addressed by [`ItemRef`], used by the ledger and
//! the reconciliation job where the concrete registry is only known at run
//! time.

use sqlx::{PgConnection, PgPool};

use crate::error::AppError;
use crate::models::dashboard::StatusCountRow;
use crate::models::item::{ItemKind, ItemRef, ItemStatus, LockedItem, StatusDrift};

/// Locks the item row and returns its name and status, or `None` if the
/// item does not exist.
pub async fn lock_item(
    conn: &mut PgConnection,
    item: ItemRef,
) -> Result<Option<LockedItem>, AppError> {
    let query = format!(
        "SELECT name, status FROM {} WHERE id = $1 FOR UPDATE",
        item.kind().table()
    );
    let row = sqlx::query_as::<_, LockedItem>(&query)
        .bind(item.raw_id())
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn set_item_status(
    conn: &mut PgConnection,
    item: ItemRef,
    status: ItemStatus,
) -> Result<(), AppError> {
    let query = format!(
        "UPDATE {} SET status = $2, last_updated = NOW() WHERE id = $1",
        item.kind().table()
    );
    let result = sqlx::query(&query)
        .bind(item.raw_id())
        .bind(status)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} not found", item)));
    }
    Ok(())
}

fn drift_select(kind: ItemKind, lock: bool) -> String {
    let has_active = format!(
        "EXISTS (SELECT 1 FROM assignments a WHERE a.{} = i.id AND a.status = 'active')",
        kind.assignment_column()
    );
    let mut select = format!(
        "SELECT '{kind}'::text AS item_type, i.id AS item_id, i.name, \
         i.status AS recorded_status, {has_active} AS has_active_assignment \
         FROM {table} i WHERE (i.status = 'assigned') <> {has_active}",
        kind = kind.as_str(),
        table = kind.table(),
        has_active = has_active,
    );
    if lock {
        select.push_str(" ORDER BY i.id FOR UPDATE OF i");
    }
    select
}

/// Items whose status disagrees with the presence of an active assignment.
pub async fn find_status_drift(db: &PgPool) -> Result<Vec<StatusDrift>, AppError> {
    let query = format!(
        "{} ORDER BY item_type, item_id",
        ItemKind::ALL
            .iter()
            .map(|kind| drift_select(*kind, false))
            .collect::<Vec<_>>()
            .join(" UNION ALL ")
    );
    let rows = sqlx::query_as::<_, StatusDrift>(&query)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Same as [`find_status_drift`] but locks the drifted rows for repair.
/// Row locks cannot be taken through a `UNION`, so each registry is read
/// on its own.
pub async fn lock_status_drift(conn: &mut PgConnection) -> Result<Vec<StatusDrift>, AppError> {
    let mut drifted = Vec::new();
    for kind in ItemKind::ALL {
        let rows = sqlx::query_as::<_, StatusDrift>(&drift_select(*kind, true))
            .fetch_all(&mut *conn)
            .await?;
        drifted.extend(rows);
    }
    Ok(drifted)
}

pub async fn status_counts(db: &PgPool) -> Result<Vec<StatusCountRow>, AppError> {
    let query = ItemKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "SELECT '{}'::text AS item_type, status, COUNT(*) AS total FROM {} GROUP BY status",
                kind.as_str(),
                kind.table()
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL ");
    let rows = sqlx::query_as::<_, StatusCountRow>(&query)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count_rows(db: &PgPool, table: &str) -> Result<i64, AppError> {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    let count = sqlx::query_scalar::<_, i64>(&query).fetch_one(db).await?;
    Ok(count)
}
