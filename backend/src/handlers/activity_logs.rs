use axum::{
    extract::{rejection::QueryRejection, Extension, Query, State},
    Json,
};

use crate::{
    error::AppError,
    models::{
        activity_log::{ActivityLog, ActivityLogQuery},
        actor::{Actor, Permission},
    },
    repositories::activity_log::ActivityLogFilters,
    state::AppState,
};

const MAX_LIMIT: i64 = 500;

/// Newest entries first, optionally narrowed to one entity type or record.
pub async fn list_activity_logs(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    query: Result<Query<ActivityLogQuery>, QueryRejection>,
) -> Result<Json<Vec<ActivityLog>>, AppError> {
    actor.require(Permission::ReadInventory)?;
    let Query(query) = query?;
    let (filters, limit) = resolve_query(query, state.config.activity_log_default_limit)?;
    let logs = state.activity_log.list(&filters, limit).await?;
    Ok(Json(logs))
}

fn resolve_query(
    query: ActivityLogQuery,
    default_limit: i64,
) -> Result<(ActivityLogFilters, i64), AppError> {
    let item_type = query
        .item_type
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if query.item_id.is_some() && item_type.is_none() {
        return Err(AppError::BadRequest("item_id requires item_type".into()));
    }
    let limit = query.limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT);
    Ok((
        ActivityLogFilters {
            item_type,
            item_id: query.item_id,
        },
        limit,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        let (_, limit) = resolve_query(ActivityLogQuery::default(), 50).expect("query");
        assert_eq!(limit, 50);

        let query = ActivityLogQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(resolve_query(query, 50).expect("query").1, 500);

        let query = ActivityLogQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve_query(query, 50).expect("query").1, 1);
    }

    #[test]
    fn item_id_needs_item_type() {
        let query = ActivityLogQuery {
            item_id: Some(4),
            item_type: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_query(query, 50),
            Err(AppError::BadRequest(_))
        ));

        let query = ActivityLogQuery {
            item_id: Some(4),
            item_type: Some("hardware".into()),
            ..Default::default()
        };
        let (filters, _) = resolve_query(query, 50).expect("query");
        assert_eq!(filters.item_type.as_deref(), Some("hardware"));
        assert_eq!(filters.item_id, Some(4));
    }
}
