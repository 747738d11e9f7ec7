use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::http::{Method, StatusCode};
use inventory_backend::{
    models::{
        activity_log::{ActivityLog, ActivityLogEntry},
        actor::UserRole,
        item::ItemStatus,
    },
    repositories::activity_log::ActivityLogFilters,
    routes::build_router,
    services::activity_log::ActivityLogServiceTrait,
};
use serde_json::json;
use sqlx::PgPool;

mod support;
use support::{
    activity_logs, hardware_status, id_of, seed_hardware, send, test_app, test_state,
};

struct BrokenRecorder {
    attempts: AtomicUsize,
}

#[async_trait::async_trait]
impl ActivityLogServiceTrait for BrokenRecorder {
    async fn record_event(&self, _entry: ActivityLogEntry) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("activity store unavailable")
    }

    async fn list(
        &self,
        _filters: &ActivityLogFilters,
        _limit: i64,
    ) -> anyhow::Result<Vec<ActivityLog>> {
        Ok(Vec::new())
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn failing_activity_log_never_fails_the_operation(pool: PgPool) {
    let recorder = Arc::new(BrokenRecorder {
        attempts: AtomicUsize::new(0),
    });
    let app = build_router(test_state(&pool).with_activity_log(recorder.clone()));
    let id = seed_hardware(&pool, "Laptop", ItemStatus::InStock).await;

    let (status, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": id, "assigned_to": "Noah" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(hardware_status(&pool, id).await, "assigned");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        &format!("/api/assignments/{}/return", id_of(&created)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hardware_status(&pool, id).await, "in_stock");
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 4);
    assert!(activity_logs(&pool).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn activity_logs_list_newest_first_with_filters(pool: PgPool) {
    let app = test_app(&pool);
    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        let (_, body) = send(
            &app,
            UserRole::Editor,
            Method::POST,
            "/api/hardware",
            Some(json!({ "name": name, "hardware_type": "desktop" })),
        )
        .await;
        ids.push(id_of(&body));
    }

    let (status, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        "/api/activity-logs?limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let logs = body.as_array().expect("array");
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["item_id"], ids[2]);
    assert_eq!(logs[1]["item_id"], ids[1]);

    let (_, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        &format!("/api/activity-logs?item_type=hardware&item_id={}", ids[0]),
        None,
    )
    .await;
    let logs = body.as_array().expect("array");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], "add");
    assert_eq!(logs[0]["user_id"], "editor-1");
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_counts_items_and_open_assignments(pool: PgPool) {
    let app = test_app(&pool);
    let a = seed_hardware(&pool, "A", ItemStatus::InStock).await;
    seed_hardware(&pool, "B", ItemStatus::Maintenance).await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": a, "assigned_to": "Olive" })),
    )
    .await;

    let (status, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        "/api/dashboard/stats",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["items"]["hardware"]["assigned"], 1);
    assert_eq!(body["items"]["hardware"]["maintenance"], 1);
    assert_eq!(body["items"]["hardware"]["total"], 2);
    assert_eq!(body["items"]["network_devices"]["total"], 0);
    assert_eq!(body["open_assignments"], 1);
    assert_eq!(body["recent_activity"].as_array().map(Vec::len), Some(2));
}

#[sqlx::test(migrations = "./migrations")]
async fn reconciliation_reports_and_repairs_drift(pool: PgPool) {
    let app = test_app(&pool);
    let orphan = seed_hardware(&pool, "Orphan", ItemStatus::Assigned).await;
    let held = seed_hardware(&pool, "Held", ItemStatus::InStock).await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": held, "assigned_to": "Pat" })),
    )
    .await;
    // simulate a write that bypassed the ledger
    sqlx::query("UPDATE hardware SET status = 'in_stock' WHERE id = $1")
        .bind(held)
        .execute(&pool)
        .await
        .expect("force drift");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::GET,
        "/api/admin/reconciliation",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, report) = send(
        &app,
        UserRole::Admin,
        Method::GET,
        "/api/admin/reconciliation",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["repaired"], false);
    assert_eq!(report["drifted"].as_array().map(Vec::len), Some(2));
    assert_eq!(hardware_status(&pool, orphan).await, "assigned");

    let (status, report) = send(
        &app,
        UserRole::Admin,
        Method::POST,
        "/api/admin/reconciliation",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["repaired"], true);
    assert_eq!(hardware_status(&pool, orphan).await, "in_stock");
    assert_eq!(hardware_status(&pool, held).await, "assigned");

    let (_, report) = send(
        &app,
        UserRole::Admin,
        Method::GET,
        "/api/admin/reconciliation",
        None,
    )
    .await;
    assert_eq!(report["drifted"].as_array().map(Vec::len), Some(0));

    let repairs = activity_logs(&pool)
        .await
        .into_iter()
        .filter(|log| {
            log.details
                .as_deref()
                .is_some_and(|d| d.contains("status reconciliation"))
        })
        .count();
    assert_eq!(repairs, 2);
}
