use axum::http::{Method, StatusCode};
use inventory_backend::models::{actor::UserRole, item::ItemStatus};
use serde_json::json;
use sqlx::PgPool;

mod support;
use support::{
    activity_logs, count_assignments, hardware_status, id_of, seed_general_item, seed_hardware,
    seed_network_device, send, status_invariant_violations, test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn create_assignment_marks_item_assigned(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "H1", ItemStatus::InStock).await;

    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["status"], "active");
    assert_eq!(body["item_type"], "hardware");
    assert_eq!(body["item_id"], h1);
    assert_eq!(body["assigned_to"], "Alice");
    assert!(body["assignment_date"].is_string());
    assert_eq!(hardware_status(&pool, h1).await, "assigned");
    assert_eq!(count_assignments(&pool).await, 1);

    let logs = activity_logs(&pool).await;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action.as_str(), "assign");
    assert_eq!(logs[0].item_type, "assignment");
    assert_eq!(logs[0].user_id, "editor-1");
    assert_eq!(logs[1].action.as_str(), "update");
    assert_eq!(logs[1].item_type, "hardware");
    assert_eq!(logs[1].item_id, Some(h1));
}

#[sqlx::test(migrations = "./migrations")]
async fn returning_assignment_restores_stock(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "H1", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Alice" })),
    )
    .await;
    let id = id_of(&created);

    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::PUT,
        &format!("/api/assignments/{}", id),
        Some(json!({ "status": "returned" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "returned");
    assert!(body["return_date"].is_string());
    assert_eq!(hardware_status(&pool, h1).await, "in_stock");
    assert_eq!(status_invariant_violations(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_active_assignment_releases_item(pool: PgPool) {
    let app = test_app(&pool);
    let h2 = seed_hardware(&pool, "H2", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h2, "assigned_to": "Bob" })),
    )
    .await;
    assert_eq!(hardware_status(&pool, h2).await, "assigned");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::DELETE,
        &format!("/api/assignments/{}", id_of(&created)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(count_assignments(&pool).await, 0);
    assert_eq!(hardware_status(&pool, h2).await, "in_stock");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::DELETE,
        &format!("/api/assignments/{}", id_of(&created)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_creates_admit_exactly_one(pool: PgPool) {
    let app = test_app(&pool);
    let h3 = seed_hardware(&pool, "H3", ItemStatus::InStock).await;
    let payload = json!({ "hardware_id": h3, "assigned_to": "Carol" });

    let (first, second) = tokio::join!(
        send(
            &app,
            UserRole::Editor,
            Method::POST,
            "/api/assignments",
            Some(payload.clone())
        ),
        send(
            &app,
            UserRole::Admin,
            Method::POST,
            "/api/assignments",
            Some(payload.clone())
        ),
    );

    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM assignments WHERE hardware_id = $1 AND status = 'active'",
    )
    .bind(h3)
    .fetch_one(&pool)
    .await
    .expect("count active");
    assert_eq!(active, 1);
    assert_eq!(hardware_status(&pool, h3).await, "assigned");
}

#[sqlx::test(migrations = "./migrations")]
async fn return_twice_is_a_conflict(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "Dock", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Dana" })),
    )
    .await;
    let uri = format!("/api/assignments/{}/return", id_of(&created));

    let (status, body) = send(&app, UserRole::Editor, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");
    let logs_after_first = activity_logs(&pool).await.len();

    let (status, body) = send(&app, UserRole::Editor, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(hardware_status(&pool, h1).await, "in_stock");
    assert_eq!(activity_logs(&pool).await.len(), logs_after_first);
}

#[sqlx::test(migrations = "./migrations")]
async fn unavailable_items_reject_assignment_without_writes(pool: PgPool) {
    let app = test_app(&pool);
    let broken = seed_hardware(&pool, "Broken", ItemStatus::Maintenance).await;
    let old = seed_hardware(&pool, "Old", ItemStatus::Retired).await;

    for (id, expected) in [(broken, "maintenance"), (old, "retired")] {
        let (status, _) = send(
            &app,
            UserRole::Editor,
            Method::POST,
            "/api/assignments",
            Some(json!({ "hardware_id": id, "assigned_to": "Eve" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(hardware_status(&pool, id).await, expected);
    }
    assert_eq!(count_assignments(&pool).await, 0);
    assert!(activity_logs(&pool).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn create_requires_exactly_one_existing_item(pool: PgPool) {
    let app = test_app(&pool);
    let hw = seed_hardware(&pool, "Laptop", ItemStatus::InStock).await;
    let dev = seed_network_device(&pool, "Switch", ItemStatus::InStock).await;

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "assigned_to": "Frank" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": hw, "network_device_id": dev, "assigned_to": "Frank" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "general_inventory_id": 9999, "assigned_to": "Frank" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": hw, "assigned_to": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(count_assignments(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn pending_assignment_does_not_hold_item(pool: PgPool) {
    let app = test_app(&pool);
    let item = seed_general_item(&pool, "Headset", ItemStatus::InStock).await;

    let (status, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "general_inventory_id": item, "assigned_to": "Gina", "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_uri = format!("/api/general-inventory/{}", item);
    let (_, body) = send(&app, UserRole::Viewer, Method::GET, &item_uri, None).await;
    assert_eq!(body["status"], "in_stock");

    // a second open assignment is still refused
    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "general_inventory_id": item, "assigned_to": "Hank" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/api/assignments/{}", id_of(&created));
    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, UserRole::Viewer, Method::GET, &item_uri, None).await;
    assert_eq!(body["status"], "assigned");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, UserRole::Viewer, Method::GET, &item_uri, None).await;
    assert_eq!(body["status"], "in_stock");
}

#[sqlx::test(migrations = "./migrations")]
async fn update_rejects_item_change_and_revival(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "A", ItemStatus::InStock).await;
    let h2 = seed_hardware(&pool, "B", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Ivy" })),
    )
    .await;
    let uri = format!("/api/assignments/{}", id_of(&created));

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::PUT,
        &uri,
        Some(json!({ "hardware_id": h2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(hardware_status(&pool, h2).await, "in_stock");

    // naming the current item plus a field patch is fine
    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::PUT,
        &uri,
        Some(json!({ "hardware_id": h1, "department": "Finance" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Finance");

    send(&app, UserRole::Editor, Method::POST, &format!("{}/return", uri), None).await;
    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::PUT,
        &uri,
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(hardware_status(&pool, h1).await, "in_stock");

    // a returned assignment still accepts note edits
    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "notes": "Returned with charger" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], "Returned with charger");
    assert_eq!(body["status"], "returned");
}

#[sqlx::test(migrations = "./migrations")]
async fn metadata_patch_keeps_recorded_return_date(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "Scanner", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Noor" })),
    )
    .await;
    let uri = format!("/api/assignments/{}", id_of(&created));
    send(&app, UserRole::Editor, Method::POST, &format!("{}/return", uri), None).await;

    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "return_date": "2020-01-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["return_date"], "2020-01-01T00:00:00Z");

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "return_date": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &uri,
        Some(json!({ "notes": "Screen cracked" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["return_date"], "2020-01-01T00:00:00Z");
}

/// Makes every write of `status` to a hardware row fail inside Postgres.
async fn fail_hardware_status_writes(pool: &PgPool, status: &str) {
    sqlx::query(
        "CREATE FUNCTION fail_status_write() RETURNS trigger AS $$ \
         BEGIN \
             IF NEW.status = TG_ARGV[0] THEN \
                 RAISE EXCEPTION 'status write to % rejected', TG_ARGV[0]; \
             END IF; \
             RETURN NEW; \
         END $$ LANGUAGE plpgsql",
    )
    .execute(pool)
    .await
    .expect("create trigger function");
    sqlx::query(&format!(
        "CREATE TRIGGER fail_status_write BEFORE UPDATE ON hardware \
         FOR EACH ROW EXECUTE FUNCTION fail_status_write('{}')",
        status
    ))
    .execute(pool)
    .await
    .expect("create trigger");
}

async fn assignment_status(pool: &PgPool, id: i64) -> String {
    sqlx::query_scalar("SELECT status FROM assignments WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("assignment status")
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_item_write_rolls_back_create(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "Router", ItemStatus::InStock).await;
    fail_hardware_status_writes(&pool, "assigned").await;

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Omar" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count_assignments(&pool).await, 0);
    assert_eq!(hardware_status(&pool, h1).await, "in_stock");
    assert!(activity_logs(&pool).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_item_write_rolls_back_return_and_delete(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "Switch", ItemStatus::InStock).await;
    let (_, created) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Pia" })),
    )
    .await;
    let id = id_of(&created);
    let uri = format!("/api/assignments/{}", id);
    let logged = activity_logs(&pool).await.len();
    fail_hardware_status_writes(&pool, "in_stock").await;

    let (status, _) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        &format!("{}/return", uri),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(assignment_status(&pool, id).await, "active");
    assert_eq!(hardware_status(&pool, h1).await, "assigned");

    let (status, _) = send(&app, UserRole::Editor, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count_assignments(&pool).await, 1);
    assert_eq!(hardware_status(&pool, h1).await, "assigned");

    assert_eq!(activity_logs(&pool).await.len(), logged);
    assert_eq!(status_invariant_violations(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_and_item_history(pool: PgPool) {
    let app = test_app(&pool);
    let h1 = seed_hardware(&pool, "A", ItemStatus::InStock).await;
    let h2 = seed_hardware(&pool, "B", ItemStatus::InStock).await;

    let (_, first) = send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Jay" })),
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        &format!("/api/assignments/{}/return", id_of(&first)),
        None,
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h1, "assigned_to": "Kim" })),
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": h2, "assigned_to": "Jay" })),
    )
    .await;

    let (status, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        "/api/assignments?status=active",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (_, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        &format!("/api/assignments?item_type=hardware&item_id={}", h1),
        None,
    )
    .await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (_, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        "/api/assignments?assigned_to=Jay",
        None,
    )
    .await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, _) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        "/api/assignments?item_id=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        UserRole::Viewer,
        Method::GET,
        &format!("/api/hardware/{}/assignments", h1),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().expect("history array");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["assigned_to"], "Kim");
    assert_eq!(history[1]["status"], "returned");
}

#[sqlx::test(migrations = "./migrations")]
async fn status_invariant_holds_through_mixed_operations(pool: PgPool) {
    let app = test_app(&pool);
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        ids.push(seed_hardware(&pool, name, ItemStatus::InStock).await);
    }

    let mut assignments = Vec::new();
    for id in &ids {
        let (status, body) = send(
            &app,
            UserRole::Editor,
            Method::POST,
            "/api/assignments",
            Some(json!({ "hardware_id": id, "assigned_to": "Team" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assignments.push(id_of(&body));
    }
    assert_eq!(status_invariant_violations(&pool).await, 0);

    send(
        &app,
        UserRole::Editor,
        Method::POST,
        &format!("/api/assignments/{}/return", assignments[0]),
        None,
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::DELETE,
        &format!("/api/assignments/{}", assignments[1]),
        None,
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::PATCH,
        &format!("/api/assignments/{}", assignments[2]),
        Some(json!({ "status": "pending" })),
    )
    .await;
    send(
        &app,
        UserRole::Editor,
        Method::POST,
        "/api/assignments",
        Some(json!({ "hardware_id": ids[0], "assigned_to": "Again" })),
    )
    .await;

    assert_eq!(status_invariant_violations(&pool).await, 0);
    let statuses: Vec<String> = item_statuses(&pool, &ids).await;
    assert_eq!(statuses, vec!["assigned", "in_stock", "in_stock", "assigned"]);
}

async fn item_statuses(pool: &PgPool, ids: &[i64]) -> Vec<String> {
    let mut statuses = Vec::with_capacity(ids.len());
    for id in ids {
        statuses.push(hardware_status(pool, *id).await);
    }
    statuses
}
