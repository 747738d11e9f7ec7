use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        activity_logs, assignments, credentials, dashboard,
        inventory::{
            create_item, delete_item, get_item, item_assignments, list_items, update_item,
            InventoryResource,
        },
        reconciliation, vlans,
    },
    middleware as app_middleware,
    models::{
        general_inventory::GeneralInventoryItem, hardware::Hardware,
        network_device::NetworkDevice,
    },
    state::AppState,
};

/// Mounts the five item routes of one registry under `base`.
fn item_routes<T: InventoryResource>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list_items::<T>).post(create_item::<T>))
        .route(
            &format!("{}/{{id}}", base),
            get(get_item::<T>)
                .put(update_item::<T>)
                .patch(update_item::<T>)
                .delete(delete_item::<T>),
        )
        .route(
            &format!("{}/{{id}}/assignments", base),
            get(item_assignments::<T>),
        )
}

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(item_routes::<Hardware>("/api/hardware"))
        .merge(item_routes::<NetworkDevice>("/api/network-devices"))
        .merge(item_routes::<GeneralInventoryItem>("/api/general-inventory"))
        .route(
            "/api/vlans",
            get(vlans::list_vlans).post(vlans::create_vlan),
        )
        .route(
            "/api/vlans/{id}",
            get(vlans::get_vlan)
                .put(vlans::update_vlan)
                .patch(vlans::update_vlan)
                .delete(vlans::delete_vlan),
        )
        .route(
            "/api/credentials",
            get(credentials::list_credentials).post(credentials::create_credential),
        )
        .route(
            "/api/credentials/{id}",
            get(credentials::get_credential)
                .put(credentials::update_credential)
                .patch(credentials::update_credential)
                .delete(credentials::delete_credential),
        )
        .route(
            "/api/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/api/assignments/{id}",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .patch(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route(
            "/api/assignments/{id}/return",
            post(assignments::return_assignment),
        )
        .route(
            "/api/activity-logs",
            get(activity_logs::list_activity_logs),
        )
        .route("/api/dashboard/stats", get(dashboard::dashboard_stats))
        .route(
            "/api/admin/reconciliation",
            get(reconciliation::status_drift_report)
                .post(reconciliation::repair_status_drift),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            app_middleware::auth,
        ))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Full application router: Swagger UI, the authenticated API and the
/// shared request-id, error-logging, trace and CORS layers.
pub fn build_router(state: AppState) -> Router {
    let docs = SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi());
    let cors = cors_layer(&state.config.cors_allow_origins);

    Router::new()
        .merge(docs)
        .merge(api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(app_middleware::request_id))
                .layer(axum_middleware::from_fn(app_middleware::log_error_responses))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
