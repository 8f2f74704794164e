use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::json;

use crate::{
    app_state::AppState,
    middleware::{language_middleware, observability_middleware},
    modules::{
        clinics::routes::clinic_routes, dashboard::routes::dashboard_routes,
        doctors::routes::doctor_routes, i18n::routes::i18n_routes,
        patients::routes::patient_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.env.app.static_dir.to_string();

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .merge(clinic_routes())
        .nest("/doctors", doctor_routes())
        .nest("/patients", patient_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/i18n", i18n_routes())
        .nest_service("/static", tower_http::services::ServeDir::new(static_dir))
        .layer(middleware::from_fn(language_middleware))
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn hello(State(state): State<AppState>) -> String {
    format!("{} says hello!\n", state.env.app.name)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
            "telemetry": crate::telemetry::telemetry_health_check()
        }
    }))
}
