use axum::{routing::get, Router};

use super::handlers::get_dashboard;
use crate::app_state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}
