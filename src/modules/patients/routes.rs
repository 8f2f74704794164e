use axum::{routing::get, Router};

use super::handlers::{list_patients, upsert_patient};
use crate::app_state::AppState;

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/", get(list_patients).post(upsert_patient))
}
