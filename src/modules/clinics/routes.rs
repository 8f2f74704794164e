use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{clinic_form, create_clinic};
use crate::app_state::AppState;

pub fn clinic_routes() -> Router<AppState> {
    Router::new()
        .route("/clinic-form", get(clinic_form))
        .route("/clinics", post(create_clinic))
}
