use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{check_availability, delete_doctor, doctor_cards, list_doctors, upsert_doctor};
use crate::app_state::AppState;

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_doctors).post(upsert_doctor))
        .route("/cards", get(doctor_cards))
        .route("/{id}", delete(delete_doctor))
        .route("/{id}/availability", get(check_availability))
}
