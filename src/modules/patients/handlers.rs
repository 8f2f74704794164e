use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::app_state::AppState;
use crate::db::{Patient, PatientRepository, UpsertPatient};
use crate::error::AppResult;
use crate::i18n::I18n;
use crate::session::ClinicAccess;

pub async fn list_patients(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Patient>>> {
    let patients = PatientRepository::list_by_clinic(&state.db, context.clinic.id).await?;
    Ok(Json(patients))
}

#[derive(Debug, Serialize)]
pub struct PatientSaved {
    pub message: String,
    pub patient: Patient,
}

pub async fn upsert_patient(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    i18n: I18n,
    Json(payload): Json<UpsertPatient>,
) -> AppResult<(StatusCode, Json<PatientSaved>)> {
    let payload = payload.trimmed();
    let sex = payload.check()?;

    let status = if payload.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let patient = PatientRepository::upsert(&state.db, context.clinic.id, &payload, sex).await?;
    tracing::info!(patient_id = %patient.id, clinic_id = %context.clinic.id, "Patient saved");

    Ok((
        status,
        Json(PatientSaved {
            message: i18n.get("patient-saved"),
            patient,
        }),
    ))
}
