use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::availability::{AvailabilityDisplay, AvailabilityWindow};
use crate::dashboard::format_currency;
use crate::db::{DatabaseError, Doctor, DoctorRepository, UpsertDoctor};
use crate::error::{AppError, AppResult};
use crate::i18n::I18n;
use crate::modules::html::HtmlTemplate;
use crate::session::ClinicAccess;
use crate::specialty::{MedicalSpecialty, SpecialtyIcon};

/// A doctor as the list and the cards show it
#[derive(Debug, Clone, Serialize)]
pub struct DoctorView {
    pub id: Uuid,
    pub name: String,
    pub initials: String,
    pub specialty: String,
    pub specialty_icon: SpecialtyIcon,
    pub avatar_image_url: Option<String>,
    pub appointment_price_in_cents: i32,
    pub appointment_price: String,
    pub availability: AvailabilityWindow,
    pub availability_display: AvailabilityDisplay,
}

impl DoctorView {
    fn build(doctor: Doctor, i18n: &I18n) -> Result<Self, DatabaseError> {
        let availability = doctor
            .availability()
            .map_err(|e| DatabaseError::Corrupt(format!("doctor {}: {}", doctor.id, e)))?;

        Ok(Self {
            initials: card_initials(&doctor.name),
            specialty_icon: MedicalSpecialty::from_label(&doctor.specialty).icon(),
            appointment_price: format_currency(i64::from(doctor.appointment_price_in_cents)),
            availability_display: availability.describe(&i18n.localizer, i18n.language),
            availability,
            id: doctor.id,
            name: doctor.name,
            specialty: doctor.specialty,
            avatar_image_url: doctor.avatar_image_url,
            appointment_price_in_cents: doctor.appointment_price_in_cents,
        })
    }
}

/// First letter of every part of the name, as written
fn card_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

async fn doctor_views(state: &AppState, clinic_id: Uuid, i18n: &I18n) -> AppResult<Vec<DoctorView>> {
    let doctors = DoctorRepository::list_by_clinic(&state.db, clinic_id).await?;
    let views = doctors
        .into_iter()
        .map(|doctor| DoctorView::build(doctor, i18n))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(views)
}

pub async fn list_doctors(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    i18n: I18n,
) -> AppResult<Json<Vec<DoctorView>>> {
    Ok(Json(doctor_views(&state, context.clinic.id, &i18n).await?))
}

#[derive(Template)]
#[template(path = "doctors/cards.html")]
pub struct DoctorCardsTemplate {
    pub doctors: Vec<DoctorView>,
    pub empty_label: String,
    pub details_label: String,
    pub delete_label: String,
}

pub async fn doctor_cards(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    i18n: I18n,
) -> AppResult<HtmlTemplate<DoctorCardsTemplate>> {
    let doctors = doctor_views(&state, context.clinic.id, &i18n).await?;

    Ok(HtmlTemplate(DoctorCardsTemplate {
        doctors,
        empty_label: i18n.get("doctors-empty"),
        details_label: i18n.get("doctor-details"),
        delete_label: i18n.get("doctor-delete"),
    }))
}

#[derive(Debug, Serialize)]
pub struct DoctorSaved {
    pub message: String,
    pub doctor: DoctorView,
}

pub async fn upsert_doctor(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    i18n: I18n,
    Json(payload): Json<UpsertDoctor>,
) -> AppResult<(StatusCode, Json<DoctorSaved>)> {
    let payload = payload.trimmed();
    let window = payload.check()?;

    let status = if payload.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let doctor = DoctorRepository::upsert(&state.db, context.clinic.id, &payload, &window).await?;
    tracing::info!(doctor_id = %doctor.id, clinic_id = %context.clinic.id, "Doctor saved");

    Ok((
        status,
        Json(DoctorSaved {
            message: i18n.get("doctor-saved"),
            doctor: DoctorView::build(doctor, &i18n)?,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

pub async fn delete_doctor(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    i18n: I18n,
    Path(doctor_id): Path<Uuid>,
) -> AppResult<Json<Message>> {
    DoctorRepository::delete(&state.db, context.clinic.id, doctor_id).await?;
    tracing::info!(%doctor_id, clinic_id = %context.clinic.id, "Doctor deleted");

    Ok(Json(Message {
        message: i18n.get("doctor-deleted"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// RFC 3339 timestamp; the weekday and time are taken in its offset
    pub at: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityCheck {
    pub doctor_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub available: bool,
}

pub async fn check_availability(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityCheck>> {
    let at = OffsetDateTime::parse(query.at.trim(), &Rfc3339)
        .map_err(|e| AppError::BadRequest(format!("Invalid 'at' timestamp: {}", e)))?;

    let doctor = DoctorRepository::find(&state.db, context.clinic.id, doctor_id).await?;
    let window = doctor
        .availability()
        .map_err(|e| DatabaseError::Corrupt(format!("doctor {}: {}", doctor.id, e)))?;

    Ok(Json(AvailabilityCheck {
        doctor_id,
        at,
        available: window.contains_datetime(at),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use time::macros::{datetime, time};

    use crate::i18n::{test_localizer, SupportedLanguage};

    fn i18n() -> I18n {
        I18n {
            localizer: Arc::new(test_localizer()),
            language: SupportedLanguage::Portuguese,
        }
    }

    fn doctor() -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            clinic_id: Uuid::new_v4(),
            name: "Ana Maria Souza".to_string(),
            avatar_image_url: None,
            specialty: "Cardiologia".to_string(),
            appointment_price_in_cents: 15000,
            available_from_week_day: 1,
            available_to_week_day: 5,
            available_from_time: time!(8:00),
            available_to_time: time!(18:00),
            created_at: datetime!(2026-10-01 12:00 UTC),
            updated_at: None,
        }
    }

    #[test]
    fn card_initials_use_every_name_part() {
        assert_eq!(card_initials("Ana Maria Souza"), "AMS");
        assert_eq!(card_initials("  ana  de  Souza "), "adS");
        assert_eq!(card_initials(""), "");
    }

    #[test]
    fn view_carries_localized_availability() {
        let view = DoctorView::build(doctor(), &i18n()).unwrap();
        assert_eq!(view.initials, "AMS");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["availability_display"]["days_label"], "Segunda a Sexta");
        assert_eq!(json["availability_display"]["hours_label"], "08:00 às 18:00");
        assert_eq!(json["availability"]["from_weekday"], 1);
        assert_eq!(json["availability"]["from_time"], "08:00:00");
        assert_eq!(json["specialty_icon"], "heart");
    }

    #[test]
    fn stored_row_with_bad_weekday_is_corrupt() {
        let row = Doctor {
            available_to_week_day: 9,
            ..doctor()
        };

        assert!(matches!(DoctorView::build(row, &i18n()), Err(DatabaseError::Corrupt(_))));
    }

    fn cards(doctors: Vec<DoctorView>) -> String {
        DoctorCardsTemplate {
            doctors,
            empty_label: "Nenhum médico encontrado".to_string(),
            details_label: "Ver detalhes".to_string(),
            delete_label: "Deletar médico".to_string(),
        }
        .render()
        .unwrap()
    }

    #[test]
    fn cards_show_badges_and_initials_without_avatar() {
        let html = cards(vec![DoctorView::build(doctor(), &i18n()).unwrap()]);

        assert!(html.contains("Segunda a Sexta"));
        assert!(html.contains("08:00 às 18:00"));
        assert!(html.contains("AMS"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("Nenhum médico encontrado"));
    }

    #[test]
    fn cards_prefer_the_avatar_image() {
        let row = Doctor {
            avatar_image_url: Some("https://cdn.example.com/ana.png".to_string()),
            ..doctor()
        };
        let html = cards(vec![DoctorView::build(row, &i18n()).unwrap()]);

        assert!(html.contains("<img"));
        assert!(html.contains("ana.png"));
        assert!(!html.contains(">AMS<"));
    }

    #[test]
    fn empty_list_renders_the_empty_label() {
        assert!(cards(Vec::new()).contains("Nenhum médico encontrado"));
    }
}
