use serde::Serialize;
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};

/// Appointment joined with the names shown in the dashboard table
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AppointmentSummary {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub appointment_price_in_cents: i32,
    pub patient_name: String,
    pub doctor_name: String,
    pub doctor_specialty: String,
}

/// Appointments and revenue of one calendar day
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyAppointments {
    pub day: Date,
    pub appointments: i64,
    pub revenue: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DoctorAppointments {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub avatar_image_url: Option<String>,
    pub appointments: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpecialtyAppointments {
    pub specialty: String,
    pub appointments: i64,
}
