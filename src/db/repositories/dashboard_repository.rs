use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::{
    AppointmentSummary, DailyAppointments, DoctorAppointments, SpecialtyAppointments,
};

/// Half-open `[start, end)` interval of appointment dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

pub struct DashboardRepository;

impl DashboardRepository {
    pub async fn total_revenue(pool: &PgPool, clinic_id: Uuid, period: Period) -> Result<i64, DatabaseError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(appointment_price_in_cents), 0)::BIGINT
            FROM appointments
            WHERE clinic_id = $1 AND date >= $2 AND date < $3
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }

    pub async fn total_appointments(pool: &PgPool, clinic_id: Uuid, period: Period) -> Result<i64, DatabaseError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)::BIGINT
            FROM appointments
            WHERE clinic_id = $1 AND date >= $2 AND date < $3
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }

    pub async fn total_patients(pool: &PgPool, clinic_id: Uuid) -> Result<i64, DatabaseError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM patients WHERE clinic_id = $1")
            .bind(clinic_id)
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    pub async fn total_doctors(pool: &PgPool, clinic_id: Uuid) -> Result<i64, DatabaseError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM doctors WHERE clinic_id = $1")
            .bind(clinic_id)
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    pub async fn top_doctors(
        pool: &PgPool,
        clinic_id: Uuid,
        period: Period,
        limit: i64,
    ) -> Result<Vec<DoctorAppointments>, DatabaseError> {
        let rows = sqlx::query_as::<_, DoctorAppointments>(
            r#"
            SELECT d.id, d.name, d.specialty, d.avatar_image_url,
                   COUNT(a.id)::BIGINT AS appointments
            FROM doctors d
            LEFT JOIN appointments a
                ON a.doctor_id = d.id AND a.date >= $2 AND a.date < $3
            WHERE d.clinic_id = $1
            GROUP BY d.id
            ORDER BY appointments DESC, d.name
            LIMIT $4
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn top_specialties(
        pool: &PgPool,
        clinic_id: Uuid,
        period: Period,
    ) -> Result<Vec<SpecialtyAppointments>, DatabaseError> {
        let rows = sqlx::query_as::<_, SpecialtyAppointments>(
            r#"
            SELECT d.specialty, COUNT(a.id)::BIGINT AS appointments
            FROM appointments a
            JOIN doctors d ON d.id = a.doctor_id
            WHERE a.clinic_id = $1 AND a.date >= $2 AND a.date < $3
            GROUP BY d.specialty
            ORDER BY appointments DESC, d.specialty
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn appointments_in(
        pool: &PgPool,
        clinic_id: Uuid,
        period: Period,
    ) -> Result<Vec<AppointmentSummary>, DatabaseError> {
        let rows = sqlx::query_as::<_, AppointmentSummary>(
            r#"
            SELECT a.id, a.date, a.appointment_price_in_cents,
                   p.name AS patient_name, d.name AS doctor_name, d.specialty AS doctor_specialty
            FROM appointments a
            JOIN patients p ON p.id = a.patient_id
            JOIN doctors d ON d.id = a.doctor_id
            WHERE a.clinic_id = $1 AND a.date >= $2 AND a.date < $3
            ORDER BY a.date
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Per-day counts and revenue, days bucketed in UTC
    pub async fn daily_appointments(
        pool: &PgPool,
        clinic_id: Uuid,
        period: Period,
    ) -> Result<Vec<DailyAppointments>, DatabaseError> {
        let rows = sqlx::query_as::<_, DailyAppointments>(
            r#"
            SELECT (a.date AT TIME ZONE 'UTC')::DATE AS day,
                   COUNT(*)::BIGINT AS appointments,
                   COALESCE(SUM(a.appointment_price_in_cents), 0)::BIGINT AS revenue
            FROM appointments a
            WHERE a.clinic_id = $1 AND a.date >= $2 AND a.date < $3
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(clinic_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
