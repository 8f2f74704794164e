use sqlx::PgPool;
use uuid::Uuid;

use crate::availability::AvailabilityWindow;
use crate::db::error::DatabaseError;
use crate::db::models::{Doctor, UpsertDoctor};

const DOCTOR_COLUMNS: &str = r#"
    id, clinic_id, name, avatar_image_url, specialty, appointment_price_in_cents,
    available_from_week_day, available_to_week_day, available_from_time, available_to_time,
    created_at, updated_at
"#;

pub struct DoctorRepository;

impl DoctorRepository {
    pub async fn list_by_clinic(pool: &PgPool, clinic_id: Uuid) -> Result<Vec<Doctor>, DatabaseError> {
        let doctors = sqlx::query_as::<_, Doctor>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE clinic_id = $1 ORDER BY name"
        ))
        .bind(clinic_id)
        .fetch_all(pool)
        .await?;

        Ok(doctors)
    }

    pub async fn find(pool: &PgPool, clinic_id: Uuid, doctor_id: Uuid) -> Result<Doctor, DatabaseError> {
        sqlx::query_as::<_, Doctor>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE clinic_id = $1 AND id = $2"
        ))
        .bind(clinic_id)
        .bind(doctor_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    /// Insert a new doctor or update one owned by the same clinic.
    ///
    /// `window` must come from [`UpsertDoctor::check`]; the stored times are
    /// the normalized ones, not the raw payload strings.
    pub async fn upsert(
        pool: &PgPool,
        clinic_id: Uuid,
        payload: &UpsertDoctor,
        window: &AvailabilityWindow,
    ) -> Result<Doctor, DatabaseError> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query_as::<_, Doctor>(&format!(
            r#"
            INSERT INTO doctors (
                id, clinic_id, name, avatar_image_url, specialty, appointment_price_in_cents,
                available_from_week_day, available_to_week_day, available_from_time, available_to_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                avatar_image_url = EXCLUDED.avatar_image_url,
                specialty = EXCLUDED.specialty,
                appointment_price_in_cents = EXCLUDED.appointment_price_in_cents,
                available_from_week_day = EXCLUDED.available_from_week_day,
                available_to_week_day = EXCLUDED.available_to_week_day,
                available_from_time = EXCLUDED.available_from_time,
                available_to_time = EXCLUDED.available_to_time,
                updated_at = NOW()
            WHERE doctors.clinic_id = EXCLUDED.clinic_id
            RETURNING {DOCTOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(clinic_id)
        .bind(&payload.name)
        .bind(&payload.avatar_image_url)
        .bind(&payload.specialty)
        .bind(payload.appointment_price_in_cents)
        .bind(i32::from(window.from_weekday.index()))
        .bind(i32::from(window.to_weekday.index()))
        .bind(window.from_time.as_time())
        .bind(window.to_time.as_time())
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::from_write)?
        // The conflicting row belongs to another clinic
        .ok_or(DatabaseError::NotFound)
    }

    /// Delete a doctor together with its appointments (cascade)
    pub async fn delete(pool: &PgPool, clinic_id: Uuid, doctor_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM doctors WHERE clinic_id = $1 AND id = $2")
            .bind(clinic_id)
            .bind(doctor_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
