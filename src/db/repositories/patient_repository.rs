use sqlx::PgPool;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::{Patient, PatientSex, UpsertPatient};

pub struct PatientRepository;

impl PatientRepository {
    pub async fn list_by_clinic(pool: &PgPool, clinic_id: Uuid) -> Result<Vec<Patient>, DatabaseError> {
        let patients = sqlx::query_as::<_, Patient>(
            r#"
            SELECT id, clinic_id, name, email, phone_number, sex, created_at, updated_at
            FROM patients
            WHERE clinic_id = $1
            ORDER BY name
            "#,
        )
        .bind(clinic_id)
        .fetch_all(pool)
        .await?;

        Ok(patients)
    }

    pub async fn upsert(
        pool: &PgPool,
        clinic_id: Uuid,
        payload: &UpsertPatient,
        sex: PatientSex,
    ) -> Result<Patient, DatabaseError> {
        sqlx::query_as::<_, Patient>(
            r#"
            INSERT INTO patients (id, clinic_id, name, email, phone_number, sex)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone_number = EXCLUDED.phone_number,
                sex = EXCLUDED.sex,
                updated_at = NOW()
            WHERE patients.clinic_id = EXCLUDED.clinic_id
            RETURNING id, clinic_id, name, email, phone_number, sex, created_at, updated_at
            "#,
        )
        .bind(payload.id.unwrap_or_else(Uuid::new_v4))
        .bind(clinic_id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone_number)
        .bind(sex)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::from_write)?
        .ok_or(DatabaseError::NotFound)
    }
}
