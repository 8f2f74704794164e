use sqlx::PgPool;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::{Clinic, NewClinic};

pub struct ClinicRepository;

impl ClinicRepository {
    /// Create a clinic and link the creating user to it in one transaction
    pub async fn create_for_user(
        pool: &PgPool,
        user_id: Uuid,
        new_clinic: &NewClinic,
    ) -> Result<Clinic, DatabaseError> {
        let mut tx = pool.begin().await?;

        let clinic = sqlx::query_as::<_, Clinic>(
            r#"
            INSERT INTO clinics (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&new_clinic.name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO users_to_clinics (user_id, clinic_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(clinic.id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from_write)?;

        tx.commit().await?;

        tracing::info!(clinic_id = %clinic.id, %user_id, "Clinic created");
        Ok(clinic)
    }
}
