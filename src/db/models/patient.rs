use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use std::str::FromStr;
use time::OffsetDateTime;
use validator::{Validate, ValidationErrors};

use super::field_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "patient_sex", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PatientSex {
    Male,
    Female,
}

impl FromStr for PatientSex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(PatientSex::Male),
            "female" => Ok(PatientSex::Female),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Patient {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sex: PatientSex,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Create-or-update payload of the patient form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertPatient {
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Telefone é obrigatório"))]
    pub phone_number: String,
    #[serde(default)]
    pub sex: String,
}

impl UpsertPatient {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            sex: self.sex.trim().to_string(),
            ..self
        }
    }

    /// Field rules; on success the parsed sex comes back
    pub fn check(&self) -> Result<PatientSex, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        match self.sex.parse::<PatientSex>() {
            Ok(sex) if errors.is_empty() => Ok(sex),
            Ok(_) => Err(errors),
            Err(()) => {
                errors.add("sex", field_error("sex", "Sexo é obrigatório"));
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> UpsertPatient {
        UpsertPatient {
            id: None,
            name: " Maria Lima ".to_string(),
            email: "maria@example.com".to_string(),
            phone_number: "11987654321".to_string(),
            sex: "female".to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_patient() {
        let payload = payload().trimmed();
        assert_eq!(payload.name, "Maria Lima");
        assert_eq!(payload.check(), Ok(PatientSex::Female));
    }

    #[test]
    fn sex_must_match_a_stored_value_exactly() {
        let payload = UpsertPatient {
            sex: "Female".to_string(),
            ..payload()
        }
        .trimmed();

        let errors = payload.check().unwrap_err();
        assert_eq!(
            errors.field_errors()["sex"][0].message.as_deref(),
            Some("Sexo é obrigatório")
        );
    }

    #[test]
    fn omitted_fields_are_reported_not_rejected() {
        let payload: UpsertPatient = serde_json::from_value(serde_json::json!({
            "email": "Maria@Example.com",
            "sex": "male",
        }))
        .expect("missing fields fall back to defaults");

        let payload = payload.trimmed();
        assert_eq!(payload.email, "Maria@Example.com");
        let errors = payload.check().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone_number"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn reports_every_invalid_field() {
        let payload = UpsertPatient {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            phone_number: "12345".to_string(),
            sex: "other".to_string(),
            ..payload()
        }
        .trimmed();

        let errors = payload.check().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "email", "phone_number", "sex"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
        assert_eq!(fields["email"][0].message.as_deref(), Some("Email inválido"));
        assert_eq!(fields["sex"][0].message.as_deref(), Some("Sexo é obrigatório"));
    }
}
