use serde::Deserialize;
use sqlx::types::Uuid;
use time::{OffsetDateTime, Time};
use validator::{Validate, ValidationErrors};

use crate::availability::{
    AvailabilityError, AvailabilityField, AvailabilityWindow, TimeOfDay, Weekday,
};

use super::field_error;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    pub avatar_image_url: Option<String>,
    pub specialty: String,
    pub appointment_price_in_cents: i32,
    pub available_from_week_day: i32,
    pub available_to_week_day: i32,
    pub available_from_time: Time,
    pub available_to_time: Time,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl Doctor {
    /// Availability as stored; rows written outside the upsert path may
    /// carry out-of-range weekdays
    pub fn availability(&self) -> Result<AvailabilityWindow, AvailabilityError> {
        Ok(AvailabilityWindow::new(
            Weekday::try_from(i64::from(self.available_from_week_day))?,
            Weekday::try_from(i64::from(self.available_to_week_day))?,
            TimeOfDay::from(self.available_from_time),
            TimeOfDay::from(self.available_to_time),
        ))
    }
}

impl TryFrom<&Doctor> for AvailabilityWindow {
    type Error = AvailabilityError;

    fn try_from(doctor: &Doctor) -> Result<Self, Self::Error> {
        doctor.availability()
    }
}

/// Create-or-update payload of the doctor form.
///
/// Missing fields deserialize to empty values so they are reported by
/// [`UpsertDoctor::check`] with the form's own messages.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertDoctor {
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Especialidade é obrigatória."))]
    pub specialty: String,
    #[serde(default)]
    pub avatar_image_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Preço da consulta é obrigatório."))]
    pub appointment_price_in_cents: i32,
    #[serde(default)]
    pub available_from_week_day: Option<i64>,
    #[serde(default)]
    pub available_to_week_day: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Hora de início é obrigatória."))]
    pub available_from_time: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Hora de término é obrigatória."))]
    pub available_to_time: String,
}

impl UpsertDoctor {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            available_from_time: self.available_from_time.trim().to_string(),
            available_to_time: self.available_to_time.trim().to_string(),
            avatar_image_url: self
                .avatar_image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            ..self
        }
    }

    /// Field rules plus the availability window checks.
    ///
    /// Window errors are reported under the field they belong to, so an
    /// end time that is not after the start time lands on
    /// `available_to_time`.
    pub fn check(&self) -> Result<AvailabilityWindow, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let (Some(from_week_day), Some(to_week_day)) =
            (self.available_from_week_day, self.available_to_week_day)
        else {
            if self.available_from_week_day.is_none() {
                errors.add(
                    AvailabilityField::FromWeekday.as_str(),
                    field_error("required", "Dia inicial de disponibilidade é obrigatório."),
                );
            }
            if self.available_to_week_day.is_none() {
                errors.add(
                    AvailabilityField::ToWeekday.as_str(),
                    field_error("required", "Dia final de disponibilidade é obrigatório."),
                );
            }
            return Err(errors);
        };

        let window = AvailabilityWindow::parse(
            from_week_day,
            to_week_day,
            &self.available_from_time,
            &self.available_to_time,
        )
        .and_then(|window| window.validate().map(|()| window));

        match window {
            Ok(window) if errors.is_empty() => Ok(window),
            Ok(_) => Err(errors),
            Err(violation) => {
                // Blank times are already reported by the length rules
                if !self.is_blank(violation.field) {
                    errors.add(
                        violation.field.as_str(),
                        field_error(violation.error.code(), violation.error.to_string()),
                    );
                }
                Err(errors)
            }
        }
    }

    fn is_blank(&self, field: AvailabilityField) -> bool {
        match field {
            AvailabilityField::FromTime => self.available_from_time.is_empty(),
            AvailabilityField::ToTime => self.available_to_time.is_empty(),
            AvailabilityField::FromWeekday | AvailabilityField::ToWeekday => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> UpsertDoctor {
        UpsertDoctor {
            id: None,
            name: "  Ana Souza ".to_string(),
            specialty: "Cardiologia".to_string(),
            avatar_image_url: Some("   ".to_string()),
            appointment_price_in_cents: 15000,
            available_from_week_day: Some(1),
            available_to_week_day: Some(5),
            available_from_time: "08:00".to_string(),
            available_to_time: "18:00:00".to_string(),
        }
    }

    #[test]
    fn valid_payload_yields_normalized_window() {
        let payload = payload().trimmed();
        assert_eq!(payload.name, "Ana Souza");
        assert_eq!(payload.avatar_image_url, None);

        let window = payload.check().expect("valid");
        assert_eq!(window.from_weekday, Weekday::MONDAY);
        assert_eq!(window.from_time.to_string(), "08:00:00");
    }

    #[test]
    fn end_before_start_is_reported_on_the_end_time() {
        let payload = UpsertDoctor {
            available_from_time: "18:00:00".to_string(),
            available_to_time: "08:00:00".to_string(),
            ..payload()
        };

        let errors = payload.check().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("available_to_time"));
        assert!(!fields.contains_key("available_from_time"));
        let first = &errors.field_errors()["available_to_time"][0];
        assert_eq!(first.code, "end_before_start");
    }

    #[test]
    fn blank_fields_report_their_own_messages() {
        let payload = UpsertDoctor {
            name: "   ".to_string(),
            available_to_time: String::new(),
            appointment_price_in_cents: 0,
            ..payload()
        }
        .trimmed();

        let errors = payload.check().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("appointment_price_in_cents"));
        let to_time = &fields["available_to_time"];
        assert_eq!(to_time.len(), 1);
        assert_eq!(
            to_time[0].message.as_deref(),
            Some("Hora de término é obrigatória.")
        );
    }

    #[test]
    fn out_of_range_weekday_is_rejected() {
        let payload = UpsertDoctor {
            available_to_week_day: Some(7),
            ..payload()
        };

        let errors = payload.check().unwrap_err();
        assert!(errors.field_errors().contains_key("available_to_week_day"));
    }

    #[test]
    fn omitted_fields_are_reported_with_form_messages() {
        let payload: UpsertDoctor = serde_json::from_value(serde_json::json!({
            "name": "Ana Souza",
            "specialty": "Cardiologia",
            "appointment_price_in_cents": 15000,
            "available_to_week_day": 5,
            "available_to_time": "18:00",
        }))
        .expect("missing fields fall back to defaults");

        let errors = payload.trimmed().check().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(
            fields["available_from_time"][0].message.as_deref(),
            Some("Hora de início é obrigatória.")
        );
        assert_eq!(
            fields["available_from_week_day"][0].message.as_deref(),
            Some("Dia inicial de disponibilidade é obrigatório.")
        );
        assert!(!fields.contains_key("available_to_week_day"));
    }

    #[test]
    fn stored_row_converts_to_window() {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            clinic_id: Uuid::new_v4(),
            name: "Ana".to_string(),
            avatar_image_url: None,
            specialty: "Pediatria".to_string(),
            appointment_price_in_cents: 10000,
            available_from_week_day: 5,
            available_to_week_day: 1,
            available_from_time: time::macros::time!(8:00),
            available_to_time: time::macros::time!(18:00),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: None,
        };
        let window = AvailabilityWindow::try_from(&doctor).unwrap();
        assert!(window.wraps_week());

        let broken = Doctor {
            available_from_week_day: 9,
            ..doctor
        };
        assert_eq!(
            broken.availability(),
            Err(AvailabilityError::InvalidWeekday(9))
        );
    }
}
