//! Recurring weekly availability of a doctor: a weekday range plus a
//! time-of-day range.
//!
//! Weekdays are Sunday-first (0 = Sunday … 6 = Saturday). Times travel as
//! zero-padded `HH:MM:SS` strings; because of the fixed width, comparing the
//! strings and comparing seconds since midnight agree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{OffsetDateTime, Time};

use crate::fluent_args;
use crate::i18n::{Localizer, SupportedLanguage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("O horário de término deve ser posterior ao horário de início.")]
    EndBeforeStart,

    #[error("Dia da semana inválido: {0}")]
    InvalidWeekday(i64),

    #[error("Horário inválido: {0}")]
    InvalidTimeFormat(String),
}

impl AvailabilityError {
    /// Stable code for form layers
    pub fn code(&self) -> &'static str {
        match self {
            AvailabilityError::EndBeforeStart => "end_before_start",
            AvailabilityError::InvalidWeekday(_) => "invalid_weekday",
            AvailabilityError::InvalidTimeFormat(_) => "invalid_time_format",
        }
    }
}

/// Input field an availability error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityField {
    FromWeekday,
    ToWeekday,
    FromTime,
    ToTime,
}

impl AvailabilityField {
    /// Field name as used by the doctor upsert payload
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityField::FromWeekday => "available_from_week_day",
            AvailabilityField::ToWeekday => "available_to_week_day",
            AvailabilityField::FromTime => "available_from_time",
            AvailabilityField::ToTime => "available_to_time",
        }
    }
}

impl fmt::Display for AvailabilityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`AvailabilityError`] attached to the input that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {error}")]
pub struct AvailabilityViolation {
    pub field: AvailabilityField,
    #[source]
    pub error: AvailabilityError,
}

impl AvailabilityViolation {
    fn new(field: AvailabilityField, error: AvailabilityError) -> Self {
        Self { field, error }
    }
}

/// Sunday-first weekday index in `0..=6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Weekday(u8);

impl Weekday {
    pub const SUNDAY: Weekday = Weekday(0);
    pub const MONDAY: Weekday = Weekday(1);
    pub const TUESDAY: Weekday = Weekday(2);
    pub const WEDNESDAY: Weekday = Weekday(3);
    pub const THURSDAY: Weekday = Weekday(4);
    pub const FRIDAY: Weekday = Weekday(5);
    pub const SATURDAY: Weekday = Weekday(6);

    pub fn index(self) -> u8 {
        self.0
    }

    /// Fluent message id of the weekday name
    pub fn message_key(self) -> &'static str {
        match self.0 {
            0 => "weekday-sunday",
            1 => "weekday-monday",
            2 => "weekday-tuesday",
            3 => "weekday-wednesday",
            4 => "weekday-thursday",
            5 => "weekday-friday",
            _ => "weekday-saturday",
        }
    }

    pub fn name(self, localizer: &Localizer, language: SupportedLanguage) -> String {
        localizer.text(&language, self.message_key())
    }
}

impl TryFrom<i64> for Weekday {
    type Error = AvailabilityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(index) if index <= 6 => Ok(Weekday(index)),
            _ => Err(AvailabilityError::InvalidWeekday(value)),
        }
    }
}

impl From<Weekday> for i64 {
    fn from(weekday: Weekday) -> Self {
        i64::from(weekday.0)
    }
}

impl From<time::Weekday> for Weekday {
    fn from(weekday: time::Weekday) -> Self {
        Weekday(weekday.number_days_from_sunday())
    }
}

/// Time of day with second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    pub fn as_time(self) -> Time {
        self.0
    }

    pub fn seconds_since_midnight(self) -> u32 {
        let (h, m, s) = self.0.as_hms();
        u32::from(h) * 3600 + u32::from(m) * 60 + u32::from(s)
    }

    /// `HH:MM`, seconds dropped
    pub fn hh_mm(self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl From<Time> for TimeOfDay {
    fn from(time: Time) -> Self {
        let (h, m, s) = time.as_hms();
        // Sub-second precision is not part of the model.
        TimeOfDay(Time::from_hms(h, m, s).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.0.as_hms();
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`, two digits per component.
impl FromStr for TimeOfDay {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AvailabilityError::InvalidTimeFormat(s.to_string());

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut components = [0u8; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        let [hour, minute, second] = components;
        Time::from_hms(hour, minute, second)
            .map(TimeOfDay)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = AvailabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Normalize a minute- or second-precision time string to `HH:MM:SS`
pub fn normalize_time(input: &str) -> Result<String, AvailabilityError> {
    input.parse::<TimeOfDay>().map(|time| time.to_string())
}

/// Localized strings for the availability badges of a doctor card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityDisplay {
    pub from_weekday: String,
    pub to_weekday: String,
    pub from_time: String,
    pub to_time: String,
    pub days_label: String,
    pub hours_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub from_weekday: Weekday,
    pub to_weekday: Weekday,
    pub from_time: TimeOfDay,
    pub to_time: TimeOfDay,
}

impl AvailabilityWindow {
    pub fn new(
        from_weekday: Weekday,
        to_weekday: Weekday,
        from_time: TimeOfDay,
        to_time: TimeOfDay,
    ) -> Self {
        Self {
            from_weekday,
            to_weekday,
            from_time,
            to_time,
        }
    }

    /// Build a window from raw form or row values.
    ///
    /// Only checks ranges and formats; ordering of the times is left to
    /// [`AvailabilityWindow::validate`].
    pub fn parse(
        from_weekday: i64,
        to_weekday: i64,
        from_time: &str,
        to_time: &str,
    ) -> Result<Self, AvailabilityViolation> {
        let from_weekday = Weekday::try_from(from_weekday)
            .map_err(|e| AvailabilityViolation::new(AvailabilityField::FromWeekday, e))?;
        let to_weekday = Weekday::try_from(to_weekday)
            .map_err(|e| AvailabilityViolation::new(AvailabilityField::ToWeekday, e))?;
        let from_time = from_time
            .parse()
            .map_err(|e| AvailabilityViolation::new(AvailabilityField::FromTime, e))?;
        let to_time = to_time
            .parse()
            .map_err(|e| AvailabilityViolation::new(AvailabilityField::ToTime, e))?;

        Ok(Self::new(from_weekday, to_weekday, from_time, to_time))
    }

    /// The end time must come strictly after the start time on the same day
    pub fn validate(&self) -> Result<(), AvailabilityViolation> {
        if self.from_time < self.to_time {
            Ok(())
        } else {
            Err(AvailabilityViolation::new(
                AvailabilityField::ToTime,
                AvailabilityError::EndBeforeStart,
            ))
        }
    }

    pub fn wraps_week(&self) -> bool {
        self.from_weekday > self.to_weekday
    }

    /// Whether a slot on `weekday` at `time` falls inside the window.
    ///
    /// A window whose start weekday comes after its end weekday (Friday to
    /// Monday) wraps over the weekend. In that case the time bounds only
    /// apply on the two boundary days and the days in between are fully
    /// available. The wrap-around policy has not been confirmed against
    /// booking behaviour.
    pub fn contains(&self, weekday: Weekday, time: TimeOfDay) -> bool {
        if !self.wraps_week() {
            return (self.from_weekday..=self.to_weekday).contains(&weekday)
                && (self.from_time..=self.to_time).contains(&time);
        }

        if weekday == self.from_weekday {
            time >= self.from_time
        } else if weekday == self.to_weekday {
            time <= self.to_time
        } else {
            weekday > self.from_weekday || weekday < self.to_weekday
        }
    }

    /// [`AvailabilityWindow::contains`] for a concrete instant, in the
    /// instant's own offset
    pub fn contains_datetime(&self, at: OffsetDateTime) -> bool {
        self.contains(at.weekday().into(), at.time().into())
    }

    pub fn describe(&self, localizer: &Localizer, language: SupportedLanguage) -> AvailabilityDisplay {
        let from_weekday = self.from_weekday.name(localizer, language);
        let to_weekday = self.to_weekday.name(localizer, language);
        let from_time = self.from_time.hh_mm();
        let to_time = self.to_time.hh_mm();

        let days_label = localizer.text_with_args(
            &language,
            "availability-days",
            &fluent_args! { "from" => from_weekday.as_str(), "to" => to_weekday.as_str() },
        );
        let hours_label = localizer.text_with_args(
            &language,
            "availability-hours",
            &fluent_args! { "from" => from_time.as_str(), "to" => to_time.as_str() },
        );

        AvailabilityDisplay {
            from_weekday,
            to_weekday,
            from_time,
            to_time,
            days_label,
            hours_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::test_localizer;
    use time::macros::datetime;

    fn t(s: &str) -> TimeOfDay {
        s.parse().expect("valid time")
    }

    fn window(from: i64, to: i64, from_time: &str, to_time: &str) -> AvailabilityWindow {
        AvailabilityWindow::parse(from, to, from_time, to_time).expect("valid window")
    }

    #[test]
    fn validate_accepts_start_before_end() {
        for (from, to) in [
            ("00:00:00", "00:00:01"),
            ("08:00:00", "18:00:00"),
            ("09:59:59", "10:00:00"),
            ("05:00:00", "23:30:00"),
        ] {
            assert_eq!(window(1, 5, from, to).validate(), Ok(()), "{from} -> {to}");
        }
    }

    #[test]
    fn validate_rejects_end_not_after_start() {
        for (from, to) in [
            ("08:00:00", "08:00:00"),
            ("18:00:00", "08:00:00"),
            ("23:59:59", "00:00:00"),
        ] {
            let violation = window(1, 5, from, to).validate().unwrap_err();
            assert_eq!(violation.error, AvailabilityError::EndBeforeStart);
            assert_eq!(violation.field, AvailabilityField::ToTime);
            assert_eq!(violation.field.as_str(), "available_to_time");
        }
    }

    #[test]
    fn parse_rejects_out_of_range_weekdays() {
        let err = AvailabilityWindow::parse(7, 1, "08:00:00", "18:00:00").unwrap_err();
        assert_eq!(err.field, AvailabilityField::FromWeekday);
        assert_eq!(err.error, AvailabilityError::InvalidWeekday(7));

        let err = AvailabilityWindow::parse(1, -1, "08:00:00", "18:00:00").unwrap_err();
        assert_eq!(err.field, AvailabilityField::ToWeekday);
        assert_eq!(err.error, AvailabilityError::InvalidWeekday(-1));
    }

    #[test]
    fn parse_rejects_malformed_times() {
        for bad in ["8:00:00", "24:00:00", "12:60", "12:00:61", "noon", "12", "12:00:00:00", ""] {
            let err = AvailabilityWindow::parse(1, 5, bad, "18:00:00").unwrap_err();
            assert_eq!(err.field, AvailabilityField::FromTime, "{bad:?}");
            assert_eq!(err.error.code(), "invalid_time_format");
        }
    }

    #[test]
    fn normalizing_minute_precision_is_idempotent() {
        let once = normalize_time("08:00").unwrap();
        assert_eq!(once, "08:00:00");
        assert_eq!(normalize_time(&once).unwrap(), once);
        assert_eq!(normalize_time("17:30:15").unwrap(), "17:30:15");
    }

    #[test]
    fn string_order_matches_time_order() {
        let samples = ["00:00:00", "05:30:00", "08:00:00", "08:00:01", "12:00:00", "23:59:59"];
        for a in samples {
            for b in samples {
                assert_eq!(a.cmp(b), t(a).cmp(&t(b)), "{a} vs {b}");
                assert_eq!(
                    t(a).seconds_since_midnight().cmp(&t(b).seconds_since_midnight()),
                    a.cmp(b)
                );
            }
        }
    }

    #[test]
    fn contains_on_a_single_day_window() {
        let monday = window(1, 1, "08:00:00", "18:00:00");
        assert!(monday.contains(Weekday::MONDAY, t("09:00:00")));
        assert!(monday.contains(Weekday::MONDAY, t("08:00:00")));
        assert!(monday.contains(Weekday::MONDAY, t("18:00:00")));
        assert!(!monday.contains(Weekday::MONDAY, t("19:00:00")));
        assert!(!monday.contains(Weekday::SUNDAY, t("09:00:00")));
    }

    #[test]
    fn contains_applies_hours_every_day_of_a_weekday_range() {
        let weekdays = window(1, 5, "08:00:00", "18:00:00");
        assert!(weekdays.contains(Weekday::WEDNESDAY, t("12:00:00")));
        assert!(!weekdays.contains(Weekday::WEDNESDAY, t("07:59:59")));
        assert!(!weekdays.contains(Weekday::SATURDAY, t("12:00:00")));
    }

    #[test]
    fn contains_across_the_weekend() {
        let window = window(5, 1, "08:00:00", "18:00:00");
        assert!(window.wraps_week());
        assert!(window.contains(Weekday::SATURDAY, t("03:00:00")));
        assert!(window.contains(Weekday::SUNDAY, t("23:00:00")));
        assert!(!window.contains(Weekday::FRIDAY, t("07:00:00")));
        assert!(window.contains(Weekday::FRIDAY, t("22:00:00")));
        assert!(window.contains(Weekday::MONDAY, t("06:00:00")));
        assert!(!window.contains(Weekday::MONDAY, t("18:30:00")));
        assert!(!window.contains(Weekday::WEDNESDAY, t("12:00:00")));
    }

    #[test]
    fn contains_datetime_uses_local_weekday_and_time() {
        let weekdays = window(1, 5, "08:00:00", "18:00:00");
        // 2026-10-16 is a Friday
        assert!(weekdays.contains_datetime(datetime!(2026-10-16 09:30 -3)));
        assert!(!weekdays.contains_datetime(datetime!(2026-10-17 09:30 -3)));
        assert!(!weekdays.contains_datetime(datetime!(2026-10-16 18:00:01 UTC)));
    }

    #[test]
    fn describe_in_portuguese() {
        let localizer = test_localizer();
        let display = window(1, 5, "08:00:00", "18:30:00")
            .describe(&localizer, SupportedLanguage::Portuguese);

        assert_eq!(display.from_weekday, "Segunda");
        assert_eq!(display.to_weekday, "Sexta");
        assert_eq!(display.from_time, "08:00");
        assert_eq!(display.to_time, "18:30");
        assert_eq!(display.days_label, "Segunda a Sexta");
        assert_eq!(display.hours_label, "08:00 às 18:30");
    }

    #[test]
    fn describe_in_english() {
        let localizer = test_localizer();
        let display = window(0, 6, "08:00:00", "12:00:00")
            .describe(&localizer, SupportedLanguage::English);

        assert_eq!(display.from_weekday, "Sunday");
        assert_eq!(display.to_weekday, "Saturday");
        assert_eq!(display.days_label, "Sunday to Saturday");
        assert_eq!(display.hours_label, "08:00 to 12:00");
    }

    #[test]
    fn weekday_names_follow_the_sunday_first_index() {
        let localizer = test_localizer();
        let pt: Vec<String> = (0..7)
            .map(|i| Weekday::try_from(i).unwrap().name(&localizer, SupportedLanguage::Portuguese))
            .collect();
        assert_eq!(
            pt,
            ["Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"]
        );
        assert_eq!(
            Weekday::MONDAY.name(&localizer, SupportedLanguage::English),
            "Monday"
        );
    }

    #[test]
    fn serializes_as_index_and_padded_strings() {
        let window = window(5, 1, "08:00", "18:00");
        let json = serde_json::to_value(window).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from_weekday": 5,
                "to_weekday": 1,
                "from_time": "08:00:00",
                "to_time": "18:00:00",
            })
        );

        let bad = serde_json::json!({
            "from_weekday": 9,
            "to_weekday": 1,
            "from_time": "08:00:00",
            "to_time": "18:00:00",
        });
        assert!(serde_json::from_value::<AvailabilityWindow>(bad).is_err());
    }
}
