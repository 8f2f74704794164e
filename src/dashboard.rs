//! Numbers and series behind the clinic dashboard.
//!
//! Everything here except [`Dashboard::load`] is pure shaping over rows the
//! repository returns, so the view logic is testable without a database.

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};
use uuid::Uuid;

use crate::db::{
    AppointmentSummary, DailyAppointments, DashboardRepository, DatabaseError, DoctorAppointments,
    Period, SpecialtyAppointments,
};
use crate::specialty::{MedicalSpecialty, SpecialtyIcon};

pub const CHART_DAYS_BEFORE: i64 = 10;
pub const CHART_DAYS_AFTER: i64 = 10;
pub const TOP_DOCTORS_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Range ends ({to}) before it starts ({from})")]
    Reversed { from: String, to: String },
}

/// Inclusive range of calendar days selected in the date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Today through the same day next month
    pub fn starting(today: Date) -> Self {
        Self {
            from: today,
            to: add_one_month(today),
        }
    }

    /// `Ok(None)` when a bound is missing or empty; the page then redirects
    /// to the default range
    pub fn from_query(from: Option<&str>, to: Option<&str>) -> Result<Option<Self>, DateRangeError> {
        let (Some(from), Some(to)) = (
            from.filter(|s| !s.trim().is_empty()),
            to.filter(|s| !s.trim().is_empty()),
        ) else {
            return Ok(None);
        };

        let range = Self {
            from: parse_date(from)?,
            to: parse_date(to)?,
        };
        if range.to < range.from {
            return Err(DateRangeError::Reversed {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Some(range))
    }

    /// Appointment instants covered by the range, days taken in UTC
    pub fn period(&self) -> Period {
        Period {
            start: self.from.midnight().assume_utc(),
            end: self.to.saturating_add(Duration::DAY).midnight().assume_utc(),
        }
    }

    pub fn query_string(&self) -> String {
        format!("from={}&to={}", iso_date(self.from), iso_date(self.to))
    }
}

fn parse_date(input: &str) -> Result<Date, DateRangeError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| DateRangeError::InvalidDate(input.to_string()))
}

/// Same day next month, clamped to the last day of a shorter month
pub fn add_one_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

fn day_month(date: Date) -> String {
    format!("{:02}/{:02}", date.day(), u8::from(date.month()))
}

/// Brazilian real formatting of an amount in cents: `R$ 1.234,56`
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let reais = (cents / 100).to_string();

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, digit) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// Up to two uppercase initials from a person's name
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_revenue_in_cents: i64,
    pub total_revenue: String,
    pub total_appointments: i64,
    pub total_patients: i64,
    pub total_doctors: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// `DD/MM` axis label
    pub date: String,
    pub full_date: String,
    pub appointments: i64,
    pub revenue_in_cents: i64,
}

/// The days shown on the chart: ten before today, today, ten after
pub fn chart_days(today: Date) -> Vec<Date> {
    (-CHART_DAYS_BEFORE..=CHART_DAYS_AFTER)
        .map(|offset| today.saturating_add(Duration::days(offset)))
        .collect()
}

pub fn chart_period(today: Date) -> Period {
    DateRange {
        from: today.saturating_sub(Duration::days(CHART_DAYS_BEFORE)),
        to: today.saturating_add(Duration::days(CHART_DAYS_AFTER)),
    }
    .period()
}

/// One point per chart day; days without appointments are zero
pub fn build_chart(today: Date, rows: &[DailyAppointments]) -> Vec<ChartPoint> {
    chart_days(today)
        .into_iter()
        .map(|day| {
            let row = rows.iter().find(|row| row.day == day);
            ChartPoint {
                date: day_month(day),
                full_date: iso_date(day),
                appointments: row.map_or(0, |row| row.appointments),
                revenue_in_cents: row.map_or(0, |row| row.revenue),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDoctor {
    pub id: Uuid,
    pub name: String,
    pub initials: String,
    pub specialty: String,
    pub avatar_image_url: Option<String>,
    pub appointments: i64,
}

impl From<DoctorAppointments> for TopDoctor {
    fn from(row: DoctorAppointments) -> Self {
        Self {
            initials: initials(&row.name),
            id: row.id,
            name: row.name,
            specialty: row.specialty,
            avatar_image_url: row.avatar_image_url,
            appointments: row.appointments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyStat {
    pub specialty: String,
    pub appointments: i64,
    /// Share of the busiest specialty, 0–100
    pub progress: f64,
    pub icon: SpecialtyIcon,
    pub color_class: &'static str,
    pub progress_color: &'static str,
}

pub fn specialty_stats(rows: &[SpecialtyAppointments]) -> Vec<SpecialtyStat> {
    let max = rows.iter().map(|row| row.appointments).max().unwrap_or(0);

    rows.iter()
        .map(|row| {
            let specialty = MedicalSpecialty::from_label(&row.specialty);
            let color = specialty.color();
            let progress = if max > 0 {
                row.appointments as f64 / max as f64 * 100.0
            } else {
                0.0
            };
            SpecialtyStat {
                specialty: row.specialty.clone(),
                appointments: row.appointments,
                progress,
                icon: specialty.icon(),
                color_class: color.class,
                progress_color: color.progress,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub from: String,
    pub to: String,
    pub stats: DashboardStats,
    pub chart: Vec<ChartPoint>,
    pub top_doctors: Vec<TopDoctor>,
    pub top_specialties: Vec<SpecialtyStat>,
    pub today_appointments: Vec<AppointmentSummary>,
}

impl Dashboard {
    pub async fn load(
        pool: &PgPool,
        clinic_id: Uuid,
        range: DateRange,
        today: Date,
    ) -> Result<Self, DatabaseError> {
        let period = range.period();
        let today_period = DateRange { from: today, to: today }.period();

        let (revenue, appointments, patients, doctors, top_doctors, top_specialties, today_list, daily) =
            tokio::try_join!(
                DashboardRepository::total_revenue(pool, clinic_id, period),
                DashboardRepository::total_appointments(pool, clinic_id, period),
                DashboardRepository::total_patients(pool, clinic_id),
                DashboardRepository::total_doctors(pool, clinic_id),
                DashboardRepository::top_doctors(pool, clinic_id, period, TOP_DOCTORS_LIMIT),
                DashboardRepository::top_specialties(pool, clinic_id, period),
                DashboardRepository::appointments_in(pool, clinic_id, today_period),
                DashboardRepository::daily_appointments(pool, clinic_id, chart_period(today)),
            )?;

        Ok(Self {
            from: iso_date(range.from),
            to: iso_date(range.to),
            stats: DashboardStats {
                total_revenue_in_cents: revenue,
                total_revenue: format_currency(revenue),
                total_appointments: appointments,
                total_patients: patients,
                total_doctors: doctors,
            },
            chart: build_chart(today, &daily),
            top_doctors: top_doctors.into_iter().map(TopDoctor::from).collect(),
            top_specialties: specialty_stats(&top_specialties),
            today_appointments: today_list,
        })
    }
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_currency(0), "R$ 0,00");
        assert_eq!(format_currency(5), "R$ 0,05");
        assert_eq!(format_currency(15000), "R$ 150,00");
        assert_eq!(format_currency(123456), "R$ 1.234,56");
        assert_eq!(format_currency(123456789), "R$ 1.234.567,89");
        assert_eq!(format_currency(-2550), "-R$ 25,50");
    }

    #[test]
    fn initials_take_the_first_two_name_parts() {
        assert_eq!(initials("ana maria souza"), "AM");
        assert_eq!(initials("  Érico  "), "É");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn missing_bounds_mean_default_range() {
        assert_eq!(DateRange::from_query(None, Some("2026-10-01")), Ok(None));
        assert_eq!(DateRange::from_query(Some(""), Some("2026-10-01")), Ok(None));
    }

    #[test]
    fn parses_explicit_range() {
        let range = DateRange::from_query(Some("2026-10-01"), Some("2026-10-31"))
            .unwrap()
            .unwrap();
        assert_eq!(range.from, date!(2026 - 10 - 01));
        assert_eq!(range.query_string(), "from=2026-10-01&to=2026-10-31");

        let period = range.period();
        assert_eq!(period.start, datetime!(2026-10-01 0:00 UTC));
        assert_eq!(period.end, datetime!(2026-11-01 0:00 UTC));
    }

    #[test]
    fn rejects_bad_or_reversed_ranges() {
        assert_eq!(
            DateRange::from_query(Some("01/10/2026"), Some("2026-10-31")),
            Err(DateRangeError::InvalidDate("01/10/2026".to_string()))
        );
        assert!(matches!(
            DateRange::from_query(Some("2026-10-31"), Some("2026-10-01")),
            Err(DateRangeError::Reversed { .. })
        ));
    }

    #[test]
    fn default_range_spans_one_month() {
        assert_eq!(DateRange::starting(date!(2026 - 10 - 16)).to, date!(2026 - 11 - 16));
        assert_eq!(add_one_month(date!(2026 - 01 - 31)), date!(2026 - 02 - 28));
        assert_eq!(add_one_month(date!(2028 - 01 - 31)), date!(2028 - 02 - 29));
        assert_eq!(add_one_month(date!(2026 - 12 - 15)), date!(2027 - 01 - 15));
    }

    #[test]
    fn chart_covers_21_days_and_fills_gaps() {
        let today = date!(2026 - 10 - 16);
        let rows = vec![
            DailyAppointments {
                day: date!(2026 - 10 - 06),
                appointments: 2,
                revenue: 30000,
            },
            DailyAppointments {
                day: today,
                appointments: 1,
                revenue: 15000,
            },
            // Outside the window, ignored
            DailyAppointments {
                day: date!(2026 - 10 - 27),
                appointments: 9,
                revenue: 1,
            },
        ];

        let chart = build_chart(today, &rows);
        assert_eq!(chart.len(), 21);
        assert_eq!(chart[0].full_date, "2026-10-06");
        assert_eq!(chart[0].date, "06/10");
        assert_eq!(chart[0].appointments, 2);
        assert_eq!(chart[10].full_date, "2026-10-16");
        assert_eq!(chart[10].revenue_in_cents, 15000);
        assert_eq!(chart[20].full_date, "2026-10-26");
        assert_eq!(chart.iter().map(|p| p.appointments).sum::<i64>(), 3);

        let period = chart_period(today);
        assert_eq!(period.start, datetime!(2026-10-06 0:00 UTC));
        assert_eq!(period.end, datetime!(2026-10-27 0:00 UTC));
    }

    #[test]
    fn specialty_progress_is_relative_to_the_busiest() {
        let rows = vec![
            SpecialtyAppointments {
                specialty: "Cardiologia".to_string(),
                appointments: 8,
            },
            SpecialtyAppointments {
                specialty: "Medicina do Sono".to_string(),
                appointments: 2,
            },
        ];

        let stats = specialty_stats(&rows);
        assert_eq!(stats[0].progress, 100.0);
        assert_eq!(stats[0].icon, SpecialtyIcon::Heart);
        assert_eq!(stats[1].progress, 25.0);
        assert_eq!(stats[1].icon, SpecialtyIcon::Stethoscope);
        assert_eq!(stats[1].progress_color, "#3b82f6");
    }

    #[test]
    fn no_appointments_means_no_progress() {
        let rows = vec![SpecialtyAppointments {
            specialty: "Pediatria".to_string(),
            appointments: 0,
        }];
        assert_eq!(specialty_stats(&rows)[0].progress, 0.0);
    }
}
