pub mod clinics;
pub mod dashboard;
pub mod doctors;
pub mod html;
pub mod i18n;
pub mod patients;
