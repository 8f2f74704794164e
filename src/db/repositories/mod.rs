mod clinic_repository;
mod dashboard_repository;
mod doctor_repository;
mod patient_repository;

pub use clinic_repository::ClinicRepository;
pub use dashboard_repository::{DashboardRepository, Period};
pub use doctor_repository::DoctorRepository;
pub use patient_repository::PatientRepository;
