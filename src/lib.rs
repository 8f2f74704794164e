pub mod app;
pub mod app_state;
pub mod availability;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod modules;
pub mod session;
pub mod specialty;
pub mod telemetry;
