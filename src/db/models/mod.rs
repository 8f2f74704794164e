mod appointment;
mod clinic;
mod doctor;
mod patient;

use std::borrow::Cow;
use validator::ValidationError;

pub use appointment::*;
pub use clinic::*;
pub use doctor::*;
pub use patient::*;

/// Validation error carrying a human-readable message
pub(crate) fn field_error(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
