use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(DatabaseError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(DatabaseError::Duplicate) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::Database(DatabaseError::NotFound) => "Resource not found",
            AppError::Database(DatabaseError::Duplicate) => "Resource already exists",
            AppError::Validation(_) => "Validation error",
            AppError::BadRequest(_) => "Bad request",
            _ => "An internal server error occurred",
        }
    }
}

/// Field name to its messages, in the order the checks ran
fn field_messages(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, errors) in errors.field_errors() {
        let messages = errors
            .iter()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string())
            })
            .map(Value::String)
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(fields)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internals stay in the logs
        let details = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            None
        } else {
            Some(self.to_string())
        };

        let mut error = json!({
            "message": self.public_message(),
            "details": details,
        });
        if let AppError::Validation(errors) = &self {
            error["fields"] = field_messages(errors);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
