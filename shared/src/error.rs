use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("Book is not available for borrow.")]
    BookUnavailable,
    #[error("Book with the same ISBN already exists")]
    DuplicateIsbn,
    #[error("Borrower with the same email already exists")]
    DuplicateEmail,
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("Invalid date format for startDate or endDate")]
    InvalidDateFormat,
    #[error("failed to generate the report export: {0}")]
    ReportExportError(String),
    // sqlx::Error appears in more than one variant, so [source] instead of [from]
    #[error("failed to run the transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("an error occurred while executing a database operation")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
}

impl AppError {
    // first failing rule, the only one the client sees
    fn first_validation_message(report: &garde::Report) -> String {
        report
            .iter()
            .next()
            .map(|(path, error)| format!("{path}: {error}"))
            .unwrap_or_else(|| "Invalid request".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, body) = match &self {
            AppError::ValidationError(report) => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": Self::first_validation_message(report) }),
            ),
            AppError::InvalidRequestBody(message) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": message }))
            }
            AppError::EntityNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            AppError::BookUnavailable => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::DuplicateIsbn | AppError::DuplicateEmail => {
                (StatusCode::CONFLICT, json!({ "error": self.to_string() }))
            }
            AppError::UnprocessableEntity(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string() }),
            ),
            AppError::ConvertToUuidError(_) | AppError::InvalidDateFormat => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ReportExportError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };
        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
