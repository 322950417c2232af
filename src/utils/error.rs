use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::Request;
use rocket::Response;
use rocket_okapi::JsonSchema;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Flight is fully booked")]
    FlightFull,

    #[error("Operation timed out")]
    Timeout,
}

impl AppError {
    pub fn validation(message: &str) -> Self {
        AppError::ValidationError(message.to_string())
    }

    pub fn not_found(message: &str) -> Self {
        AppError::NotFound(message.to_string())
    }
}

/// Constraint class of a failed write, read from the driver's error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Unique,
    ForeignKey,
    Other,
}

impl StorageErrorKind {
    pub fn of(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => StorageErrorKind::Unique,
                sqlx::error::ErrorKind::ForeignKeyViolation => StorageErrorKind::ForeignKey,
                _ => StorageErrorKind::Other,
            },
            _ => StorageErrorKind::Other,
        }
    }
}

/// Translate a write failure into the domain error the caller expects for each
/// constraint class. Everything else stays a database error.
pub fn classify_write(err: sqlx::Error, on_unique: AppError, on_foreign_key: AppError) -> AppError {
    match StorageErrorKind::of(&err) {
        StorageErrorKind::Unique => on_unique,
        StorageErrorKind::ForeignKey => on_foreign_key,
        StorageErrorKind::Other => AppError::from(err),
    }
}

// Convert sqlx::Error (database error) to AppError::DatabaseError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

// Field messages are sorted so the same input always yields the same error text
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("invalid {}", field),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        messages.sort();
        messages.dedup();
        AppError::ValidationError(messages.join("; "))
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

// Format all error from route level to a Http Response at route level
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = match self {
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::DatabaseError(_) => Status::InternalServerError,
            AppError::Conflict(_) => Status::Conflict,
            AppError::FlightFull => Status::Conflict,
            AppError::Timeout => Status::GatewayTimeout,
        };

        let json = json!({
            "error": self.to_string()
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
