//! Domain error types for Board Checker.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! `AppError` renders as an HTML page for the browser surface; `ApiError` wraps it
//! for the JSON API.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};

use crate::views;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Browser route reached without a session user
    #[error("Login required")]
    LoginRequired,

    /// Photo store operation failed
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Multipart body exceeded the configured cap
    #[error("Upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    /// Zip assembly failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Any other server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::FileSystem(_)
                | AppError::Archive(_)
                | AppError::Internal(_)
        )
    }

    /// Message that is safe to show to a client.
    fn public_message(&self) -> String {
        if self.is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        }
    }

    fn log(&self) {
        if self.is_server_error() {
            tracing::error!("{}", self);
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_)
            | AppError::FileSystem(_)
            | AppError::Archive(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        if let AppError::LoginRequired = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, "/user/login"))
                .finish();
        }

        let title = match self {
            AppError::NotFound(_) => "Page not found".to_string(),
            AppError::Unauthorized(_) => "Unauthorized".to_string(),
            _ => self.public_message(),
        };

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(&title, &self.public_message()))
    }
}

/// JSON surface wrapper around [`AppError`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AppError);

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        ApiError(AppError::Unauthorized(message.to_string()))
    }

    pub fn bad_request(message: &str) -> Self {
        ApiError(AppError::InvalidInput(message.to_string()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::LoginRequired => StatusCode::UNAUTHORIZED,
            ref inner => inner.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.0.log();

        let status = self.status_code();
        let message = match &self.0 {
            AppError::Unauthorized(msg) | AppError::InvalidInput(msg) => msg.clone(),
            AppError::LoginRequired => "Authorization Required".to_string(),
            other => other.public_message(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: ErrorDetail {
                code: status.as_u16(),
                message,
            },
        })
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Result alias for JSON handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// Conversion implementations for common error types

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileSystem(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::Archive(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::InvalidInput(format!("Multipart error: {}", err))
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", err))
    }
}
