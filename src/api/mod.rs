// src/api/mod.rs
pub mod extended;
pub mod process;
pub mod upload;

// Re-export all route functions
pub use extended::*;
pub use process::*;
pub use upload::*;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Serialize;

use crate::errors::ValidationError;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Machine-readable kind plus a human-readable message, on every error
/// response.
#[derive(Serialize, Clone)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(kind: &str, message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                kind: kind.to_string(),
                message,
            }),
        }
    }
}

pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, Custom<Json<ApiResponse<T>>>>;

/// Caller input errors are 4xx; collaborator/internal failures are 5xx.
/// Per-company failures are row data, never call failures.
pub fn bad_request<T>(err: &ValidationError) -> Custom<Json<ApiResponse<T>>> {
    Custom(
        Status::BadRequest,
        Json(ApiResponse::error(err.kind(), err.to_string())),
    )
}

pub fn internal_error<T>(message: String) -> Custom<Json<ApiResponse<T>>> {
    Custom(
        Status::InternalServerError,
        Json(ApiResponse::error("internal", message)),
    )
}
