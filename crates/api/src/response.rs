//! Success/failure envelopes.
//!
//! Every dashboard endpoint answers with `{"success": bool, "data": ...}`.
//! Failures carry a plain message string as `data`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use infotrack_core::DashboardError;
use infotrack_shared::{AppError, NonceError};

/// Message returned when the nonce check fails.
pub const INVALID_NONCE_MESSAGE: &str = "Invalid or expired nonce";

/// Response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success, message on failure.
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wraps a successful payload.
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl Envelope<String> {
    /// Wraps a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Error converted into a failure envelope at the handler boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Envelope::failure(self.0.message())).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::PermissionDenied => {
                Self(AppError::Forbidden(DashboardError::PermissionDenied.to_string()))
            }
            DashboardError::Provider { source, .. } => {
                Self(AppError::ExternalService(source.to_string()))
            }
        }
    }
}

impl From<NonceError> for ApiError {
    fn from(_: NonceError) -> Self {
        Self(AppError::Forbidden(INVALID_NONCE_MESSAGE.to_string()))
    }
}
