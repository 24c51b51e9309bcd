// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Each step of the ingest chain has its own variant, so the error
//! discriminant itself tells the caller which step failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required field(s): {0}")]
    Validation(String),

    #[error("Malformed track document: {0}")]
    MalformedTrack(String),

    #[error("Track has too few points for a line geometry ({0})")]
    InsufficientGeometry(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Timed out during {0}")]
    Timeout(&'static str),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(fields.clone()),
            ),
            AppError::MalformedTrack(msg) => (
                StatusCode::BAD_REQUEST,
                "malformed_track",
                Some(msg.clone()),
            ),
            AppError::InsufficientGeometry(count) => (
                StatusCode::BAD_REQUEST,
                "insufficient_geometry",
                Some(format!("{} point(s)", count)),
            ),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::BAD_GATEWAY, "storage_error", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Timeout(step) => {
                tracing::error!(step, "External call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "timeout",
                    Some((*step).to_string()),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<crate::services::gpx::GpxError> for AppError {
    fn from(err: crate::services::gpx::GpxError) -> Self {
        match err {
            crate::services::gpx::GpxError::Malformed(msg) => AppError::MalformedTrack(msg),
        }
    }
}

impl From<crate::services::geometry::GeometryError> for AppError {
    fn from(err: crate::services::geometry::GeometryError) -> Self {
        use crate::services::geometry::GeometryError;
        match err {
            GeometryError::InsufficientPoints(count) => AppError::InsufficientGeometry(count),
            // Only the read path decodes, so invalid text means the stored
            // geometry is corrupt, not that the caller sent bad input
            GeometryError::Invalid(msg) => {
                AppError::Database(format!("Corrupt stored geometry: {}", msg))
            }
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
