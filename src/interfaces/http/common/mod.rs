//! Shared HTTP plumbing
//!
//! `ApiError` is the single place the domain error taxonomy turns into
//! HTTP statuses: 404 for missing resources, 400 for business-rule
//! violations, 500 (with details logged, never leaked) for database and
//! gateway failures.

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub use validated_json::ValidatedJson;

use crate::domain::DomainError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Domain error carrier implementing the route-boundary status mapping.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::SlotNotFound
            | DomainError::OutletNotFound
            | DomainError::OrderNotFound
            | DomainError::PaymentNotFound => StatusCode::NOT_FOUND,
            DomainError::Database(_) | DomainError::Gateway(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Infrastructure details stay in the logs.
    fn message(&self) -> String {
        match &self.0 {
            DomainError::Database(detail) => {
                error!(detail = %detail, "Database error");
                "Internal server error".to_string()
            }
            DomainError::Gateway(detail) => {
                error!(detail = %detail, "Payment gateway error");
                "Failed to create payment bill".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_map_to_404() {
        for e in [
            DomainError::SlotNotFound,
            DomainError::OutletNotFound,
            DomainError::OrderNotFound,
            DomainError::PaymentNotFound,
        ] {
            assert_eq!(ApiError(e).status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn business_rules_map_to_400() {
        for e in [
            DomainError::InvalidDate,
            DomainError::PastDate,
            DomainError::SameDayBooking,
            DomainError::DateTooFar,
            DomainError::OutsideHours,
            DomainError::CapacityFull,
            DomainError::SlotFull,
            DomainError::ItemUnavailable,
            DomainError::InvalidQuantity("x".into()),
            DomainError::InvalidCustomization("x".into()),
            DomainError::Validation("missing".into()),
        ] {
            assert_eq!(ApiError(e).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn infrastructure_errors_map_to_500_and_hide_details() {
        let e = ApiError(DomainError::Database("password=hunter2 leaked".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!e.message().contains("hunter2"));

        let e = ApiError(DomainError::Gateway("secret key rejected".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message(), "Failed to create payment bill");
    }
}
