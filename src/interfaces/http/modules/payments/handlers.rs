//! Payment HTTP handlers
//!
//! The callback endpoint is the gateway's webhook: it must accept
//! duplicate deliveries without double-processing and must never leak
//! internals back to the gateway.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Form, Json};

use super::dto::*;
use crate::application::payments::{CallbackOutcome, GatewayCallback, PaymentService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ErrorBody};

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/callback",
    tag = "Payments",
    request_body(content = CallbackRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Callback applied (idempotent)", body = CallbackResponse),
        (status = 400, description = "Malformed payload", body = ErrorBody),
        (status = 404, description = "Unknown bill code", body = ErrorBody)
    )
)]
pub async fn payment_callback(
    State(state): State<PaymentsAppState>,
    Form(request): Form<CallbackRequest>,
) -> Result<Json<CallbackResponse>, ApiError> {
    if request.billcode.is_empty() || request.status_id.is_empty() {
        return Err(DomainError::Validation(
            "Missing required callback parameters".to_string(),
        )
        .into());
    }

    let raw = serde_json::to_value(&request)
        .map_err(|e| DomainError::Validation(format!("Unreadable callback payload: {}", e)))?;

    let outcome = state
        .payments
        .process_callback(GatewayCallback {
            bill_code: request.billcode,
            status_id: request.status_id,
            transaction_id: request.transaction_id,
            raw,
        })
        .await?;

    let message = match outcome {
        CallbackOutcome::AlreadyProcessed => Some("Already processed".to_string()),
        CallbackOutcome::Processed => None,
    };

    Ok(Json(CallbackResponse {
        success: true,
        message,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/status/{bill_code}",
    tag = "Payments",
    params(("bill_code" = String, Path, description = "Gateway bill code")),
    responses(
        (status = 200, description = "Payment status", body = PaymentStatusResponse),
        (status = 404, description = "Payment not found", body = ErrorBody)
    )
)]
pub async fn payment_status(
    State(state): State<PaymentsAppState>,
    Path(bill_code): Path<String>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let (status, order) = state.payments.status_by_bill_code(&bill_code).await?;
    Ok(Json(PaymentStatusResponse {
        status: status.as_str().to_string(),
        order: order.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/complete/{order_no}",
    tag = "Payments",
    params(("order_no" = String, Path, description = "Human-readable order number")),
    responses(
        (status = 200, description = "Payment completed (idempotent)", body = CompletePaymentResponse),
        (status = 404, description = "Order or payment not found", body = ErrorBody)
    )
)]
pub async fn complete_payment(
    State(state): State<PaymentsAppState>,
    Path(order_no): Path<String>,
) -> Result<Json<CompletePaymentResponse>, ApiError> {
    let order = state.payments.complete_manual(&order_no).await?;
    Ok(Json(CompletePaymentResponse {
        success: true,
        message: "Payment completed successfully".to_string(),
        order: order.into(),
    }))
}
