//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use super::dto::*;
use crate::application::booking::BookingService;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/dine-in",
    tag = "Reservations",
    request_body = DineInReservationRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Business-rule violation", body = ErrorBody),
        (status = 404, description = "Outlet or slot not found", body = ErrorBody),
        (status = 500, description = "Bill creation failed", body = ErrorBody)
    )
)]
pub async fn create_dine_in(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<DineInReservationRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let outcome = state.booking.create_dine_in(request.into_booking()).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/takeaway",
    tag = "Reservations",
    request_body = TakeawayReservationRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Business-rule violation", body = ErrorBody),
        (status = 404, description = "Outlet or slot not found", body = ErrorBody),
        (status = 500, description = "Bill creation failed", body = ErrorBody)
    )
)]
pub async fn create_takeaway(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<TakeawayReservationRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let outcome = state.booking.create_takeaway(request.into_booking()).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/delivery",
    tag = "Reservations",
    request_body = DeliveryReservationRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Business-rule violation", body = ErrorBody),
        (status = 404, description = "Outlet not found", body = ErrorBody),
        (status = 500, description = "Bill creation failed", body = ErrorBody)
    )
)]
pub async fn create_delivery(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<DeliveryReservationRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let outcome = state.booking.create_delivery(request.into_booking()).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{order_no}",
    tag = "Reservations",
    params(("order_no" = String, Path, description = "Human-readable order number")),
    responses(
        (status = 200, description = "Order details", body = OrderDto),
        (status = 404, description = "Order not found", body = ErrorBody)
    )
)]
pub async fn get_order(
    State(state): State<ReservationAppState>,
    Path(order_no): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let order = state.booking.get_order(&order_no).await?;
    Ok(Json(order.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = CancelResponse),
        (status = 400, description = "Order no longer cancellable", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody)
    )
)]
pub async fn cancel_order(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<CancelResponse>, ApiError> {
    let order = state.booking.cancel_order(&id).await?;
    Ok(Json(CancelResponse {
        success: true,
        message: "Order cancelled successfully".to_string(),
        order: order.into(),
    }))
}
