//! Outlet and availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::*;
use crate::application::booking::AvailabilityService;
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ErrorBody};

/// Application state for outlet handlers.
#[derive(Clone)]
pub struct OutletsAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub availability: Arc<AvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets",
    tag = "Outlets",
    responses(
        (status = 200, description = "Active outlets", body = Vec<OutletDto>)
    )
)]
pub async fn list_outlets(
    State(state): State<OutletsAppState>,
) -> Result<Json<Vec<OutletDto>>, ApiError> {
    let outlets = state.repos.outlets().find_active().await?;
    Ok(Json(outlets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets/{id}",
    tag = "Outlets",
    params(("id" = String, Path, description = "Outlet ID")),
    responses(
        (status = 200, description = "Outlet with tables and slots", body = OutletDetailDto),
        (status = 404, description = "Outlet not found", body = ErrorBody)
    )
)]
pub async fn get_outlet(
    State(state): State<OutletsAppState>,
    Path(id): Path<String>,
) -> Result<Json<OutletDetailDto>, ApiError> {
    let outlet = state
        .repos
        .outlets()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::OutletNotFound)?;

    let tables = state.repos.tables().find_for_outlet(&id, None).await?;
    let time_slots = state.repos.time_slots().find_active_for_outlet(&id).await?;

    Ok(Json(OutletDetailDto {
        outlet: outlet.into(),
        tables: tables.into_iter().map(Into::into).collect(),
        time_slots: time_slots.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets/{id}/slots",
    tag = "Outlets",
    params(("id" = String, Path, description = "Outlet ID"), SlotsQuery),
    responses(
        (status = 200, description = "Capacity-annotated slots (shape depends on type)", body = Vec<DineInSlotDto>),
        (status = 400, description = "Date outside the booking window", body = ErrorBody),
        (status = 404, description = "Outlet not found", body = ErrorBody)
    )
)]
pub async fn list_slots(
    State(state): State<OutletsAppState>,
    Path(id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Response, ApiError> {
    let date = query.date.as_deref();

    if query.slot_type.as_deref() == Some("dine_in") {
        let slots = state.availability.dine_in_slots(&id, date).await?;
        let dtos: Vec<DineInSlotDto> = slots.into_iter().map(Into::into).collect();
        return Ok(Json(dtos).into_response());
    }

    let slots = state.availability.takeaway_slots(&id, date).await?;
    let dtos: Vec<TakeawaySlotDto> = slots.into_iter().map(Into::into).collect();
    Ok(Json(dtos).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets/{id}/tables",
    tag = "Outlets",
    params(("id" = String, Path, description = "Outlet ID"), TablesQuery),
    responses(
        (status = 200, description = "Tables with availability for the date", body = Vec<TableDto>),
        (status = 400, description = "Date outside the booking window", body = ErrorBody)
    )
)]
pub async fn list_tables(
    State(state): State<OutletsAppState>,
    Path(id): Path<String>,
    Query(query): Query<TablesQuery>,
) -> Result<Json<Vec<TableDto>>, ApiError> {
    let tables = state
        .availability
        .tables(&id, query.date.as_deref(), query.zone.as_deref())
        .await?;
    Ok(Json(tables.into_iter().map(Into::into).collect()))
}
