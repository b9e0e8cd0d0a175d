//! API Router with Swagger UI

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::booking::{AvailabilityService, BookingService};
use crate::application::payments::PaymentService;
use crate::domain::RepositoryProvider;

use super::common::ErrorBody;
use super::modules::health::handlers as health;
use super::modules::metrics::{handlers as metrics, MetricsAppState};
use super::modules::outlets::{self, handlers as outlet_handlers, OutletsAppState};
use super::modules::payments::{self, handlers as payment_handlers, PaymentsAppState};
use super::modules::reservations::{self, handlers as reservation_handlers, ReservationAppState};

/// Everything the router needs, wired up in `main`.
pub struct AppContext {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
    pub availability: Arc<AvailabilityService>,
    pub prometheus: PrometheusHandle,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservation_handlers::create_dine_in,
        reservation_handlers::create_takeaway,
        reservation_handlers::create_delivery,
        reservation_handlers::get_order,
        reservation_handlers::cancel_order,
        // Payments
        payment_handlers::payment_callback,
        payment_handlers::payment_status,
        payment_handlers::complete_payment,
        // Outlets
        outlet_handlers::list_outlets,
        outlet_handlers::get_outlet,
        outlet_handlers::list_slots,
        outlet_handlers::list_tables,
    ),
    components(schemas(
        ErrorBody,
        health::HealthResponse,
        reservations::dto::DineInReservationRequest,
        reservations::dto::TakeawayReservationRequest,
        reservations::dto::DeliveryReservationRequest,
        reservations::dto::CartLineDto,
        reservations::dto::CustomizationChoiceDto,
        reservations::dto::CustomizationDto,
        reservations::dto::OrderLineDto,
        reservations::dto::OrderDto,
        reservations::dto::BookingResponse,
        reservations::dto::CancelResponse,
        payments::dto::CallbackRequest,
        payments::dto::CallbackResponse,
        payments::dto::PaymentStatusResponse,
        payments::dto::CompletePaymentResponse,
        outlets::dto::OutletDto,
        outlets::dto::OutletDetailDto,
        outlets::dto::TimeSlotDto,
        outlets::dto::PlainTableDto,
        outlets::dto::TableDto,
        outlets::dto::TableBookingDto,
        outlets::dto::DineInSlotDto,
        outlets::dto::TakeawaySlotDto,
    )),
    tags(
        (name = "Reservations", description = "Booking creation and lookup"),
        (name = "Payments", description = "Gateway callback and status"),
        (name = "Outlets", description = "Outlets and availability"),
        (name = "Health", description = "Liveness"),
    ),
    info(
        title = "Reservation Service API",
        description = "Capacity-safe restaurant booking backend",
    )
)]
struct ApiDoc;

/// Build the full application router.
pub fn create_api_router(ctx: AppContext) -> Router {
    let reservations_router = Router::new()
        .route(
            "/reservations/dine-in",
            post(reservation_handlers::create_dine_in),
        )
        .route(
            "/reservations/takeaway",
            post(reservation_handlers::create_takeaway),
        )
        .route(
            "/reservations/delivery",
            post(reservation_handlers::create_delivery),
        )
        .route(
            "/reservations/{order_no}",
            get(reservation_handlers::get_order),
        )
        .route(
            "/reservations/{id}/cancel",
            put(reservation_handlers::cancel_order),
        )
        .with_state(ReservationAppState {
            booking: ctx.booking.clone(),
        });

    let payments_router = Router::new()
        .route("/payments/callback", post(payment_handlers::payment_callback))
        .route(
            "/payments/status/{bill_code}",
            get(payment_handlers::payment_status),
        )
        .route(
            "/payments/complete/{order_no}",
            post(payment_handlers::complete_payment),
        )
        .with_state(PaymentsAppState {
            payments: ctx.payments.clone(),
        });

    let outlets_router = Router::new()
        .route("/outlets", get(outlet_handlers::list_outlets))
        .route("/outlets/{id}", get(outlet_handlers::get_outlet))
        .route("/outlets/{id}/slots", get(outlet_handlers::list_slots))
        .route("/outlets/{id}/tables", get(outlet_handlers::list_tables))
        .with_state(OutletsAppState {
            repos: ctx.repos.clone(),
            availability: ctx.availability.clone(),
        });

    let health_router = Router::new().route("/health", get(health::health_check));

    let metrics_router = Router::new()
        .route("/metrics", get(metrics::render_metrics))
        .with_state(MetricsAppState {
            handle: ctx.prometheus,
        });

    Router::new()
        .nest(
            "/api/v1",
            reservations_router
                .merge(payments_router)
                .merge(outlets_router)
                .merge(health_router),
        )
        .merge(metrics_router)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
