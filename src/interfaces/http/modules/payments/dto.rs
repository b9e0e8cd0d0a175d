//! Payment DTOs
//!
//! The gateway posts its callback form-encoded with these exact field
//! names; they are kept verbatim rather than camelCased.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::modules::reservations::dto::OrderDto;

/// ToyyibPay callback payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallbackRequest {
    pub billcode: String,
    pub status_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallbackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentStatusResponse {
    pub status: String,
    pub order: OrderDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompletePaymentResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderDto,
}
