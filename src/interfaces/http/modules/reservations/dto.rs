//! Reservation DTOs
//!
//! Wire format is camelCase for compatibility with the storefront client.
//! Money crosses the wire as JSON numbers; the authoritative decimals live
//! server-side only.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::booking::{
    BookingOutcome, CartLine, CustomerInfo, DeliveryRequest, DineInRequest, TakeawayRequest,
};
use crate::domain::{ChosenCustomization, Order, OrderLine};

fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// One chosen customization on a cart line. Only `value` (the option
/// identifier) is consulted; any client-supplied price fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CustomizationChoiceDto {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    #[validate(length(min = 1, message = "menu item id is required"))]
    pub id: String,
    pub quantity: u32,
    /// group key → chosen option
    pub customizations: Option<BTreeMap<String, CustomizationChoiceDto>>,
}

impl CartLineDto {
    fn into_cart_line(self) -> CartLine {
        CartLine {
            id: self.id,
            quantity: self.quantity,
            customizations: self.customizations.map(|groups| {
                groups
                    .into_iter()
                    .map(|(group, choice)| (group, choice.value))
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DineInReservationRequest {
    #[validate(length(min = 1, message = "outletId is required"))]
    pub outlet_id: String,
    #[validate(length(min = 1, message = "timeSlotId is required"))]
    pub time_slot_id: String,
    pub pax_count: i32,
    pub booking_date: Option<String>,
    #[validate(length(min = 1, max = 100, message = "customerName is required"))]
    pub customer_name: String,
    #[validate(email(message = "customerEmail must be a valid email"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 30, message = "customerPhone is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "Cart items are required"))]
    pub items: Vec<CartLineDto>,
    pub notes: Option<String>,
}

impl DineInReservationRequest {
    pub fn into_booking(self) -> DineInRequest {
        DineInRequest {
            outlet_id: self.outlet_id,
            time_slot_id: self.time_slot_id,
            pax_count: self.pax_count,
            booking_date: self.booking_date,
            customer: CustomerInfo {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            items: self.items.into_iter().map(CartLineDto::into_cart_line).collect(),
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TakeawayReservationRequest {
    #[validate(length(min = 1, message = "outletId is required"))]
    pub outlet_id: String,
    #[validate(length(min = 1, message = "timeSlotId is required"))]
    pub time_slot_id: String,
    pub booking_date: Option<String>,
    #[validate(length(min = 1, max = 100, message = "customerName is required"))]
    pub customer_name: String,
    #[validate(email(message = "customerEmail must be a valid email"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 30, message = "customerPhone is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "Cart items are required"))]
    pub items: Vec<CartLineDto>,
    pub notes: Option<String>,
}

impl TakeawayReservationRequest {
    pub fn into_booking(self) -> TakeawayRequest {
        TakeawayRequest {
            outlet_id: self.outlet_id,
            time_slot_id: self.time_slot_id,
            booking_date: self.booking_date,
            customer: CustomerInfo {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            items: self.items.into_iter().map(CartLineDto::into_cart_line).collect(),
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReservationRequest {
    #[validate(length(min = 1, message = "outletId is required"))]
    pub outlet_id: String,
    #[validate(length(min = 1, max = 500, message = "deliveryAddress is required"))]
    pub delivery_address: String,
    pub booking_date: Option<String>,
    #[validate(length(min = 1, max = 100, message = "customerName is required"))]
    pub customer_name: String,
    #[validate(email(message = "customerEmail must be a valid email"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 30, message = "customerPhone is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "Cart items are required"))]
    pub items: Vec<CartLineDto>,
    pub notes: Option<String>,
}

impl DeliveryReservationRequest {
    pub fn into_booking(self) -> DeliveryRequest {
        DeliveryRequest {
            outlet_id: self.outlet_id,
            delivery_address: self.delivery_address,
            booking_date: self.booking_date,
            customer: CustomerInfo {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            items: self.items.into_iter().map(CartLineDto::into_cart_line).collect(),
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationDto {
    pub group: String,
    pub value: String,
    pub label: String,
    pub price_modifier: f64,
}

impl From<ChosenCustomization> for CustomizationDto {
    fn from(c: ChosenCustomization) -> Self {
        Self {
            group: c.group,
            value: c.value,
            label: c.label,
            price_modifier: money(c.price_modifier),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub menu_item_id: String,
    pub name: String,
    pub base_price: f64,
    pub quantity: u32,
    pub customizations: Vec<CustomizationDto>,
    pub line_total: f64,
}

impl From<OrderLine> for OrderLineDto {
    fn from(line: OrderLine) -> Self {
        Self {
            menu_item_id: line.menu_item_id,
            name: line.name,
            base_price: money(line.base_price),
            quantity: line.quantity,
            customizations: line.customizations.into_iter().map(Into::into).collect(),
            line_total: money(line.line_total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub order_no: String,
    pub outlet_id: String,
    pub fulfillment_type: String,
    pub booking_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pax_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderLineDto>,
    pub subtotal: f64,
    pub sst: f64,
    pub booking_fee: f64,
    pub delivery_fee: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            order_no: o.order_no,
            outlet_id: o.outlet_id,
            fulfillment_type: o.fulfillment_type.as_str().to_string(),
            booking_date: o.booking_date.format("%Y-%m-%d").to_string(),
            pax_count: o.pax_count,
            time_slot_id: o.time_slot_id,
            delivery_address: o.delivery_address,
            customer_name: o.customer_name,
            customer_email: o.customer_email,
            customer_phone: o.customer_phone,
            items: o.items.into_iter().map(Into::into).collect(),
            subtotal: money(o.subtotal),
            sst: money(o.sst),
            booking_fee: money(o.booking_fee),
            delivery_fee: money(o.delivery_fee),
            total: money(o.total),
            notes: o.notes,
            status: o.status.as_str().to_string(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub order: OrderDto,
    pub payment_url: String,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        Self {
            success: true,
            order: outcome.order.into(),
            payment_url: outcome.payment_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderDto,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn dine_in_json() -> serde_json::Value {
        serde_json::json!({
            "outletId": "outlet-1",
            "timeSlotId": "slot-1",
            "paxCount": 4,
            "bookingDate": "2026-03-12",
            "customerName": "Aisyah",
            "customerEmail": "aisyah@example.com",
            "customerPhone": "0123456789",
            "items": [
                {"id": "set-a", "quantity": 2},
                {"id": "set-b", "quantity": 1, "customizations": {
                    "drink": {"value": "mojito-apple", "label": "ignored", "priceModifier": 9999}
                }}
            ]
        })
    }

    #[test]
    fn camel_case_request_parses() {
        let req: DineInReservationRequest = serde_json::from_value(dine_in_json()).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.pax_count, 4);

        let booking = req.into_booking();
        assert_eq!(booking.items.len(), 2);
        // Only the option identifier survives into the application layer.
        let selections = booking.items[1].customizations.as_ref().unwrap();
        assert_eq!(selections["drink"], "mojito-apple");
    }

    #[test]
    fn empty_cart_fails_validation() {
        let mut json = dine_in_json();
        json["items"] = serde_json::json!([]);
        let req: DineInReservationRequest = serde_json::from_value(json).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn bad_email_fails_validation() {
        let mut json = dine_in_json();
        json["customerEmail"] = serde_json::json!("not-an-email");
        let req: DineInReservationRequest = serde_json::from_value(json).unwrap();
        assert!(req.validate().is_err());
    }
}
