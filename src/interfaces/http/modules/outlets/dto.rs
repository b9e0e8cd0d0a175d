//! Outlet and availability DTOs

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::booking::availability::{
    DineInSlotAvailability, TableAvailability, TakeawaySlotAvailability,
};
use crate::domain::{Outlet, Table, TimeSlot};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutletDto {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub open_time: String,
    pub close_time: String,
    pub max_capacity: i32,
    pub delivery_fee: f64,
    pub is_active: bool,
}

impl From<Outlet> for OutletDto {
    fn from(o: Outlet) -> Self {
        Self {
            id: o.id,
            name: o.name,
            address: o.address,
            phone: o.phone,
            open_time: o.open_time,
            close_time: o.close_time,
            max_capacity: o.max_capacity,
            delivery_fee: o.delivery_fee.to_f64().unwrap_or(0.0),
            is_active: o.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDto {
    pub id: String,
    pub time: String,
    pub max_orders: i32,
    pub is_active: bool,
}

impl From<TimeSlot> for TimeSlotDto {
    fn from(s: TimeSlot) -> Self {
        Self {
            id: s.id,
            time: s.time,
            max_orders: s.max_orders,
            is_active: s.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlainTableDto {
    pub id: String,
    pub table_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub capacity: i32,
    pub status: String,
}

impl From<Table> for PlainTableDto {
    fn from(t: Table) -> Self {
        Self {
            id: t.id,
            table_no: t.table_no,
            zone: t.zone,
            capacity: t.capacity,
            status: t.status.as_str().to_string(),
        }
    }
}

/// Outlet with its tables and slots, for the detail page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutletDetailDto {
    #[serde(flatten)]
    pub outlet: OutletDto,
    pub tables: Vec<PlainTableDto>,
    pub time_slots: Vec<TimeSlotDto>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    /// Booking date, YYYY-MM-DD; defaults to today
    pub date: Option<String>,
    /// "dine_in" for pax-based capacity, anything else is takeaway
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TablesQuery {
    pub date: Option<String>,
    pub zone: Option<String>,
}

/// Dine-in slot annotated with pax headroom.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DineInSlotDto {
    pub id: String,
    pub time: String,
    pub is_active: bool,
    pub current_pax: i64,
    pub max_capacity: i32,
    pub remaining_pax: i64,
    pub is_available: bool,
    pub is_disabled: bool,
}

impl From<DineInSlotAvailability> for DineInSlotDto {
    fn from(a: DineInSlotAvailability) -> Self {
        Self {
            id: a.slot.id,
            time: a.slot.time,
            is_active: a.slot.is_active,
            current_pax: a.current_pax,
            max_capacity: a.max_capacity,
            remaining_pax: a.remaining_pax,
            is_available: a.is_available,
            is_disabled: a.is_disabled,
        }
    }
}

/// Takeaway slot annotated with order-count headroom.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TakeawaySlotDto {
    pub id: String,
    pub time: String,
    pub is_active: bool,
    pub current_orders: i64,
    pub max_orders: i32,
    pub is_available: bool,
    pub is_disabled: bool,
}

impl From<TakeawaySlotAvailability> for TakeawaySlotDto {
    fn from(a: TakeawaySlotAvailability) -> Self {
        Self {
            id: a.slot.id,
            time: a.slot.time,
            is_active: a.slot.is_active,
            current_orders: a.current_orders,
            max_orders: a.max_orders,
            is_available: a.is_available,
            is_disabled: a.is_disabled,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableBookingDto {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub booking_time: String,
    pub order_status: String,
}

/// Table annotated with availability for a date.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableDto {
    #[serde(flatten)]
    pub table: PlainTableDto,
    pub is_available: bool,
    pub booking: Option<TableBookingDto>,
}

impl From<TableAvailability> for TableDto {
    fn from(a: TableAvailability) -> Self {
        Self {
            table: a.table.into(),
            is_available: a.is_available,
            booking: a.booking.map(|b| TableBookingDto {
                customer_name: b.customer_name,
                customer_phone: b.customer_phone,
                customer_email: b.customer_email,
                booking_time: b.booking_time.to_rfc3339(),
                order_status: b.order_status.as_str().to_string(),
            }),
        }
    }
}
