//! Capacity accounting
//!
//! Capacity is always a derived aggregate over order rows — never a stored
//! counter — so cancellations and sweeps can't leave it drifted. Only
//! orders in a paid-class status ({PAID, CONFIRMED, COMPLETED}) consume
//! capacity; PENDING holds are excluded by policy so abandoned checkouts
//! never block a slot.
//!
//! Every function is generic over [`ConnectionTrait`] so the same queries
//! run inside the booking coordinator's serializable transaction and on a
//! plain connection for the read-only availability listings.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::domain::{DomainError, DomainResult, FulfillmentType, OrderStatus};
use crate::infrastructure::database::entities::order;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[derive(Debug, FromQueryResult)]
struct PaxSumRow {
    pax: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct SlotPaxRow {
    time_slot_id: Option<String>,
    pax: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct SlotCountRow {
    time_slot_id: Option<String>,
    orders: i64,
}

/// Sum of committed dine-in pax for one slot on one date.
pub async fn dine_in_pax_booked<C: ConnectionTrait>(
    conn: &C,
    time_slot_id: &str,
    date: NaiveDate,
) -> DomainResult<i64> {
    let row = order::Entity::find()
        .select_only()
        .column_as(order::Column::PaxCount.sum(), "pax")
        .filter(order::Column::TimeSlotId.eq(time_slot_id))
        .filter(order::Column::BookingDate.eq(date))
        .filter(order::Column::FulfillmentType.eq(FulfillmentType::DineIn.as_str()))
        .filter(order::Column::Status.is_in(OrderStatus::CAPACITY_CONSUMING))
        .into_model::<PaxSumRow>()
        .one(conn)
        .await
        .map_err(db_err)?;

    Ok(row.and_then(|r| r.pax).unwrap_or(0))
}

/// Count of committed orders for one slot on one date (takeaway ceiling).
pub async fn takeaway_orders_booked<C: ConnectionTrait>(
    conn: &C,
    time_slot_id: &str,
    date: NaiveDate,
) -> DomainResult<u64> {
    order::Entity::find()
        .filter(order::Column::TimeSlotId.eq(time_slot_id))
        .filter(order::Column::BookingDate.eq(date))
        .filter(order::Column::Status.is_in(OrderStatus::CAPACITY_CONSUMING))
        .count(conn)
        .await
        .map_err(db_err)
}

/// Committed dine-in pax per slot for a whole outlet on one date.
/// Used by the availability listing.
pub async fn dine_in_pax_by_slot<C: ConnectionTrait>(
    conn: &C,
    outlet_id: &str,
    date: NaiveDate,
) -> DomainResult<HashMap<String, i64>> {
    let rows = order::Entity::find()
        .select_only()
        .column(order::Column::TimeSlotId)
        .column_as(order::Column::PaxCount.sum(), "pax")
        .filter(order::Column::OutletId.eq(outlet_id))
        .filter(order::Column::BookingDate.eq(date))
        .filter(order::Column::FulfillmentType.eq(FulfillmentType::DineIn.as_str()))
        .filter(order::Column::Status.is_in(OrderStatus::CAPACITY_CONSUMING))
        .filter(order::Column::TimeSlotId.is_not_null())
        .group_by(order::Column::TimeSlotId)
        .into_model::<SlotPaxRow>()
        .all(conn)
        .await
        .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .filter_map(|r| r.time_slot_id.map(|id| (id, r.pax.unwrap_or(0))))
        .collect())
}

/// Committed order count per slot for a whole outlet on one date.
pub async fn orders_by_slot<C: ConnectionTrait>(
    conn: &C,
    outlet_id: &str,
    date: NaiveDate,
) -> DomainResult<HashMap<String, i64>> {
    let rows = order::Entity::find()
        .select_only()
        .column(order::Column::TimeSlotId)
        .column_as(order::Column::Id.count(), "orders")
        .filter(order::Column::OutletId.eq(outlet_id))
        .filter(order::Column::BookingDate.eq(date))
        .filter(order::Column::Status.is_in(OrderStatus::CAPACITY_CONSUMING))
        .filter(order::Column::TimeSlotId.is_not_null())
        .group_by(order::Column::TimeSlotId)
        .into_model::<SlotCountRow>()
        .all(conn)
        .await
        .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .filter_map(|r| r.time_slot_id.map(|id| (id, r.orders)))
        .collect())
}

/// Would `requested` more pax fit under the outlet ceiling?
pub fn dine_in_fits(booked: i64, requested: i32, max_capacity: i32) -> bool {
    booked + i64::from(requested) <= i64::from(max_capacity)
}

/// Would one more takeaway order fit under the slot ceiling?
pub fn takeaway_fits(booked: u64, max_orders: i32) -> bool {
    max_orders > 0 && booked < max_orders as u64
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dine_in_fills_to_exact_capacity() {
        assert!(dine_in_fits(0, 50, 50));
        assert!(dine_in_fits(46, 4, 50));
        assert!(!dine_in_fits(46, 5, 50));
        // Slot at capacity rejects any further party.
        assert!(!dine_in_fits(50, 1, 50));
    }

    #[test]
    fn takeaway_is_strictly_below_ceiling() {
        assert!(takeaway_fits(0, 10));
        assert!(takeaway_fits(9, 10));
        assert!(!takeaway_fits(10, 10));
        assert!(!takeaway_fits(11, 10));
    }

    #[test]
    fn zero_ceiling_slot_never_fits() {
        assert!(!takeaway_fits(0, 0));
        assert!(!dine_in_fits(0, 1, 0));
    }
}
