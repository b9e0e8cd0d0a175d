//! Read-only availability projections
//!
//! The slot listings the client consults before booking. They reuse the
//! same derived aggregates as the booking transaction (`capacity`), run on
//! a plain connection, and validate the requested date with the same
//! window rules as bookings.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use super::capacity;
use crate::domain::booking_date::{self, validate_booking_date};
use crate::domain::{
    DomainError, DomainResult, OrderStatus, RepositoryProvider, Table, TableStatus, TimeSlot,
};

/// A dine-in slot with its pax headroom for one date.
#[derive(Debug)]
pub struct DineInSlotAvailability {
    pub slot: TimeSlot,
    pub current_pax: i64,
    pub max_capacity: i32,
    pub remaining_pax: i64,
    pub is_available: bool,
    /// Slot exists but falls outside the outlet's operating hours
    pub is_disabled: bool,
}

/// A takeaway slot with its order-count headroom for one date.
#[derive(Debug)]
pub struct TakeawaySlotAvailability {
    pub slot: TimeSlot,
    pub current_orders: i64,
    pub max_orders: i32,
    pub is_available: bool,
    pub is_disabled: bool,
}

/// Who holds a table on the requested date (legacy table listing).
#[derive(Debug)]
pub struct TableBooking {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub booking_time: DateTime<Utc>,
    pub order_status: OrderStatus,
}

#[derive(Debug)]
pub struct TableAvailability {
    pub table: Table,
    pub is_available: bool,
    pub booking: Option<TableBooking>,
}

pub struct AvailabilityService {
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(db: DatabaseConnection, repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { db, repos }
    }

    /// Same calendar window as bookings; listings allow same-day viewing.
    fn listing_date(date_str: Option<&str>) -> DomainResult<NaiveDate> {
        validate_booking_date(date_str, 0, booking_date::today())
    }

    pub async fn dine_in_slots(
        &self,
        outlet_id: &str,
        date_str: Option<&str>,
    ) -> DomainResult<Vec<DineInSlotAvailability>> {
        let date = Self::listing_date(date_str)?;

        let outlet = self
            .repos
            .outlets()
            .find_by_id(outlet_id)
            .await?
            .ok_or(DomainError::OutletNotFound)?;

        let slots = self.repos.time_slots().find_active_for_outlet(outlet_id).await?;
        let pax_map = capacity::dine_in_pax_by_slot(&self.db, outlet_id, date).await?;

        Ok(slots
            .into_iter()
            .map(|slot| {
                let current_pax = pax_map.get(&slot.id).copied().unwrap_or(0);
                let remaining_pax = (i64::from(outlet.max_capacity) - current_pax).max(0);
                let is_disabled = !outlet.is_open_at(&slot.time);
                DineInSlotAvailability {
                    current_pax,
                    max_capacity: outlet.max_capacity,
                    remaining_pax,
                    is_available: remaining_pax > 0,
                    is_disabled,
                    slot,
                }
            })
            .collect())
    }

    pub async fn takeaway_slots(
        &self,
        outlet_id: &str,
        date_str: Option<&str>,
    ) -> DomainResult<Vec<TakeawaySlotAvailability>> {
        let date = Self::listing_date(date_str)?;

        let outlet = self
            .repos
            .outlets()
            .find_by_id(outlet_id)
            .await?
            .ok_or(DomainError::OutletNotFound)?;

        let slots = self.repos.time_slots().find_active_for_outlet(outlet_id).await?;
        let count_map = capacity::orders_by_slot(&self.db, outlet_id, date).await?;

        Ok(slots
            .into_iter()
            .map(|slot| {
                let current_orders = count_map.get(&slot.id).copied().unwrap_or(0);
                let is_disabled = !outlet.is_open_at(&slot.time);
                TakeawaySlotAvailability {
                    current_orders,
                    max_orders: slot.max_orders,
                    is_available: current_orders < i64::from(slot.max_orders),
                    is_disabled,
                    slot,
                }
            })
            .collect())
    }

    /// Legacy table listing: availability plus who holds each table.
    pub async fn tables(
        &self,
        outlet_id: &str,
        date_str: Option<&str>,
        zone: Option<&str>,
    ) -> DomainResult<Vec<TableAvailability>> {
        let date = Self::listing_date(date_str)?;

        let tables = self.repos.tables().find_for_outlet(outlet_id, zone).await?;
        let orders = self
            .repos
            .orders()
            .find_dine_in_for_date(outlet_id, date)
            .await?;

        let mut bookings: std::collections::HashMap<String, TableBooking> = orders
            .into_iter()
            .filter_map(|o| {
                o.table_id.clone().map(|table_id| {
                    (
                        table_id,
                        TableBooking {
                            customer_name: o.customer_name,
                            customer_phone: o.customer_phone,
                            customer_email: o.customer_email,
                            booking_time: o.created_at,
                            order_status: o.status,
                        },
                    )
                })
            })
            .collect();

        Ok(tables
            .into_iter()
            .map(|table| {
                let booking = bookings.remove(&table.id);
                TableAvailability {
                    is_available: booking.is_none() && table.status == TableStatus::Available,
                    booking,
                    table,
                }
            })
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::MAX_BOOKING_DAYS_AHEAD;

    fn offset_str(days: i64) -> String {
        (booking_date::today() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn listing_uses_the_booking_window() {
        // Same calendar rules as bookings: today through today+14.
        assert!(AvailabilityService::listing_date(None).is_ok());
        assert!(AvailabilityService::listing_date(Some(&offset_str(0))).is_ok());
        assert!(
            AvailabilityService::listing_date(Some(&offset_str(MAX_BOOKING_DAYS_AHEAD))).is_ok()
        );
    }

    #[test]
    fn listing_rejects_dates_outside_the_window() {
        let err = AvailabilityService::listing_date(Some(&offset_str(-1))).unwrap_err();
        assert!(matches!(err, DomainError::PastDate));

        let err = AvailabilityService::listing_date(
            Some(&offset_str(MAX_BOOKING_DAYS_AHEAD + 1)),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DateTooFar));

        let err = AvailabilityService::listing_date(Some("soon")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate));
    }
}
