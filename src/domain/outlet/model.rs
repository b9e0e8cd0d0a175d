//! Outlet domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A physical restaurant location.
#[derive(Debug, Clone)]
pub struct Outlet {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    /// Opening time-of-day, `HH:MM`
    pub open_time: String,
    /// Closing time-of-day, `HH:MM`
    pub close_time: String,
    /// Outlet-wide simultaneous dine-in guest ceiling
    pub max_capacity: i32,
    /// Flat fee added to delivery orders
    pub delivery_fee: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Outlet {
    /// Whether a slot time-of-day falls within this outlet's hours.
    pub fn is_open_at(&self, slot_time: &str) -> bool {
        crate::domain::booking_date::time_within_hours(slot_time, &self.open_time, &self.close_time)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outlet() -> Outlet {
        Outlet {
            id: "outlet-1".into(),
            name: "Masjid Tanah".into(),
            address: "MT 1395, Pusat Perdagangan Fasa 2".into(),
            phone: None,
            open_time: "10:00".into(),
            close_time: "22:00".into(),
            max_capacity: 128,
            delivery_fee: Decimal::new(600, 2),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn open_at_boundaries() {
        let o = sample_outlet();
        assert!(o.is_open_at("10:00"));
        assert!(o.is_open_at("22:00"));
        assert!(!o.is_open_at("22:30"));
        assert!(!o.is_open_at("09:30"));
    }
}
