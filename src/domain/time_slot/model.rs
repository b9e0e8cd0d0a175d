//! Time slot domain entity

/// A bookable time-of-day bucket for one outlet.
#[derive(Debug, Clone)]
pub struct TimeSlot {
    pub id: String,
    pub outlet_id: String,
    /// Time-of-day, `HH:MM`
    pub time: String,
    /// Takeaway order-count ceiling for this slot per date
    pub max_orders: i32,
    pub is_active: bool,
}
