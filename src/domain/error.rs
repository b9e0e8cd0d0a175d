//! Domain errors
//!
//! One taxonomy for every business-rule failure the booking flow can
//! produce. The HTTP layer maps these to status codes in a single place
//! (`interfaces::http::common::ApiError`); services and repositories only
//! ever construct and propagate them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid booking date")]
    InvalidDate,

    #[error("Cannot book for past dates")]
    PastDate,

    #[error("This service requires booking at least one day in advance")]
    SameDayBooking,

    #[error("Cannot book more than 14 days ahead")]
    DateTooFar,

    #[error("Selected time is outside outlet operating hours")]
    OutsideHours,

    #[error("Time slot not found")]
    SlotNotFound,

    #[error("Outlet not found")]
    OutletNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Not enough capacity for this time slot. Please choose a different time or reduce party size.")]
    CapacityFull,

    #[error("Time slot is fully booked for this date")]
    SlotFull,

    #[error("Some items in your cart are no longer available. Please clear your cart and re-add items from the menu.")]
    ItemUnavailable,

    #[error("Invalid quantity for item {0}")]
    InvalidQuantity(String),

    #[error("Invalid customization selection for item {0}")]
    InvalidCustomization(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl DomainError {
    /// Whether this error is the database's serialization-conflict signal
    /// (Postgres SQLSTATE 40001, SQLite busy). Only these are retried by
    /// the booking coordinator; business-rule failures never are.
    pub fn is_serialization_conflict(&self) -> bool {
        match self {
            DomainError::Database(msg) => {
                msg.contains("could not serialize")
                    || msg.contains("40001")
                    || msg.contains("deadlock")
                    || msg.contains("database is locked")
            }
            _ => false,
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_conflict_detection() {
        let e = DomainError::Database("could not serialize access due to concurrent update".into());
        assert!(e.is_serialization_conflict());

        let e = DomainError::Database("SQLSTATE 40001".into());
        assert!(e.is_serialization_conflict());

        let e = DomainError::Database("database is locked".into());
        assert!(e.is_serialization_conflict());

        let e = DomainError::Database("relation orders does not exist".into());
        assert!(!e.is_serialization_conflict());
    }

    #[test]
    fn business_errors_are_never_retryable() {
        assert!(!DomainError::CapacityFull.is_serialization_conflict());
        assert!(!DomainError::SlotFull.is_serialization_conflict());
        assert!(!DomainError::PastDate.is_serialization_conflict());
    }
}
