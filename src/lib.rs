//! # AGP Reserve
//!
//! Restaurant ordering/reservation backend: customers browse a menu, book
//! dine-in/takeaway/delivery slots and pay through an external bill
//! gateway. The core is the capacity-safe booking engine — server-side
//! pricing plus a serializable order+payment transaction that can never
//! overbook a slot, a table ceiling or an outlet's pax capacity.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Use cases — pricing, capacity, the booking
//!   coordinator, payment callbacks, background sweeps
//! - **infrastructure**: External concerns (database, payment gateway,
//!   notification relay)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Retry and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppContext};
