//! Menu aggregate
//!
//! Menu items are read-only input to pricing. The customization schema is
//! the server-held source of truth for option price modifiers; the client
//! only ever selects option identifiers.

pub mod model;
pub mod repository;

pub use model::{CustomizationGroup, CustomizationOption, CustomizationSchema, MenuItem};
pub use repository::MenuItemRepository;
