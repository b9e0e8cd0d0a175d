//! Order entity
//!
//! The central transactional row. Inserted only inside the booking
//! coordinator's serializable transaction; the capacity invariant is
//! enforced against aggregates over this table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;
use crate::domain::{DomainError, DomainResult, FulfillmentType, OrderStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Human-legible unique order number ("AGP" + date + random suffix)
    #[sea_orm(unique)]
    pub order_no: String,

    pub outlet_id: String,

    /// "DINE_IN", "TAKEAWAY" or "DELIVERY"
    pub fulfillment_type: String,

    /// Calendar date of the booking (no time-of-day component)
    pub booking_date: Date,

    /// Dine-in guest count
    #[sea_orm(nullable)]
    pub pax_count: Option<i32>,

    #[sea_orm(nullable)]
    pub time_slot_id: Option<String>,

    /// Legacy table-based dine-in reference
    #[sea_orm(nullable)]
    pub table_id: Option<String>,

    #[sea_orm(nullable)]
    pub delivery_address: Option<String>,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    /// Priced cart lines as JSON
    pub items: Json,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub subtotal: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub sst: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub booking_fee: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub delivery_fee: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    /// "PENDING", "PAID", "CONFIRMED", "COMPLETED" or "CANCELLED"
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id"
    )]
    Outlet,

    #[sea_orm(
        belongs_to = "super::time_slot::Entity",
        from = "Column::TimeSlotId",
        to = "super::time_slot::Column::Id"
    )]
    TimeSlot,

    #[sea_orm(has_one = "super::payment::Entity")]
    Payment,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl Related<super::time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlot.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> DomainResult<domain::Order> {
        let items: Vec<domain::OrderLine> = serde_json::from_value(self.items)
            .map_err(|e| {
                DomainError::Database(format!("Corrupt items payload on order {}: {}", self.id, e))
            })?;

        Ok(domain::Order {
            id: self.id,
            order_no: self.order_no,
            outlet_id: self.outlet_id,
            fulfillment_type: FulfillmentType::from_str(&self.fulfillment_type),
            booking_date: self.booking_date,
            pax_count: self.pax_count,
            time_slot_id: self.time_slot_id,
            table_id: self.table_id,
            delivery_address: self.delivery_address,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            items,
            subtotal: self.subtotal,
            sst: self.sst,
            booking_fee: self.booking_fee,
            delivery_fee: self.delivery_fee,
            total: self.total,
            notes: self.notes,
            status: OrderStatus::from_str(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
