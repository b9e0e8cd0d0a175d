//! Time slot entity
//!
//! Capacity is derived from order rows; this table deliberately carries no
//! running order counter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub outlet_id: String,

    /// Time-of-day, "HH:MM"
    pub time: String,

    /// Takeaway order-count ceiling per date
    pub max_orders: i32,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id"
    )]
    Outlet,

    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> domain::TimeSlot {
        domain::TimeSlot {
            id: self.id,
            outlet_id: self.outlet_id,
            time: self.time,
            max_orders: self.max_orders,
            is_active: self.is_active,
        }
    }
}
