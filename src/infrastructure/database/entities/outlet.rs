//! Outlet entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outlets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    pub address: String,

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Opening time-of-day, "HH:MM"
    pub open_time: String,

    /// Closing time-of-day, "HH:MM"
    pub close_time: String,

    /// Outlet-wide simultaneous dine-in guest ceiling
    pub max_capacity: i32,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub delivery_fee: Decimal,

    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::table::Entity")]
    Tables,

    #[sea_orm(has_many = "super::time_slot::Entity")]
    TimeSlots,

    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tables.def()
    }
}

impl Related<super::time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlots.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> domain::Outlet {
        domain::Outlet {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            open_time: self.open_time,
            close_time: self.close_time,
            max_capacity: self.max_capacity,
            delivery_fee: self.delivery_fee,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
