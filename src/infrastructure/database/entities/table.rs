//! Table entity (legacy table-based dine-in)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;
use crate::domain::TableStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub outlet_id: String,
    pub table_no: String,

    #[sea_orm(nullable)]
    pub zone: Option<String>,

    pub capacity: i32,

    /// "AVAILABLE" or "UNAVAILABLE"
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id"
    )]
    Outlet,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> domain::Table {
        domain::Table {
            id: self.id,
            outlet_id: self.outlet_id,
            table_no: self.table_no,
            zone: self.zone,
            capacity: self.capacity,
            status: TableStatus::from_str(&self.status),
        }
    }
}
