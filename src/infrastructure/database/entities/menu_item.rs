//! Menu item entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;
use crate::domain::{DomainError, DomainResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    pub is_active: bool,

    /// Customization schema: group key → {label, required, options}
    #[sea_orm(nullable)]
    pub customization_options: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> DomainResult<domain::MenuItem> {
        let customization = match self.customization_options {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                DomainError::Database(format!(
                    "Corrupt customization schema for menu item {}: {}",
                    self.id, e
                ))
            })?),
            None => None,
        };

        Ok(domain::MenuItem {
            id: self.id,
            name: self.name,
            price: self.price,
            is_active: self.is_active,
            customization,
        })
    }
}
