//! SeaORM implementation of MenuItemRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::db_err;
use crate::domain::menu::{MenuItem, MenuItemRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::menu_item;

pub struct SeaOrmMenuItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmMenuItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenuItemRepository for SeaOrmMenuItemRepository {
    async fn find_active_by_ids(&self, ids: &[String]) -> DomainResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = menu_item::Entity::find()
            .filter(menu_item::Column::Id.is_in(ids.iter().map(String::as_str)))
            .filter(menu_item::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models
            .into_iter()
            .map(menu_item::Model::into_domain)
            .collect()
    }
}
