//! SeaORM implementation of TableRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::table::{Table, TableRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::table;

pub struct SeaOrmTableRepository {
    db: DatabaseConnection,
}

impl SeaOrmTableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TableRepository for SeaOrmTableRepository {
    async fn find_for_outlet(
        &self,
        outlet_id: &str,
        zone: Option<&str>,
    ) -> DomainResult<Vec<Table>> {
        let mut query = table::Entity::find().filter(table::Column::OutletId.eq(outlet_id));
        if let Some(zone) = zone {
            query = query.filter(table::Column::Zone.eq(zone));
        }
        let models = query
            .order_by_asc(table::Column::Zone)
            .order_by_asc(table::Column::TableNo)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(table::Model::into_domain).collect())
    }
}
