//! SeaORM implementation of OutletRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::outlet::{Outlet, OutletRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::outlet;

pub struct SeaOrmOutletRepository {
    db: DatabaseConnection,
}

impl SeaOrmOutletRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OutletRepository for SeaOrmOutletRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Outlet>> {
        let model = outlet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(outlet::Model::into_domain))
    }

    async fn find_active(&self) -> DomainResult<Vec<Outlet>> {
        let models = outlet::Entity::find()
            .filter(outlet::Column::IsActive.eq(true))
            .order_by_asc(outlet::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(outlet::Model::into_domain).collect())
    }
}
