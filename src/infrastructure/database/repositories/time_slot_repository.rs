//! SeaORM implementation of TimeSlotRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::time_slot::{TimeSlot, TimeSlotRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::time_slot;

pub struct SeaOrmTimeSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmTimeSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimeSlotRepository for SeaOrmTimeSlotRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TimeSlot>> {
        let model = time_slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(time_slot::Model::into_domain))
    }

    async fn find_active_for_outlet(&self, outlet_id: &str) -> DomainResult<Vec<TimeSlot>> {
        debug!("Loading active slots for outlet {}", outlet_id);

        let models = time_slot::Entity::find()
            .filter(time_slot::Column::OutletId.eq(outlet_id))
            .filter(time_slot::Column::IsActive.eq(true))
            .order_by_asc(time_slot::Column::Time)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(time_slot::Model::into_domain)
            .collect())
    }
}
