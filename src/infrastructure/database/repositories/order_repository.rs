//! SeaORM implementation of OrderRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use super::db_err;
use crate::domain::order::{Order, OrderRepository, OrderStatus};
use crate::domain::{DomainError, DomainResult, FulfillmentType};
use crate::infrastructure::database::entities::{order, payment};

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Order>> {
        let model = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(order::Model::into_domain).transpose()
    }

    async fn find_by_order_no(&self, order_no: &str) -> DomainResult<Option<Order>> {
        let model = order::Entity::find()
            .filter(order::Column::OrderNo.eq(order_no))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(order::Model::into_domain).transpose()
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> DomainResult<()> {
        debug!("Updating order {} to status {}", id, status);

        let existing = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::OrderNotFound);
        };

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_dine_in_for_date(
        &self,
        outlet_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<Order>> {
        let models = order::Entity::find()
            .filter(order::Column::OutletId.eq(outlet_id))
            .filter(order::Column::BookingDate.eq(date))
            .filter(order::Column::FulfillmentType.eq(FulfillmentType::DineIn.as_str()))
            .filter(order::Column::Status.is_in(OrderStatus::CAPACITY_CONSUMING))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(order::Model::into_domain).collect()
    }

    async fn delete_pending_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<Vec<String>> {
        let stale: Vec<(String, String)> = order::Entity::find()
            .select_only()
            .column(order::Column::Id)
            .column(order::Column::OrderNo)
            .filter(order::Column::Status.eq(OrderStatus::Pending.as_str()))
            .filter(order::Column::CreatedAt.lt(cutoff))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        if stale.is_empty() {
            return Ok(Vec::new());
        }

        let (ids, order_nos): (Vec<String>, Vec<String>) = stale.into_iter().unzip();

        // Payments first: the FK would otherwise block the order delete.
        payment::Entity::delete_many()
            .filter(payment::Column::OrderId.is_in(ids.clone()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        order::Entity::delete_many()
            .filter(order::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(order_nos)
    }
}
