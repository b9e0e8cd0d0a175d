//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::db_err;
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_bill_code(&self, bill_code: &str) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::BillCode.eq(bill_code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(payment::Model::into_domain))
    }

    async fn find_by_order_id(&self, order_id: &str) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(payment::Model::into_domain))
    }

    async fn set_bill_code(&self, payment_id: &str, bill_code: &str) -> DomainResult<()> {
        debug!("Setting bill code {} on payment {}", bill_code, payment_id);

        let existing = payment::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::PaymentNotFound);
        };

        let mut active: payment::ActiveModel = existing.into();
        active.bill_code = Set(Some(bill_code.to_string()));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, p: Payment) -> DomainResult<()> {
        debug!("Updating payment {}", p.id);

        let existing = payment::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::PaymentNotFound);
        }

        let model = payment::ActiveModel {
            id: Set(p.id),
            order_id: Set(p.order_id),
            amount: Set(p.amount),
            bill_code: Set(p.bill_code),
            transaction_id: Set(p.transaction_id),
            status: Set(p.status.as_str().to_string()),
            paid_at: Set(p.paid_at),
            callback_data: Set(p.callback_data),
            created_at: Set(p.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
