//! Payment entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain;
use crate::domain::PaymentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub order_id: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    /// Gateway bill reference, set once bill creation succeeds
    #[sea_orm(nullable)]
    pub bill_code: Option<String>,

    /// Gateway transaction reference from the callback
    #[sea_orm(nullable)]
    pub transaction_id: Option<String>,

    /// "PENDING", "SUCCESS" or "FAILED"
    pub status: String,

    #[sea_orm(nullable)]
    pub paid_at: Option<DateTimeUtc>,

    /// Raw callback payload, kept verbatim
    #[sea_orm(nullable)]
    pub callback_data: Option<Json>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> domain::Payment {
        domain::Payment {
            id: self.id,
            order_id: self.order_id,
            amount: self.amount,
            bill_code: self.bill_code,
            transaction_id: self.transaction_id,
            status: PaymentStatus::from_str(&self.status),
            paid_at: self.paid_at,
            callback_data: self.callback_data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
