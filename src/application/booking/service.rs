//! Reservation transaction coordinator
//!
//! One pass per booking request: validate fields and date, price the cart
//! from stored menu data, then open a serializable transaction that
//! re-checks slot/outlet/capacity and inserts the order + payment rows.
//! The gateway bill is created only after commit — a bill request must
//! never hold a database transaction open. If bill creation fails, the
//! committed PENDING rows are left for the stale-order sweep rather than
//! giving up the reserved capacity.
//!
//! The database may abort a serializable transaction when two bookings
//! race for the same slot; that signal (and only that signal) is retried
//! with a bounded, jittered backoff.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IsolationLevel, Set,
    TransactionError, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::capacity;
use super::pricing::{self, CartLine, Totals};
use crate::application::ports::{BillRequest, PaymentGateway};
use crate::domain::booking_date::{self, validate_booking_date};
use crate::domain::{
    generate_order_no, DomainError, DomainResult, FulfillmentType, MenuItem, Order, OrderStatus,
    RepositoryProvider,
};
use crate::infrastructure::database::entities::{order, outlet, payment, time_slot};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Dine-in party size bounds
pub const MIN_PAX: i32 = 1;
pub const MAX_PAX: i32 = 50;

/// Customer contact fields shared by all booking types.
#[derive(Debug, Clone)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Pax-based dine-in booking request.
#[derive(Debug, Clone)]
pub struct DineInRequest {
    pub outlet_id: String,
    pub time_slot_id: String,
    pub pax_count: i32,
    pub booking_date: Option<String>,
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub notes: Option<String>,
}

/// Takeaway booking request.
#[derive(Debug, Clone)]
pub struct TakeawayRequest {
    pub outlet_id: String,
    pub time_slot_id: String,
    pub booking_date: Option<String>,
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub notes: Option<String>,
}

/// Delivery booking request. No slot machinery; one-day minimum lead.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub outlet_id: String,
    pub delivery_address: String,
    pub booking_date: Option<String>,
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub notes: Option<String>,
}

/// A committed booking plus the customer-facing payment URL.
#[derive(Debug)]
pub struct BookingOutcome {
    pub order: Order,
    pub payment_url: String,
}

/// Rows committed by the booking transaction, before the gateway call.
struct InsertedBooking {
    order: order::Model,
    payment: payment::Model,
    outlet_name: String,
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

fn flatten_txn_err(e: TransactionError<DomainError>) -> DomainError {
    match e {
        TransactionError::Connection(db) => DomainError::Database(db.to_string()),
        TransactionError::Transaction(err) => err,
    }
}

pub struct BookingService {
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn PaymentGateway>,
}

impl BookingService {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { db, repos, gateway }
    }

    /// Bulk-fetch the active menu items a cart references.
    async fn load_menu(&self, items: &[CartLine]) -> DomainResult<HashMap<String, MenuItem>> {
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let menu_items = self.repos.menu_items().find_active_by_ids(&ids).await?;
        Ok(menu_items.into_iter().map(|m| (m.id.clone(), m)).collect())
    }

    pub async fn create_dine_in(&self, req: DineInRequest) -> DomainResult<BookingOutcome> {
        if req.pax_count < MIN_PAX || req.pax_count > MAX_PAX {
            return Err(DomainError::Validation(format!(
                "Number of guests must be between {} and {}",
                MIN_PAX, MAX_PAX
            )));
        }

        let date = validate_booking_date(
            req.booking_date.as_deref(),
            FulfillmentType::DineIn.min_days_ahead(),
            booking_date::today(),
        )?;

        let menu = self.load_menu(&req.items).await?;
        let totals = pricing::price_cart(&menu, &req.items, Decimal::ZERO)?;

        let created = retry_with_backoff(
            RetryConfig::default(),
            || self.insert_dine_in(&req, date, &totals),
            DomainError::is_serialization_conflict,
            "create_dine_in",
        )
        .await
        .inspect_err(|e| track_rejection(FulfillmentType::DineIn, e))?;

        self.finalize(created).await
    }

    async fn insert_dine_in(
        &self,
        req: &DineInRequest,
        date: NaiveDate,
        totals: &Totals,
    ) -> DomainResult<InsertedBooking> {
        let outlet_id = req.outlet_id.clone();
        let slot_id = req.time_slot_id.clone();
        let pax = req.pax_count;
        let customer = req.customer.clone();
        let notes = req.notes.clone();
        let totals = totals.clone();

        self.db
            .transaction_with_config::<_, InsertedBooking, DomainError>(
                move |txn| {
                    Box::pin(async move {
                        let slot = time_slot::Entity::find_by_id(&slot_id)
                            .one(txn)
                            .await
                            .map_err(db_err)?;
                        let slot = match slot {
                            Some(s) if s.outlet_id == outlet_id => s,
                            _ => return Err(DomainError::SlotNotFound),
                        };

                        let outlet_row = outlet::Entity::find_by_id(&outlet_id)
                            .one(txn)
                            .await
                            .map_err(db_err)?
                            .ok_or(DomainError::OutletNotFound)?;

                        if !booking_date::time_within_hours(
                            &slot.time,
                            &outlet_row.open_time,
                            &outlet_row.close_time,
                        ) {
                            return Err(DomainError::OutsideHours);
                        }

                        let booked = capacity::dine_in_pax_booked(txn, &slot.id, date).await?;
                        if !capacity::dine_in_fits(booked, pax, outlet_row.max_capacity) {
                            return Err(DomainError::CapacityFull);
                        }

                        let (order, payment) = insert_order_and_payment(
                            txn,
                            NewOrder {
                                outlet_id: &outlet_id,
                                fulfillment_type: FulfillmentType::DineIn,
                                booking_date: date,
                                pax_count: Some(pax),
                                time_slot_id: Some(slot.id.clone()),
                                delivery_address: None,
                                customer: &customer,
                                totals: &totals,
                                notes,
                            },
                        )
                        .await?;

                        Ok(InsertedBooking {
                            order,
                            payment,
                            outlet_name: outlet_row.name,
                        })
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(flatten_txn_err)
    }

    pub async fn create_takeaway(&self, req: TakeawayRequest) -> DomainResult<BookingOutcome> {
        let date = validate_booking_date(
            req.booking_date.as_deref(),
            FulfillmentType::Takeaway.min_days_ahead(),
            booking_date::today(),
        )?;

        let menu = self.load_menu(&req.items).await?;
        let totals = pricing::price_cart(&menu, &req.items, Decimal::ZERO)?;

        let created = retry_with_backoff(
            RetryConfig::default(),
            || self.insert_takeaway(&req, date, &totals),
            DomainError::is_serialization_conflict,
            "create_takeaway",
        )
        .await
        .inspect_err(|e| track_rejection(FulfillmentType::Takeaway, e))?;

        self.finalize(created).await
    }

    async fn insert_takeaway(
        &self,
        req: &TakeawayRequest,
        date: NaiveDate,
        totals: &Totals,
    ) -> DomainResult<InsertedBooking> {
        let outlet_id = req.outlet_id.clone();
        let slot_id = req.time_slot_id.clone();
        let customer = req.customer.clone();
        let notes = req.notes.clone();
        let totals = totals.clone();

        self.db
            .transaction_with_config::<_, InsertedBooking, DomainError>(
                move |txn| {
                    Box::pin(async move {
                        let slot = time_slot::Entity::find_by_id(&slot_id)
                            .one(txn)
                            .await
                            .map_err(db_err)?;
                        let slot = match slot {
                            Some(s) if s.outlet_id == outlet_id => s,
                            _ => return Err(DomainError::SlotNotFound),
                        };

                        let outlet_row = outlet::Entity::find_by_id(&outlet_id)
                            .one(txn)
                            .await
                            .map_err(db_err)?
                            .ok_or(DomainError::OutletNotFound)?;

                        if !booking_date::time_within_hours(
                            &slot.time,
                            &outlet_row.open_time,
                            &outlet_row.close_time,
                        ) {
                            return Err(DomainError::OutsideHours);
                        }

                        let booked = capacity::takeaway_orders_booked(txn, &slot.id, date).await?;
                        if !capacity::takeaway_fits(booked, slot.max_orders) {
                            return Err(DomainError::SlotFull);
                        }

                        let (order, payment) = insert_order_and_payment(
                            txn,
                            NewOrder {
                                outlet_id: &outlet_id,
                                fulfillment_type: FulfillmentType::Takeaway,
                                booking_date: date,
                                pax_count: None,
                                time_slot_id: Some(slot.id.clone()),
                                delivery_address: None,
                                customer: &customer,
                                totals: &totals,
                                notes,
                            },
                        )
                        .await?;

                        Ok(InsertedBooking {
                            order,
                            payment,
                            outlet_name: outlet_row.name,
                        })
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(flatten_txn_err)
    }

    pub async fn create_delivery(&self, req: DeliveryRequest) -> DomainResult<BookingOutcome> {
        let date = validate_booking_date(
            req.booking_date.as_deref(),
            FulfillmentType::Delivery.min_days_ahead(),
            booking_date::today(),
        )?;

        let outlet = self
            .repos
            .outlets()
            .find_by_id(&req.outlet_id)
            .await?
            .ok_or(DomainError::OutletNotFound)?;

        let menu = self.load_menu(&req.items).await?;
        let totals = pricing::price_cart(&menu, &req.items, outlet.delivery_fee)?;

        // No slot capacity to defend, but order and payment still land
        // in one transaction.
        let outlet_id = req.outlet_id.clone();
        let address = req.delivery_address.clone();
        let customer = req.customer.clone();
        let notes = req.notes.clone();
        let txn_totals = totals.clone();

        let (order_model, payment_model) = self
            .db
            .transaction::<_, (order::Model, payment::Model), DomainError>(move |txn| {
                Box::pin(async move {
                    insert_order_and_payment(
                        txn,
                        NewOrder {
                            outlet_id: &outlet_id,
                            fulfillment_type: FulfillmentType::Delivery,
                            booking_date: date,
                            pax_count: None,
                            time_slot_id: None,
                            delivery_address: Some(address),
                            customer: &customer,
                            totals: &txn_totals,
                            notes,
                        },
                    )
                    .await
                })
            })
            .await
            .map_err(flatten_txn_err)?;

        self.finalize(InsertedBooking {
            order: order_model,
            payment: payment_model,
            outlet_name: outlet.name,
        })
        .await
    }

    /// After commit: raise the gateway bill and persist its reference.
    async fn finalize(&self, created: InsertedBooking) -> DomainResult<BookingOutcome> {
        let order = created.order.into_domain()?;

        let bill = match self
            .gateway
            .create_bill(&BillRequest {
                order_id: order.id.clone(),
                order_no: order.order_no.clone(),
                outlet_name: created.outlet_name,
                customer_name: order.customer_name.clone(),
                customer_email: order.customer_email.clone(),
                customer_phone: order.customer_phone.clone(),
                amount: order.total,
            })
            .await
        {
            Ok(bill) => bill,
            Err(e) => {
                // The committed PENDING rows stay behind for the sweep;
                // rolling back here would silently release the reservation.
                warn!(
                    order_no = %order.order_no,
                    error = %e,
                    "Bill creation failed, leaving PENDING order for cleanup"
                );
                return Err(e);
            }
        };

        self.repos
            .payments()
            .set_bill_code(&created.payment.id, &bill.bill_code)
            .await?;

        counter!(
            "bookings_created_total",
            "fulfillment" => order.fulfillment_type.as_str()
        )
        .increment(1);
        info!(
            order_no = %order.order_no,
            fulfillment = %order.fulfillment_type,
            total = %order.total,
            "Booking created"
        );

        Ok(BookingOutcome {
            order,
            payment_url: bill.payment_url,
        })
    }

    pub async fn get_order(&self, order_no: &str) -> DomainResult<Order> {
        self.repos
            .orders()
            .find_by_order_no(order_no)
            .await?
            .ok_or(DomainError::OrderNotFound)
    }

    /// Customer cancellation. Allowed only before fulfillment; CANCELLED
    /// orders drop out of the derived capacity sums automatically, so no
    /// counter needs releasing.
    pub async fn cancel_order(&self, id: &str) -> DomainResult<Order> {
        let order = self
            .repos
            .orders()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::OrderNotFound)?;

        if !order.status.is_cancellable() {
            return Err(DomainError::Validation(format!(
                "Cannot cancel order with status {}",
                order.status
            )));
        }

        self.repos
            .orders()
            .update_status(id, OrderStatus::Cancelled)
            .await?;
        info!(order_no = %order.order_no, "Order cancelled by customer");

        Ok(Order {
            status: OrderStatus::Cancelled,
            ..order
        })
    }
}

fn track_rejection(fulfillment: FulfillmentType, e: &DomainError) {
    if matches!(e, DomainError::CapacityFull | DomainError::SlotFull) {
        counter!(
            "bookings_rejected_total",
            "fulfillment" => fulfillment.as_str()
        )
        .increment(1);
    }
}

/// Parameters for the shared order+payment insert.
struct NewOrder<'a> {
    outlet_id: &'a str,
    fulfillment_type: FulfillmentType,
    booking_date: NaiveDate,
    pax_count: Option<i32>,
    time_slot_id: Option<String>,
    delivery_address: Option<String>,
    customer: &'a CustomerInfo,
    totals: &'a Totals,
    notes: Option<String>,
}

async fn insert_order_and_payment<C: ConnectionTrait>(
    conn: &C,
    new: NewOrder<'_>,
) -> DomainResult<(order::Model, payment::Model)> {
    let now = Utc::now();
    let items = serde_json::to_value(&new.totals.lines)
        .map_err(|e| DomainError::Database(format!("Failed to encode order items: {}", e)))?;

    let order_model = order::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        order_no: Set(generate_order_no(booking_date::today())),
        outlet_id: Set(new.outlet_id.to_string()),
        fulfillment_type: Set(new.fulfillment_type.as_str().to_string()),
        booking_date: Set(new.booking_date),
        pax_count: Set(new.pax_count),
        time_slot_id: Set(new.time_slot_id),
        table_id: Set(None),
        delivery_address: Set(new.delivery_address),
        customer_name: Set(new.customer.name.clone()),
        customer_email: Set(new.customer.email.clone()),
        customer_phone: Set(new.customer.phone.clone()),
        items: Set(items),
        subtotal: Set(new.totals.subtotal),
        sst: Set(new.totals.sst),
        booking_fee: Set(new.totals.booking_fee),
        delivery_fee: Set(new.totals.delivery_fee),
        total: Set(new.totals.total),
        notes: Set(new.notes),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(db_err)?;

    let payment_model = payment::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        order_id: Set(order_model.id.clone()),
        amount: Set(new.totals.total),
        bill_code: Set(None),
        transaction_id: Set(None),
        status: Set(crate::domain::PaymentStatus::Pending.as_str().to_string()),
        paid_at: Set(None),
        callback_data: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(db_err)?;

    Ok((order_model, payment_model))
}
