//! Payment completion state machine
//!
//! Drives order status from the gateway's callback: SUCCESS promotes the
//! order to COMPLETED (the capacity-consuming, "truly paid" marker used
//! throughout), FAILED cancels it. Handlers are idempotent — a payment
//! already marked SUCCESS short-circuits to a no-op so duplicate webhook
//! deliveries never double-process. Notification dispatch happens after
//! the status writes, fire-and-forget.

use std::sync::Arc;

use chrono::{Local, NaiveTime, TimeZone, Utc};
use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::ports::Notifier;
use crate::domain::{
    DomainError, DomainResult, Order, OrderStatus, Payment, PaymentStatus, RepositoryProvider,
};

/// Result of processing a gateway callback.
#[derive(Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    Processed,
    /// Payment was already SUCCESS; nothing was changed
    AlreadyProcessed,
}

/// Parsed gateway callback payload.
#[derive(Debug, Clone)]
pub struct GatewayCallback {
    pub bill_code: String,
    pub status_id: String,
    pub transaction_id: Option<String>,
    /// Raw payload, persisted verbatim on the payment row
    pub raw: serde_json::Value,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<dyn Notifier>,
    /// Local hour at which booking-day reminders fire
    reminder_hour: u32,
}

impl PaymentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn Notifier>,
        reminder_hour: u32,
    ) -> Self {
        Self {
            repos,
            notifier,
            reminder_hour,
        }
    }

    /// Apply a gateway callback. Idempotent under duplicate delivery.
    pub async fn process_callback(&self, cb: GatewayCallback) -> DomainResult<CallbackOutcome> {
        let payment = self
            .repos
            .payments()
            .find_by_bill_code(&cb.bill_code)
            .await?
            .ok_or(DomainError::PaymentNotFound)?;

        if payment.status == PaymentStatus::Success {
            info!(bill_code = %cb.bill_code, "Duplicate callback, already processed");
            return Ok(CallbackOutcome::AlreadyProcessed);
        }

        let new_status = PaymentStatus::from_gateway_status_id(&cb.status_id);
        let order_id = payment.order_id.clone();

        self.repos
            .payments()
            .update(Payment {
                status: new_status,
                transaction_id: cb.transaction_id.clone(),
                paid_at: (new_status == PaymentStatus::Success).then(Utc::now),
                callback_data: Some(cb.raw.clone()),
                ..payment
            })
            .await?;

        counter!("payment_callbacks_total", "status" => new_status.as_str()).increment(1);

        match new_status {
            PaymentStatus::Success => {
                self.repos
                    .orders()
                    .update_status(&order_id, OrderStatus::Completed)
                    .await?;
                info!(bill_code = %cb.bill_code, "Payment successful, order completed");

                if let Some(order) = self.repos.orders().find_by_id(&order_id).await? {
                    self.dispatch_notifications(order);
                }
            }
            PaymentStatus::Failed => {
                // CANCELLED orders fall out of the derived capacity sums on
                // their own; there is no counter to decrement.
                self.repos
                    .orders()
                    .update_status(&order_id, OrderStatus::Cancelled)
                    .await?;
                info!(bill_code = %cb.bill_code, "Payment failed, order cancelled");
            }
            PaymentStatus::Pending => {
                info!(bill_code = %cb.bill_code, status_id = %cb.status_id, "Callback left payment pending");
            }
        }

        Ok(CallbackOutcome::Processed)
    }

    /// Manual completion (staff/testing path). Same idempotency rules as
    /// the webhook.
    pub async fn complete_manual(&self, order_no: &str) -> DomainResult<Order> {
        let order = self
            .repos
            .orders()
            .find_by_order_no(order_no)
            .await?
            .ok_or(DomainError::OrderNotFound)?;

        let payment = self
            .repos
            .payments()
            .find_by_order_id(&order.id)
            .await?
            .ok_or(DomainError::PaymentNotFound)?;

        if payment.status == PaymentStatus::Success {
            return Ok(order);
        }

        self.repos
            .payments()
            .update(Payment {
                status: PaymentStatus::Success,
                paid_at: Some(Utc::now()),
                transaction_id: Some(format!("MANUAL_{}", Uuid::new_v4().simple())),
                ..payment
            })
            .await?;

        self.repos
            .orders()
            .update_status(&order.id, OrderStatus::Completed)
            .await?;
        info!(order_no = %order.order_no, "Payment completed manually");

        let completed = Order {
            status: OrderStatus::Completed,
            ..order
        };
        self.dispatch_notifications(completed.clone());

        Ok(completed)
    }

    /// Payment status projection for the client's polling page.
    pub async fn status_by_bill_code(
        &self,
        bill_code: &str,
    ) -> DomainResult<(PaymentStatus, Order)> {
        let payment = self
            .repos
            .payments()
            .find_by_bill_code(bill_code)
            .await?
            .ok_or(DomainError::PaymentNotFound)?;

        let order = self
            .repos
            .orders()
            .find_by_id(&payment.order_id)
            .await?
            .ok_or(DomainError::OrderNotFound)?;

        Ok((payment.status, order))
    }

    /// Confirmation now, reminder on the booking morning. Both are spawned
    /// tasks; failures are logged and never surface into the callback
    /// response.
    fn dispatch_notifications(&self, order: Order) {
        let notifier = self.notifier.clone();
        let confirmation_order = order.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_confirmation(&confirmation_order).await {
                warn!(
                    order_no = %confirmation_order.order_no,
                    error = %e,
                    "Confirmation dispatch failed"
                );
            }
        });

        let Some(fire_at) = NaiveTime::from_hms_opt(self.reminder_hour, 0, 0)
            .map(|t| order.booking_date.and_time(t))
            .and_then(|dt| Local.from_local_datetime(&dt).single())
        else {
            return;
        };

        let delay = (fire_at.with_timezone(&Utc) - Utc::now()).to_std().ok();
        let Some(delay) = delay else {
            // Reminder time already passed (e.g. same-day booking after
            // the reminder hour); skip rather than nag immediately.
            return;
        };

        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = notifier.send_reminder(&order).await {
                warn!(order_no = %order.order_no, error = %e, "Reminder dispatch failed");
            }
        });
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate};
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::menu::MenuItemRepository;
    use crate::domain::order::OrderRepository;
    use crate::domain::outlet::OutletRepository;
    use crate::domain::payment::PaymentRepository;
    use crate::domain::table::TableRepository;
    use crate::domain::time_slot::TimeSlotRepository;
    use crate::domain::FulfillmentType;

    struct InMemoryOrders(Mutex<HashMap<String, Order>>);

    #[async_trait]
    impl OrderRepository for InMemoryOrders {
        async fn find_by_id(&self, id: &str) -> crate::domain::DomainResult<Option<Order>> {
            Ok(self.0.lock().unwrap().get(id).cloned())
        }

        async fn find_by_order_no(
            &self,
            order_no: &str,
        ) -> crate::domain::DomainResult<Option<Order>> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .values()
                .find(|o| o.order_no == order_no)
                .cloned())
        }

        async fn update_status(
            &self,
            id: &str,
            status: OrderStatus,
        ) -> crate::domain::DomainResult<()> {
            let mut orders = self.0.lock().unwrap();
            let order = orders.get_mut(id).ok_or(DomainError::OrderNotFound)?;
            order.status = status;
            Ok(())
        }

        async fn find_dine_in_for_date(
            &self,
            _outlet_id: &str,
            _date: NaiveDate,
        ) -> crate::domain::DomainResult<Vec<Order>> {
            Ok(Vec::new())
        }

        async fn delete_pending_older_than(
            &self,
            _cutoff: DateTime<Utc>,
        ) -> crate::domain::DomainResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    struct InMemoryPayments(Mutex<HashMap<String, Payment>>);

    #[async_trait]
    impl PaymentRepository for InMemoryPayments {
        async fn find_by_bill_code(
            &self,
            bill_code: &str,
        ) -> crate::domain::DomainResult<Option<Payment>> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .values()
                .find(|p| p.bill_code.as_deref() == Some(bill_code))
                .cloned())
        }

        async fn find_by_order_id(
            &self,
            order_id: &str,
        ) -> crate::domain::DomainResult<Option<Payment>> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .values()
                .find(|p| p.order_id == order_id)
                .cloned())
        }

        async fn set_bill_code(
            &self,
            payment_id: &str,
            bill_code: &str,
        ) -> crate::domain::DomainResult<()> {
            let mut payments = self.0.lock().unwrap();
            let payment = payments
                .get_mut(payment_id)
                .ok_or(DomainError::PaymentNotFound)?;
            payment.bill_code = Some(bill_code.to_string());
            Ok(())
        }

        async fn update(&self, p: Payment) -> crate::domain::DomainResult<()> {
            self.0.lock().unwrap().insert(p.id.clone(), p);
            Ok(())
        }
    }

    struct FakeProvider {
        orders: InMemoryOrders,
        payments: InMemoryPayments,
    }

    impl RepositoryProvider for FakeProvider {
        fn outlets(&self) -> &dyn OutletRepository {
            unimplemented!("not used by payment tests")
        }
        fn tables(&self) -> &dyn TableRepository {
            unimplemented!("not used by payment tests")
        }
        fn time_slots(&self) -> &dyn TimeSlotRepository {
            unimplemented!("not used by payment tests")
        }
        fn menu_items(&self) -> &dyn MenuItemRepository {
            unimplemented!("not used by payment tests")
        }
        fn orders(&self) -> &dyn OrderRepository {
            &self.orders
        }
        fn payments(&self) -> &dyn PaymentRepository {
            &self.payments
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        confirmations: AtomicUsize,
        reminders: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn send_confirmation(&self, _order: &Order) -> crate::domain::DomainResult<()> {
            self.confirmations.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        async fn send_reminder(&self, _order: &Order) -> crate::domain::DomainResult<()> {
            self.reminders.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    fn sample_order(id: &str, order_no: &str) -> Order {
        Order {
            id: id.into(),
            order_no: order_no.into(),
            outlet_id: "outlet-1".into(),
            fulfillment_type: FulfillmentType::DineIn,
            booking_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            pax_count: Some(4),
            time_slot_id: Some("slot-1".into()),
            table_id: None,
            delivery_address: None,
            customer_name: "Aisyah".into(),
            customer_email: "aisyah@example.com".into(),
            customer_phone: "0123456789".into(),
            items: Vec::new(),
            subtotal: Decimal::new(2700, 2),
            sst: Decimal::new(162, 2),
            booking_fee: Decimal::new(100, 2),
            delivery_fee: Decimal::ZERO,
            total: Decimal::new(2962, 2),
            notes: None,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_payment(id: &str, order_id: &str, bill_code: &str) -> Payment {
        Payment {
            id: id.into(),
            order_id: order_id.into(),
            amount: Decimal::new(2962, 2),
            bill_code: Some(bill_code.into()),
            transaction_id: None,
            status: PaymentStatus::Pending,
            paid_at: None,
            callback_data: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service_with(
        orders: Vec<Order>,
        payments: Vec<Payment>,
    ) -> (PaymentService, Arc<FakeProvider>, Arc<CountingNotifier>) {
        let provider = Arc::new(FakeProvider {
            orders: InMemoryOrders(Mutex::new(
                orders.into_iter().map(|o| (o.id.clone(), o)).collect(),
            )),
            payments: InMemoryPayments(Mutex::new(
                payments.into_iter().map(|p| (p.id.clone(), p)).collect(),
            )),
        });
        let notifier = Arc::new(CountingNotifier::default());
        let service = PaymentService::new(provider.clone(), notifier.clone(), 9);
        (service, provider, notifier)
    }

    fn callback(bill_code: &str, status_id: &str) -> GatewayCallback {
        GatewayCallback {
            bill_code: bill_code.into(),
            status_id: status_id.into(),
            transaction_id: Some("TXN-1".into()),
            raw: serde_json::json!({"billcode": bill_code, "status_id": status_id}),
        }
    }

    #[tokio::test]
    async fn success_callback_completes_order() {
        let (service, provider, _) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        let outcome = service.process_callback(callback("BILL1", "1")).await.unwrap();
        assert_eq!(outcome, CallbackOutcome::Processed);

        let payment = provider.payments.0.lock().unwrap()["p1"].clone();
        assert_eq!(payment.status, PaymentStatus::Success);
        assert!(payment.paid_at.is_some());
        assert!(payment.callback_data.is_some());

        let order = provider.orders.0.lock().unwrap()["o1"].clone();
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn duplicate_success_callback_is_a_noop() {
        let (service, provider, _) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        service.process_callback(callback("BILL1", "1")).await.unwrap();
        let first_paid_at = provider.payments.0.lock().unwrap()["p1"].paid_at;

        let outcome = service.process_callback(callback("BILL1", "1")).await.unwrap();
        assert_eq!(outcome, CallbackOutcome::AlreadyProcessed);

        // State identical to the single-delivery case.
        let payment = provider.payments.0.lock().unwrap()["p1"].clone();
        assert_eq!(payment.status, PaymentStatus::Success);
        assert_eq!(payment.paid_at, first_paid_at);
        assert_eq!(
            provider.orders.0.lock().unwrap()["o1"].status,
            OrderStatus::Completed
        );
    }

    #[tokio::test]
    async fn failure_callback_cancels_order() {
        let (service, provider, _) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        service.process_callback(callback("BILL1", "3")).await.unwrap();

        assert_eq!(
            provider.payments.0.lock().unwrap()["p1"].status,
            PaymentStatus::Failed
        );
        assert_eq!(
            provider.orders.0.lock().unwrap()["o1"].status,
            OrderStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn unknown_status_leaves_order_pending() {
        let (service, provider, _) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        service.process_callback(callback("BILL1", "2")).await.unwrap();

        assert_eq!(
            provider.payments.0.lock().unwrap()["p1"].status,
            PaymentStatus::Pending
        );
        assert_eq!(
            provider.orders.0.lock().unwrap()["o1"].status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn unknown_bill_code_is_not_found() {
        let (service, _, _) = service_with(Vec::new(), Vec::new());
        let err = service.process_callback(callback("GHOST", "1")).await.unwrap_err();
        assert!(matches!(err, DomainError::PaymentNotFound));
    }

    #[tokio::test]
    async fn success_dispatches_confirmation() {
        let (service, _, notifier) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        service.process_callback(callback("BILL1", "1")).await.unwrap();

        // Dispatch is spawned; give it a moment.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(notifier.confirmations.load(Ordering::SeqCst), 1);
        // Booking date is in the past relative to the wall clock, so the
        // reminder is skipped rather than fired immediately.
        assert_eq!(notifier.reminders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn manual_completion_is_idempotent() {
        let (service, provider, _) = service_with(
            vec![sample_order("o1", "AGP1")],
            vec![sample_payment("p1", "o1", "BILL1")],
        );

        let first = service.complete_manual("AGP1").await.unwrap();
        assert_eq!(first.status, OrderStatus::Completed);
        let txn_id = provider.payments.0.lock().unwrap()["p1"]
            .transaction_id
            .clone();
        assert!(txn_id.as_deref().unwrap().starts_with("MANUAL_"));

        let second = service.complete_manual("AGP1").await.unwrap();
        assert_eq!(second.status, OrderStatus::Completed);
        // Transaction reference untouched on the repeat call.
        assert_eq!(
            provider.payments.0.lock().unwrap()["p1"].transaction_id,
            txn_id
        );
    }
}
