//! Webhook-based notification relay
//!
//! Implements [`Notifier`] by posting a JSON event to the configured
//! mail-relay endpoint, which owns templating and actual delivery. When no
//! endpoint is configured the notifier is disabled and every send is a
//! logged no-op, so a missing relay can never fail a booking.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::application::ports::Notifier;
use crate::config::NotificationsConfig;
use crate::domain::{DomainError, DomainResult, Order};

pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &NotificationsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build notifier HTTP client");
        Self {
            client,
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// A notifier that drops everything; used when no relay is configured.
    pub fn disabled() -> Self {
        Self::new(&NotificationsConfig {
            webhook_url: None,
            ..NotificationsConfig::default()
        })
    }

    async fn post_event(&self, event: &str, order: &Order) -> DomainResult<()> {
        let Some(url) = &self.webhook_url else {
            debug!(
                order_no = %order.order_no,
                event, "Notification relay disabled, skipping"
            );
            return Ok(());
        };

        let payload = json!({
            "event": event,
            "orderNo": order.order_no,
            "fulfillmentType": order.fulfillment_type.as_str(),
            "bookingDate": order.booking_date.format("%Y-%m-%d").to_string(),
            "customerName": order.customer_name,
            "customerEmail": order.customer_email,
            "total": order.total,
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("notification relay unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Gateway(format!(
                "notification relay returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_confirmation(&self, order: &Order) -> DomainResult<()> {
        self.post_event("booking_confirmation", order).await
    }

    async fn send_reminder(&self, order: &Order) -> DomainResult<()> {
        self.post_event("booking_reminder", order).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use crate::domain::{FulfillmentType, OrderStatus};

    fn sample_order() -> Order {
        Order {
            id: "order-1".into(),
            order_no: "AGP20260310ABC123".into(),
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
            status: OrderStatus::Completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn disabled_notifier_is_a_noop() {
        let notifier = WebhookNotifier::disabled();
        notifier.send_confirmation(&sample_order()).await.unwrap();
        notifier.send_reminder(&sample_order()).await.unwrap();
    }
}
