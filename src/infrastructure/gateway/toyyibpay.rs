//! ToyyibPay payment gateway adapter
//!
//! Implements [`PaymentGateway`] against the ToyyibPay bill API
//! (form-encoded `createBill` / `getBillTransactions`). When credentials
//! are missing or placeholders, the adapter switches to a sandbox mock
//! mode that returns a fake bill so local development works without an
//! account. Every request carries the configured timeout so a slow
//! gateway can never wedge a request task.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::ports::{BillRequest, CreatedBill, PaymentGateway};
use crate::config::GatewayConfig;
use crate::domain::{DomainError, DomainResult};

pub struct ToyyibPayGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

/// One entry of the `createBill` response array.
#[derive(Debug, Deserialize)]
struct CreateBillEntry {
    #[serde(rename = "BillCode")]
    bill_code: Option<String>,
}

impl ToyyibPayGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build gateway HTTP client");
        Self { client, config }
    }

    /// Unset credentials and the usual `.env.example` placeholders both
    /// mean "no real account".
    fn is_placeholder(value: &str) -> bool {
        value.is_empty()
            || value == "placeholder"
            || value.contains("your_")
            || value.contains("_here")
    }

    fn mock_mode(&self) -> bool {
        Self::is_placeholder(&self.config.secret_key)
            || Self::is_placeholder(&self.config.category_code)
    }

    /// ToyyibPay wants the amount in cents.
    fn amount_cents(amount: Decimal) -> i64 {
        (amount * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }
}

#[async_trait]
impl PaymentGateway for ToyyibPayGateway {
    async fn create_bill(&self, request: &BillRequest) -> DomainResult<CreatedBill> {
        if self.mock_mode() {
            warn!("ToyyibPay credentials not set or placeholders, using sandbox mock mode");
            let bill_code = format!("MOCK{}", Uuid::new_v4().simple());
            return Ok(CreatedBill {
                payment_url: format!(
                    "{}/checkout/mock?billCode={}&orderId={}",
                    self.config.frontend_url, bill_code, request.order_id
                ),
                bill_code,
            });
        }

        let phone: String = request
            .customer_phone
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let params: Vec<(&str, String)> = vec![
            ("userSecretKey", self.config.secret_key.clone()),
            ("categoryCode", self.config.category_code.clone()),
            ("billName", format!("Order {}", request.order_no)),
            (
                "billDescription",
                format!("Reservation at {}", request.outlet_name),
            ),
            ("billPriceSetting", "1".to_string()),
            ("billPayorInfo", "1".to_string()),
            (
                "billAmount",
                Self::amount_cents(request.amount).to_string(),
            ),
            (
                "billReturnUrl",
                format!("{}/confirmation/{}", self.config.frontend_url, request.order_no),
            ),
            (
                "billCallbackUrl",
                format!("{}/api/v1/payments/callback", self.config.backend_url),
            ),
            ("billExternalReferenceNo", request.order_no.clone()),
            ("billTo", request.customer_name.clone()),
            ("billEmail", request.customer_email.clone()),
            ("billPhone", phone),
            ("billSplitPayment", "0".to_string()),
            ("billSplitPaymentArgs", String::new()),
            // FPX only
            ("billPaymentChannel", "0".to_string()),
            (
                "billContentEmail",
                format!(
                    "Thank you for your reservation. Your order number is {}.",
                    request.order_no
                ),
            ),
            ("billChargeToCustomer", "1".to_string()),
            ("billExpiryDate", String::new()),
            ("billExpiryDays", "1".to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/index.php/api/createBill", self.config.base_url))
            .form(&params)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("createBill request failed: {}", e)))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::Gateway(format!("createBill response unreadable: {}", e)))?;

        let entries: Vec<CreateBillEntry> =
            serde_json::from_value(body.clone()).unwrap_or_default();

        match entries.into_iter().next().and_then(|e| e.bill_code) {
            Some(bill_code) => {
                info!("ToyyibPay bill created: {}", bill_code);
                Ok(CreatedBill {
                    payment_url: format!("{}/{}", self.config.base_url, bill_code),
                    bill_code,
                })
            }
            None => {
                error!("ToyyibPay createBill rejected: {}", body);
                Err(DomainError::Gateway(format!(
                    "createBill rejected: {}",
                    body
                )))
            }
        }
    }

    async fn bill_transactions(&self, bill_code: &str) -> DomainResult<serde_json::Value> {
        if self.mock_mode() {
            return Ok(serde_json::Value::Array(Vec::new()));
        }

        let response = self
            .client
            .post(format!(
                "{}/index.php/api/getBillTransactions",
                self.config.base_url
            ))
            .form(&[("billCode", bill_code)])
            .send()
            .await
            .map_err(|e| {
                DomainError::Gateway(format!("getBillTransactions request failed: {}", e))
            })?;

        response.json().await.map_err(|e| {
            DomainError::Gateway(format!("getBillTransactions response unreadable: {}", e))
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_gateway() -> ToyyibPayGateway {
        ToyyibPayGateway::new(GatewayConfig::default())
    }

    #[test]
    fn placeholder_detection() {
        assert!(ToyyibPayGateway::is_placeholder(""));
        assert!(ToyyibPayGateway::is_placeholder("your_secret_key_here"));
        assert!(ToyyibPayGateway::is_placeholder("placeholder"));
        assert!(!ToyyibPayGateway::is_placeholder("xs9f8-real-key"));
    }

    #[test]
    fn amount_is_converted_to_cents() {
        assert_eq!(
            ToyyibPayGateway::amount_cents(Decimal::new(2962, 2)),
            2962
        );
        assert_eq!(ToyyibPayGateway::amount_cents(Decimal::new(100, 2)), 100);
        assert_eq!(ToyyibPayGateway::amount_cents(Decimal::ZERO), 0);
    }

    #[tokio::test]
    async fn mock_mode_returns_fake_bill() {
        let gateway = mock_gateway();
        let bill = gateway
            .create_bill(&BillRequest {
                order_id: "order-1".into(),
                order_no: "AGP20260310ABC123".into(),
                outlet_name: "Masjid Tanah".into(),
                customer_name: "Aisyah".into(),
                customer_email: "aisyah@example.com".into(),
                customer_phone: "+60 12-345 6789".into(),
                amount: Decimal::new(2962, 2),
            })
            .await
            .unwrap();
        assert!(bill.bill_code.starts_with("MOCK"));
        assert!(bill.payment_url.contains("billCode=MOCK"));
        assert!(bill.payment_url.contains("orderId=order-1"));
    }
}
