//! Payment processor port
//!
//! Stripe-style create-intent behind a `PaymentGateway` trait. Every
//! attempt carries the same idempotency key, so retrying after a
//! transient failure cannot double-charge.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::error::BmsError;
use crate::services::backoff::{retry_with_backoff, Attempt};

const MAX_ATTEMPTS: u32 = 4;
const INITIAL_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub intent_id: String,
    pub client_secret: Option<String>,
    pub amount: Decimal,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<PaymentIntent, BmsError>;
}

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    api_url: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build payment HTTP client"),
            api_url: config.api_url.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    async fn attempt_create(
        &self,
        amount_minor: i64,
        currency: &str,
        idempotency_key: &str,
    ) -> Attempt<IntentResponse> {
        let url = format!("{}/payment_intents", self.api_url);
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .header("Idempotency-Key", idempotency_key)
            .form(&params)
            .send()
            .await;

        match response {
            Err(e) => Attempt::Transient(e.to_string()),
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    match resp.json::<IntentResponse>().await {
                        Ok(intent) => Attempt::Ok(intent),
                        Err(e) => Attempt::Fatal(format!("malformed intent response: {}", e)),
                    }
                } else if status.is_server_error() || status.as_u16() == 429 {
                    Attempt::Transient(format!("processor returned {}", status))
                } else {
                    Attempt::Fatal(format!("processor returned {}", status))
                }
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<PaymentIntent, BmsError> {
        // Processor expects minor units (cents)
        let amount_minor = (amount * Decimal::from(100))
            .trunc()
            .try_into()
            .map_err(|_| BmsError::External {
                service: "payments",
                message: format!("amount {} out of range", amount),
            })?;

        let idempotency_key = Uuid::new_v4().to_string();
        let intent = retry_with_backoff("payments", MAX_ATTEMPTS, INITIAL_DELAY, || {
            self.attempt_create(amount_minor, currency, &idempotency_key)
        })
        .await
        .map_err(|message| BmsError::External {
            service: "payments",
            message,
        })?;

        Ok(PaymentIntent {
            intent_id: intent.id,
            client_secret: intent.client_secret,
            amount,
            currency: currency.to_string(),
        })
    }
}

/// Returns canned intents without calling out; for development and tests
#[derive(Clone, Default)]
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<PaymentIntent, BmsError> {
        Ok(PaymentIntent {
            intent_id: format!("pi_mock_{}", Uuid::new_v4().simple()),
            client_secret: Some(format!("pi_mock_secret_{}", Uuid::new_v4().simple())),
            amount,
            currency: currency.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn mock_gateway_echoes_amount_and_currency() {
        let intent = MockPaymentGateway
            .create_intent(dec!(49.99), "usd")
            .await
            .unwrap();
        assert_eq!(intent.amount, dec!(49.99));
        assert_eq!(intent.currency, "usd");
        assert!(intent.intent_id.starts_with("pi_mock_"));
    }
}
