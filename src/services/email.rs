//! Outbound email port
//!
//! SendGrid-style JSON API behind an `EmailSender` trait. Transient
//! failures retry with exponential backoff before surfacing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::EmailConfig;
use crate::error::BmsError;
use crate::services::backoff::{retry_with_backoff, Attempt};

const MAX_ATTEMPTS: u32 = 4;
const INITIAL_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), BmsError>;
}

#[derive(Clone)]
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

#[derive(Serialize)]
struct MailPayload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

impl HttpEmailSender {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build email HTTP client"),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        }
    }

    async fn attempt_send(&self, email: &OutboundEmail) -> Attempt<()> {
        let payload = MailPayload {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: &email.to }],
            }],
            from: EmailAddress {
                email: &self.from_address,
            },
            subject: &email.subject,
            content: vec![Content {
                content_type: "text/plain",
                value: &email.body,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Err(e) => Attempt::Transient(e.to_string()),
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    Attempt::Ok(())
                } else if status.is_server_error() || status.as_u16() == 429 {
                    Attempt::Transient(format!("provider returned {}", status))
                } else {
                    Attempt::Fatal(format!("provider returned {}", status))
                }
            }
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<(), BmsError> {
        retry_with_backoff("email", MAX_ATTEMPTS, INITIAL_DELAY, || {
            self.attempt_send(&email)
        })
        .await
        .map_err(|message| BmsError::External {
            service: "email",
            message,
        })?;

        tracing::info!(to = %email.to, subject = %email.subject, "email dispatched");
        Ok(())
    }
}

/// Records sends instead of dispatching; for development and tests
#[derive(Clone, Default)]
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<(), BmsError> {
        self.sent.lock().await.push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_sends() {
        let sender = MockEmailSender::default();
        sender
            .send(OutboundEmail {
                to: "user@example.com".to_string(),
                subject: "KYC approved".to_string(),
                body: "Your verification is complete.".to_string(),
            })
            .await
            .unwrap();

        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "user@example.com");
    }
}
