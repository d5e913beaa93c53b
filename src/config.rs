//! Startup configuration
//!
//! All environment access happens here, once, at startup. The resulting
//! struct is injected through `AppState`; nothing else reads env vars.

use std::env;

use chrono::Duration;
use thiserror::Error;

use crate::models::ticket::TicketPriority;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub screening: ScreeningConfig,
    pub email: EmailConfig,
    pub payments: PaymentConfig,
    pub sla: SlaConfig,
}

#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub api_url: String,
    pub api_key: String,
    /// Screening verdicts are cached this long before re-checking
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub api_url: String,
    pub secret_key: String,
}

/// First-response SLA windows per ticket priority, in minutes
#[derive(Debug, Clone)]
pub struct SlaConfig {
    pub low_mins: i64,
    pub normal_mins: i64,
    pub high_mins: i64,
    pub urgent_mins: i64,
}

impl SlaConfig {
    pub fn window(&self, priority: TicketPriority) -> Duration {
        let mins = match priority {
            TicketPriority::Low => self.low_mins,
            TicketPriority::Normal => self.normal_mins,
            TicketPriority::High => self.high_mins,
            TicketPriority::Urgent => self.urgent_mins,
        };
        Duration::minutes(mins)
    }
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            low_mins: 24 * 60,
            normal_mins: 8 * 60,
            high_mins: 2 * 60,
            urgent_mins: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let screening = ScreeningConfig {
            api_url: env::var("SCREENING_API_URL")
                .unwrap_or_else(|_| "https://api.screening.example".to_string()),
            api_key: env::var("SCREENING_API_KEY").unwrap_or_default(),
            cache_ttl_secs: parse_var("SCREENING_CACHE_TTL_SECS", 3600)?,
        };

        let email = EmailConfig {
            api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.sendgrid.com/v3/mail/send".to_string()),
            api_key: env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "ops@exchange.example".to_string()),
        };

        let payments = PaymentConfig {
            api_url: env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com/v1".to_string()),
            secret_key: env::var("PAYMENT_SECRET_KEY").unwrap_or_default(),
        };

        let sla = SlaConfig {
            low_mins: parse_var("SLA_LOW_MINS", SlaConfig::default().low_mins)?,
            normal_mins: parse_var("SLA_NORMAL_MINS", SlaConfig::default().normal_mins)?,
            high_mins: parse_var("SLA_HIGH_MINS", SlaConfig::default().high_mins)?,
            urgent_mins: parse_var("SLA_URGENT_MINS", SlaConfig::default().urgent_mins)?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            screening,
            email,
            payments,
            sla,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sla_windows_scale_with_priority() {
        let sla = SlaConfig::default();
        assert!(sla.window(TicketPriority::Urgent) < sla.window(TicketPriority::High));
        assert!(sla.window(TicketPriority::High) < sla.window(TicketPriority::Normal));
        assert!(sla.window(TicketPriority::Normal) < sla.window(TicketPriority::Low));
    }
}
