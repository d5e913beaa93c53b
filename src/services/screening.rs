//! Sanctions/PEP screening port
//!
//! `ScreeningProvider` is the seam between the KYC service and whichever
//! AML vendor is wired in at startup. The live adapter caches verdicts so
//! repeated screenings of the same user within the TTL do not hit the
//! vendor again.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ScreeningConfig;
use crate::error::BmsError;
use crate::models::kyc::RiskLevel;

#[derive(Debug, Clone)]
pub struct ScreeningResult {
    pub sanctions_hit: bool,
    pub pep_hit: bool,
    pub risk: RiskLevel,
}

#[async_trait]
pub trait ScreeningProvider: Send + Sync {
    async fn screen(&self, user_id: &str) -> Result<ScreeningResult, BmsError>;
}

/// Vendor-backed screening with a TTL verdict cache
#[derive(Clone)]
pub struct LiveScreeningService {
    client: Client,
    api_url: String,
    api_key: String,
    cache: Cache<String, ScreeningResult>,
}

#[derive(Debug, Deserialize)]
struct VendorVerdict {
    sanctions_hit: bool,
    pep_hit: bool,
    risk: String,
}

impl LiveScreeningService {
    pub fn new(config: &ScreeningConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build screening HTTP client"),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            cache: Cache::builder()
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .max_capacity(10_000)
                .build(),
        }
    }

    async fn fetch_verdict(&self, user_id: &str) -> Result<ScreeningResult, BmsError> {
        let url = format!("{}/v1/screenings/{}", self.api_url, user_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| BmsError::External {
                service: "screening",
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BmsError::External {
                service: "screening",
                message: format!("vendor returned {}", response.status()),
            });
        }

        let verdict: VendorVerdict =
            response.json().await.map_err(|e| BmsError::External {
                service: "screening",
                message: format!("malformed verdict: {}", e),
            })?;

        let risk = verdict.risk.parse().unwrap_or(RiskLevel::High);
        Ok(ScreeningResult {
            sanctions_hit: verdict.sanctions_hit,
            pep_hit: verdict.pep_hit,
            risk,
        })
    }
}

#[async_trait]
impl ScreeningProvider for LiveScreeningService {
    async fn screen(&self, user_id: &str) -> Result<ScreeningResult, BmsError> {
        if let Some(cached) = self.cache.get(user_id).await {
            tracing::debug!(user_id, "screening verdict served from cache");
            return Ok(cached);
        }

        let verdict = self.fetch_verdict(user_id).await?;
        self.cache
            .insert(user_id.to_string(), verdict.clone())
            .await;
        Ok(verdict)
    }
}

/// Deterministic adapter for development and tests: the user id itself
/// encodes the verdict
#[derive(Clone, Default)]
pub struct MockScreeningService;

#[async_trait]
impl ScreeningProvider for MockScreeningService {
    async fn screen(&self, user_id: &str) -> Result<ScreeningResult, BmsError> {
        let sanctions_hit = user_id.contains("sanctioned");
        let pep_hit = user_id.contains("pep");
        let risk = if sanctions_hit {
            RiskLevel::Critical
        } else if pep_hit {
            RiskLevel::High
        } else {
            RiskLevel::Low
        };
        Ok(ScreeningResult {
            sanctions_hit,
            pep_hit,
            risk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_flags_sanctioned_users() {
        let verdict = MockScreeningService.screen("user-sanctioned-1").await.unwrap();
        assert!(verdict.sanctions_hit);
        assert_eq!(verdict.risk, RiskLevel::Critical);
    }

    #[tokio::test]
    async fn mock_clears_ordinary_users() {
        let verdict = MockScreeningService.screen("user-42").await.unwrap();
        assert!(!verdict.sanctions_hit);
        assert!(!verdict.pep_hit);
        assert_eq!(verdict.risk, RiskLevel::Low);
    }
}
