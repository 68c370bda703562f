//! Evaluation summary provider: fetches form submissions for a channel.
//!
//! The webhook takes `{"channelId": "..."}` with Basic auth and answers with a
//! JSON array of submissions. Failures never reach the caller as errors: they
//! are logged and reported as "no result" so the reply can fall back to a
//! friendly message.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use oppbot_core::config::{InvalidScorePolicy, SummaryConfig};
use oppbot_core::summary::{EvaluationRecord, SummaryReport};

// ─────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────

/// Source of rendered evaluation summaries.
#[async_trait]
pub trait SummaryFetcher: Send + Sync {
    /// Rendered summary for a channel, or `None` if it could not be produced.
    ///
    /// An empty submission list is a result: "No evaluations submitted yet."
    async fn fetch_summary(&self, channel_id: &str) -> Option<String>;
}

// ─────────────────────────────────────────────
// Webhook client
// ─────────────────────────────────────────────

/// HTTP client for the summary webhook.
pub struct WebhookSummaryFetcher {
    webhook_url: Option<String>,
    username: String,
    password: String,
    policy: InvalidScorePolicy,
    client: reqwest::Client,
}

impl WebhookSummaryFetcher {
    pub fn new(config: &SummaryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            webhook_url: config.webhook_url.clone().filter(|u| !u.is_empty()),
            username: config.username.clone(),
            password: config.password.clone(),
            policy: config.invalid_scores,
            client,
        })
    }

    /// Check if the webhook URL is set.
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Call the webhook and reduce its records.
    pub async fn fetch_report(&self, channel_id: &str) -> anyhow::Result<SummaryReport> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("summary webhook URL is not configured"))?;

        debug!(channel_id = %channel_id, "fetching evaluation summary");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&json!({ "channelId": channel_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body,
                "summary webhook error"
            );
            anyhow::bail!("summary webhook returned {}", status);
        }

        let records: Vec<EvaluationRecord> = response.json().await?;
        debug!(records = records.len(), "summary webhook responded");

        Ok(SummaryReport::from_records(&records, self.policy)?)
    }
}

#[async_trait]
impl SummaryFetcher for WebhookSummaryFetcher {
    async fn fetch_summary(&self, channel_id: &str) -> Option<String> {
        if !self.is_configured() {
            warn!("summary webhook URL not configured, skipping fetch");
            return None;
        }

        match self.fetch_report(channel_id).await {
            Ok(report) => Some(report.render()),
            Err(e) => {
                error!(channel_id = %channel_id, error = %e, "failed to fetch evaluation summary");
                None
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
