//! Slack gateway: Web API (REST) over HTTPS.
//!
//! Uses three Web API methods with the bot token:
//! - `conversations.join`
//! - `chat.postMessage`
//! - `conversations.info`
//!
//! Every response carries an `ok` flag; `ok: false` becomes an error that
//! names the method and Slack's error code (`not_in_channel`, `ratelimited`, ...).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use oppbot_core::config::SlackConfig;

use crate::base::{ChannelInfo, MessagingGateway, OutgoingMessage};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Slack Web API client authenticated with a bot token.
pub struct SlackWebClient {
    bot_token: String,
    api_base: String,
    http: reqwest::Client,
}

impl SlackWebClient {
    /// Create a client against `api_base` (normally `https://slack.com/api`).
    pub fn new(bot_token: &str, api_base: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            bot_token: bot_token.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Create a client from the Slack section of the config.
    pub fn from_config(config: &SlackConfig) -> anyhow::Result<Self> {
        Self::new(&config.bot_token, &config.api_base)
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }

    /// Check the `ok` flag of a Web API response body.
    fn check_ok(method: &str, body: Value) -> anyhow::Result<Value> {
        if body["ok"].as_bool() != Some(true) {
            let err = body["error"].as_str().unwrap_or("unknown");
            anyhow::bail!("{} failed: {}", method, err);
        }
        Ok(body)
    }

    /// POST a JSON body to a Web API method.
    async fn post_json(&self, method: &str, body: &Value) -> anyhow::Result<Value> {
        let resp = self
            .http
            .post(self.url(method))
            .bearer_auth(&self.bot_token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", method, status);
        }

        Self::check_ok(method, resp.json().await?)
    }
}

#[async_trait]
impl MessagingGateway for SlackWebClient {
    async fn join_channel(&self, channel_id: &str) -> anyhow::Result<()> {
        self.post_json("conversations.join", &json!({ "channel": channel_id }))
            .await?;
        debug!(channel_id = %channel_id, "joined channel");
        Ok(())
    }

    async fn post_message(&self, msg: &OutgoingMessage) -> anyhow::Result<String> {
        let body = self.post_json("chat.postMessage", &msg.to_payload()).await?;
        let ts = body["ts"].as_str().unwrap_or_default().to_string();
        debug!(channel_id = %msg.channel, ts = %ts, "posted message");
        Ok(ts)
    }

    async fn channel_info(&self, channel_id: &str) -> anyhow::Result<ChannelInfo> {
        let resp = self
            .http
            .get(self.url("conversations.info"))
            .bearer_auth(&self.bot_token)
            .query(&[("channel", channel_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("conversations.info returned HTTP {}", status);
        }

        let body = Self::check_ok("conversations.info", resp.json().await?)?;
        let channel = &body["channel"];
        Ok(ChannelInfo {
            id: channel["id"].as_str().unwrap_or(channel_id).to_string(),
            name: channel["name"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("no name in conversations.info response"))?
                .to_string(),
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
