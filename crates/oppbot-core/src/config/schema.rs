//! Configuration schema.
//!
//! Hierarchy: `Config` → `SlackConfig`, `SummaryConfig`, `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.oppbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub slack: SlackConfig,
    pub summary: SummaryConfig,
    pub server: ServerConfig,
}

// ─────────────────────────────────────────────
// Slack
// ─────────────────────────────────────────────

/// Slack workspace settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`): required for joining and posting.
    pub bot_token: String,
    /// Web API base URL. Overridden in tests.
    pub api_base: String,
    /// Channel-name prefix that triggers the onboarding message.
    pub channel_prefix: String,
    /// Evaluation form URL. `channelId` and `channelName` are appended as query params.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base: "https://slack.com/api".to_string(),
            channel_prefix: "opp".to_string(),
            form_url: None,
        }
    }
}

impl SlackConfig {
    /// Whether a bot token is present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty()
    }

    /// The prefix policy derived from `channel_prefix`.
    pub fn prefix_policy(&self) -> ChannelPrefixPolicy {
        ChannelPrefixPolicy::new(&self.channel_prefix)
    }
}

/// Case-insensitive channel-name prefix test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPrefixPolicy {
    prefix: String,
}

impl ChannelPrefixPolicy {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True when `channel_name`, lower-cased, starts with the prefix.
    ///
    /// An empty name never matches, even with an empty prefix.
    pub fn matches(&self, channel_name: &str) -> bool {
        !channel_name.is_empty() && channel_name.to_lowercase().starts_with(&self.prefix)
    }
}

// ─────────────────────────────────────────────
// Summary webhook
// ─────────────────────────────────────────────

/// External summary webhook settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryConfig {
    /// Webhook URL. When unset, summaries are never fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Basic-auth user.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// What to do with records whose score is not a number.
    pub invalid_scores: InvalidScorePolicy,
    /// Request timeout for the webhook call.
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            username: String::new(),
            password: String::new(),
            invalid_scores: InvalidScorePolicy::default(),
            timeout_secs: 30,
        }
    }
}

impl SummaryConfig {
    /// Whether a non-empty webhook URL is set.
    pub fn is_configured(&self) -> bool {
        self.webhook_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Policy for evaluation records whose `Scoring` is not numeric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidScorePolicy {
    /// The whole summary fails; callers fall back to their "no data" text.
    #[default]
    Fail,
    /// The record is listed but left out of the average.
    Skip,
}

impl FromStr for InvalidScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown invalid-score policy: {other}")),
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path Slack delivers events to.
    pub events_path: String,
    /// Whether actions finish before Slack gets its acknowledgment.
    pub dispatch_mode: DispatchMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            events_path: "/slack/events".to_string(),
            dispatch_mode: DispatchMode::default(),
        }
    }
}

/// How side-effecting actions relate to the HTTP acknowledgment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Run the action to completion, then acknowledge.
    #[default]
    Await,
    /// Acknowledge immediately; the action runs on a spawned task.
    Background,
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "await" => Ok(Self::Await),
            "background" => Ok(Self::Background),
            other => Err(format!("unknown dispatch mode: {other}")),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
