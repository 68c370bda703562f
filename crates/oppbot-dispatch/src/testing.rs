//! Recording doubles for the gateway and summary fetcher.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use oppbot_channels::{ChannelInfo, MessagingGateway, OutgoingMessage};
use oppbot_core::config::Config;
use oppbot_providers::SummaryFetcher;

use crate::context::AppContext;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Join(String),
    Post(OutgoingMessage),
    Info(String),
}

/// Gateway that records calls and can be told to fail or to hold joins.
#[derive(Default)]
pub struct MockGateway {
    pub calls: Mutex<Vec<Call>>,
    pub fail_join: bool,
    pub fail_post: bool,
    /// Name returned by `channel_info`; `None` makes the lookup fail.
    pub channel_name: Option<String>,
    /// When set, `join_channel` waits for a notification before returning.
    pub gate: Option<Arc<Notify>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            channel_name: Some("opp-acme".into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn joins(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Join(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<OutgoingMessage> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Post(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Wait until `n` messages have been posted, or give up after a second.
    pub async fn wait_for_posts(&self, n: usize) -> Vec<OutgoingMessage> {
        for _ in 0..100 {
            let posts = self.posts();
            if posts.len() >= n {
                return posts;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.posts()
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn join_channel(&self, channel_id: &str) -> anyhow::Result<()> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Join(channel_id.to_string()));
        if self.fail_join {
            anyhow::bail!("conversations.join failed: channel_not_found");
        }
        Ok(())
    }

    async fn post_message(&self, msg: &OutgoingMessage) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(Call::Post(msg.clone()));
        if self.fail_post {
            anyhow::bail!("chat.postMessage failed: not_in_channel");
        }
        Ok("1700000000.000100".to_string())
    }

    async fn channel_info(&self, channel_id: &str) -> anyhow::Result<ChannelInfo> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Info(channel_id.to_string()));
        match &self.channel_name {
            Some(name) => Ok(ChannelInfo {
                id: channel_id.to_string(),
                name: name.clone(),
            }),
            None => anyhow::bail!("conversations.info failed: missing_scope"),
        }
    }
}

/// Fetcher that returns a canned result and counts requests.
pub struct MockSummaries {
    pub result: Option<String>,
    pub requests: Mutex<Vec<String>>,
}

impl MockSummaries {
    pub fn returning(result: Option<&str>) -> Self {
        Self {
            result: result.map(String::from),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryFetcher for MockSummaries {
    async fn fetch_summary(&self, channel_id: &str) -> Option<String> {
        self.requests.lock().unwrap().push(channel_id.to_string());
        self.result.clone()
    }
}

/// Context with a form URL configured, wired to the given doubles.
pub fn context_with(
    gateway: Arc<MockGateway>,
    summaries: Arc<MockSummaries>,
    configure: impl FnOnce(&mut Config),
) -> AppContext {
    let mut config = Config::default();
    config.slack.form_url = Some("https://forms.example.com/eval".into());
    configure(&mut config);
    AppContext::new(&config, gateway, summaries)
}
