//! Application context: built once at startup, shared read-only by requests.

use std::sync::Arc;

use anyhow::Context as _;

use oppbot_channels::{MessagingGateway, SlackWebClient};
use oppbot_core::config::{ChannelPrefixPolicy, Config, DispatchMode};
use oppbot_providers::{SummaryFetcher, WebhookSummaryFetcher};

/// Everything an action needs: the Slack gateway, the summary source, and
/// the settings that shape replies.
pub struct AppContext {
    pub gateway: Arc<dyn MessagingGateway>,
    pub summaries: Arc<dyn SummaryFetcher>,
    pub prefix: ChannelPrefixPolicy,
    pub form_url: Option<String>,
    pub dispatch_mode: DispatchMode,
}

impl AppContext {
    /// Assemble a context from explicit collaborators.
    pub fn new(
        config: &Config,
        gateway: Arc<dyn MessagingGateway>,
        summaries: Arc<dyn SummaryFetcher>,
    ) -> Self {
        Self {
            gateway,
            summaries,
            prefix: config.slack.prefix_policy(),
            form_url: config.slack.form_url.clone().filter(|u| !u.is_empty()),
            dispatch_mode: config.server.dispatch_mode,
        }
    }

    /// Build the production context: Slack Web API + summary webhook.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let gateway =
            SlackWebClient::from_config(&config.slack).context("failed to build Slack client")?;
        let summaries = WebhookSummaryFetcher::new(&config.summary)
            .context("failed to build summary webhook client")?;
        Ok(Self::new(config, Arc::new(gateway), Arc::new(summaries)))
    }

    /// Personalized form link for a channel, if a form URL is configured.
    pub fn form_link(&self, channel_id: &str, channel_name: &str) -> Option<String> {
        oppbot_core::messages::form_link(self.form_url.as_deref(), channel_id, channel_name)
    }
}
