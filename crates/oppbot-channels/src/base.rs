//! Gateway trait: the abstract interface to the chat platform.
//!
//! The webhook only needs three operations:
//! - `join_channel()`: become a member of a public channel
//! - `post_message()`: send a message, returning its timestamp
//! - `channel_info()`: resolve a channel's display name

use async_trait::async_trait;
use serde_json::{json, Value};

/// Basic channel metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
}

/// A message to post.
///
/// When `fallback` is set, `text` is sent as a single mrkdwn section block and
/// `fallback` becomes the notification text. Otherwise `text` is sent as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingMessage {
    pub channel: String,
    pub text: String,
    pub fallback: Option<String>,
    /// `None` leaves Slack's default.
    pub unfurl_links: Option<bool>,
    pub unfurl_media: Option<bool>,
}

impl OutgoingMessage {
    /// A plain reply with link and media previews disabled.
    pub fn reply(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            fallback: None,
            unfurl_links: Some(false),
            unfurl_media: Some(false),
        }
    }

    /// A block message with a notification fallback.
    pub fn section(
        channel: impl Into<String>,
        fallback: impl Into<String>,
        mrkdwn: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            text: mrkdwn.into(),
            fallback: Some(fallback.into()),
            unfurl_links: None,
            unfurl_media: None,
        }
    }

    /// `chat.postMessage` request body.
    pub fn to_payload(&self) -> Value {
        let mut body = match &self.fallback {
            Some(fallback) => json!({
                "channel": self.channel,
                "text": fallback,
                "blocks": [{
                    "type": "section",
                    "text": { "type": "mrkdwn", "text": self.text },
                }],
            }),
            None => json!({
                "channel": self.channel,
                "text": self.text,
            }),
        };

        if let Some(unfurl) = self.unfurl_links {
            body["unfurl_links"] = json!(unfurl);
        }
        if let Some(unfurl) = self.unfurl_media {
            body["unfurl_media"] = json!(unfurl);
        }
        body
    }
}

/// Everything the dispatcher needs from the chat platform.
///
/// Held as `Arc<dyn MessagingGateway>` in the app context so tests can
/// substitute a recording mock.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Join a channel by ID.
    async fn join_channel(&self, channel_id: &str) -> anyhow::Result<()>;

    /// Post a message. Returns the message timestamp (`ts`).
    async fn post_message(&self, msg: &OutgoingMessage) -> anyhow::Result<String>;

    /// Look up a channel's metadata.
    async fn channel_info(&self, channel_id: &str) -> anyhow::Result<ChannelInfo>;
}
