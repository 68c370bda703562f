//! Event classification for Slack Events API payloads.
//!
//! A delivery is one of:
//! - `url_verification`: the one-time handshake, echoed back to Slack
//! - `event_callback` wrapping `channel_created` or `app_mention`
//! - anything else, which is acknowledged and ignored
//!
//! Only presence checks are performed. A recognized event that lacks a
//! required field is a [`ClassifyError`], which the transport reports as a
//! server fault rather than silently dropping.

use serde_json::Value;
use thiserror::Error;

/// A classified inbound delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// URL verification handshake.
    Handshake { challenge: String },
    /// A channel was created.
    ChannelCreated {
        channel_id: String,
        channel_name: String,
    },
    /// The bot was mentioned.
    AppMention {
        channel_id: String,
        user_id: String,
        text: String,
    },
    /// Nothing to act on. `event_type` is set for callbacks of other event types.
    Unhandled { event_type: Option<String> },
}

impl InboundEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Handshake { .. } => "handshake",
            InboundEvent::ChannelCreated { .. } => "channel_created",
            InboundEvent::AppMention { .. } => "app_mention",
            InboundEvent::Unhandled { .. } => "unhandled",
        }
    }

    /// Whether the payload was an `event_callback` envelope.
    pub fn is_callback(&self) -> bool {
        match self {
            InboundEvent::ChannelCreated { .. } | InboundEvent::AppMention { .. } => true,
            InboundEvent::Unhandled { event_type } => event_type.is_some(),
            InboundEvent::Handshake { .. } => false,
        }
    }
}

/// A recognized payload was missing something it needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("missing or non-string field `{0}`")]
    MissingField(&'static str),
}

/// Classify a parsed Events API payload.
pub fn classify(payload: &Value) -> Result<InboundEvent, ClassifyError> {
    match payload["type"].as_str() {
        Some("url_verification") => Ok(InboundEvent::Handshake {
            challenge: required_str(&payload["challenge"], "challenge")?,
        }),
        Some("event_callback") => classify_callback(payload),
        _ => Ok(InboundEvent::Unhandled { event_type: None }),
    }
}

fn classify_callback(payload: &Value) -> Result<InboundEvent, ClassifyError> {
    let event = payload
        .get("event")
        .filter(|e| e.is_object())
        .ok_or(ClassifyError::MissingField("event"))?;
    let event_type = event["type"].as_str().unwrap_or_default();

    match event_type {
        "channel_created" => {
            let channel = event
                .get("channel")
                .filter(|c| c.is_object())
                .ok_or(ClassifyError::MissingField("event.channel"))?;
            Ok(InboundEvent::ChannelCreated {
                channel_id: required_str(&channel["id"], "event.channel.id")?,
                // A nameless channel can never match the prefix.
                channel_name: channel["name"].as_str().unwrap_or_default().to_string(),
            })
        }
        "app_mention" => Ok(InboundEvent::AppMention {
            channel_id: required_str(&event["channel"], "event.channel")?,
            user_id: required_str(&event["user"], "event.user")?,
            text: event["text"].as_str().unwrap_or_default().to_string(),
        }),
        other => Ok(InboundEvent::Unhandled {
            event_type: Some(other.to_string()),
        }),
    }
}

fn required_str(value: &Value, field: &'static str) -> Result<String, ClassifyError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ClassifyError::MissingField(field))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
