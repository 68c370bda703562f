//! Oppbot Channels: the messaging gateway.
//!
//! This crate provides:
//! - **base**: The `MessagingGateway` trait and the message types it carries
//! - **slack**: `SlackWebClient`, the Slack Web API implementation

pub mod base;
pub mod slack;

pub use base::{ChannelInfo, MessagingGateway, OutgoingMessage};
pub use slack::SlackWebClient;
