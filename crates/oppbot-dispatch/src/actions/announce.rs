//! Join a new opportunity channel and post the evaluation questions.

use anyhow::Context as _;
use tracing::{error, info};

use oppbot_channels::OutgoingMessage;
use oppbot_core::messages::{welcome_message, WELCOME_FALLBACK};

use crate::context::AppContext;

/// Join `channel_id` and post the onboarding message.
///
/// Failures are logged and swallowed.
pub async fn join_and_announce(ctx: &AppContext, channel_id: &str, channel_name: &str) {
    match try_join_and_announce(ctx, channel_id, channel_name).await {
        Ok(ts) => info!(
            channel_id = %channel_id,
            channel_name = %channel_name,
            ts = %ts,
            "posted evaluation questions"
        ),
        Err(e) => error!(
            channel_id = %channel_id,
            channel_name = %channel_name,
            error = %format!("{e:#}"),
            "error posting evaluation questions"
        ),
    }
}

async fn try_join_and_announce(
    ctx: &AppContext,
    channel_id: &str,
    channel_name: &str,
) -> anyhow::Result<String> {
    ctx.gateway
        .join_channel(channel_id)
        .await
        .context("joining channel")?;
    info!(channel_name = %channel_name, "joined channel");

    let link = ctx.form_link(channel_id, channel_name);
    let msg = OutgoingMessage::section(
        channel_id,
        WELCOME_FALLBACK,
        welcome_message(link.as_deref()),
    );

    ctx.gateway
        .post_message(&msg)
        .await
        .context("posting welcome message")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
