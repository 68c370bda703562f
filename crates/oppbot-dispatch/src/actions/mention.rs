//! Reply to an @mention with a form link, a summary, both, or help.

use tracing::{debug, error, info, warn};

use oppbot_channels::OutgoingMessage;
use oppbot_core::messages::{
    combined_message, link_message, summary_message, MentionIntent, HELP_TEXT,
};
use oppbot_core::utils::truncate_string;

use crate::context::AppContext;

/// Answer a mention in `channel_id`. Returns the detected intent.
///
/// Send failures are logged and swallowed.
pub async fn reply_to_mention(
    ctx: &AppContext,
    channel_id: &str,
    user_id: &str,
    text: &str,
) -> MentionIntent {
    // The name is only used for logging and the form link.
    let channel_name = match ctx.gateway.channel_info(channel_id).await {
        Ok(info) => info.name,
        Err(e) => {
            warn!(channel_id = %channel_id, error = %e, "could not resolve channel name");
            channel_id.to_string()
        }
    };

    let intent = MentionIntent::from_text(text);
    info!(
        channel = %channel_name,
        user_id = %user_id,
        intent = ?intent,
        text = %truncate_string(text, 80),
        "handling mention"
    );

    let summary = if intent.needs_summary() {
        let summary = ctx.summaries.fetch_summary(channel_id).await;
        if summary.is_none() {
            debug!(channel_id = %channel_id, "no summary available, using fallback text");
        }
        summary
    } else {
        None
    };

    let reply = match intent {
        MentionIntent::Combined => {
            let link = ctx.form_link(channel_id, &channel_name);
            combined_message(summary.as_deref(), link.as_deref())
        }
        MentionIntent::SummaryOnly => summary_message(summary.as_deref()),
        MentionIntent::LinkOnly => {
            let link = ctx.form_link(channel_id, &channel_name);
            link_message(link.as_deref())
        }
        MentionIntent::Help => HELP_TEXT.to_string(),
    };

    let msg = OutgoingMessage::reply(channel_id, reply);
    match ctx.gateway.post_message(&msg).await {
        Ok(ts) => debug!(channel_id = %channel_id, ts = %ts, "mention reply sent"),
        Err(e) => error!(channel_id = %channel_id, error = %e, "failed to send mention reply"),
    }

    intent
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
