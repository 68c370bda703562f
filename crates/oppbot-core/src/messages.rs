//! Reply composition: onboarding, form link, summary and help messages.
//!
//! All text is Slack mrkdwn. Nothing here performs I/O; the dispatch crate
//! decides what to send and where.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::summary::NO_EVALUATIONS;

/// Notification fallback for the onboarding message.
pub const WELCOME_FALLBACK: &str = "Opportunity Evaluation Questions";

/// Onboarding message posted to new opportunity channels.
pub const WELCOME_TEXT: &str = "\
This channel is dedicated to the new opportunity. To ensure that our Engineering teams can best support your efforts and guide this opportunity towards closure, please take a few moments to answer the following questions. We trust & appreciate your insights and they are crucial in aligning our teams for success. Thank you for your collaboration and welcome aboard!

You can read more about the questions and why they are important :point_right: <https://axelerant.atlassian.net/wiki/spaces/AH/pages/5108007089/Opp+Eval+Framework|here>.

:one: *Is this opportunity aligned with our expertise and strategic goals for the Digital BU? (Yes, no). If yes, explain how?*

:two: *What is the client's technical ecosystem and preferred engagement model?*

:three: *What are the top 3 value drivers for Axelerant to pursue this project?*";

/// Reply when the summary could not be fetched.
pub const SUMMARY_UNAVAILABLE: &str =
    "I couldn't fetch the evaluation summary right now. Please try again in a bit.";

/// Help text listing the keywords the bot understands.
pub const HELP_TEXT: &str = "\
Hi! Mention me with one of these keywords:
• *link* — get the evaluation form for this channel
• *summary* — see the evaluations submitted so far
You can ask for both in one message.";

const LINK_NOT_CONFIGURED: &str = "The evaluation form link is not configured yet.";

static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@[A-Z0-9]+(?:\|[^>]*)?>").unwrap());

// ─────────────────────────────────────────────
// Mention intent
// ─────────────────────────────────────────────

/// What a mention asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MentionIntent {
    /// Both "summary" and "link".
    Combined,
    SummaryOnly,
    LinkOnly,
    Help,
}

impl MentionIntent {
    pub fn from_flags(contains_link: bool, contains_summary: bool) -> Self {
        match (contains_link, contains_summary) {
            (true, true) => Self::Combined,
            (false, true) => Self::SummaryOnly,
            (true, false) => Self::LinkOnly,
            (false, false) => Self::Help,
        }
    }

    /// Detect keywords in mention text, ignoring case and `<@U…>` mentions.
    pub fn from_text(text: &str) -> Self {
        let normalized = strip_user_mentions(text).to_lowercase();
        Self::from_flags(normalized.contains("link"), normalized.contains("summary"))
    }

    /// Whether answering requires a summary fetch.
    pub fn needs_summary(self) -> bool {
        matches!(self, Self::Combined | Self::SummaryOnly)
    }
}

/// Remove `<@U123>` / `<@U123|name>` user mentions.
pub fn strip_user_mentions(text: &str) -> String {
    USER_MENTION.replace_all(text, "").trim().to_string()
}

// ─────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────

/// Build the personalized form link for a channel.
///
/// Returns `None` when no form URL is configured or it does not parse.
pub fn form_link(form_url: Option<&str>, channel_id: &str, channel_name: &str) -> Option<String> {
    let base = form_url.filter(|u| !u.is_empty())?;
    let url = Url::parse_with_params(
        base,
        &[("channelId", channel_id), ("channelName", channel_name)],
    )
    .map_err(|e| tracing::warn!(error = %e, form_url = %base, "invalid form URL"))
    .ok()?;
    Some(url.to_string())
}

/// Onboarding text, with the form link appended when available.
pub fn welcome_message(link: Option<&str>) -> String {
    match link {
        Some(link) => format!(
            "{WELCOME_TEXT}\n\n:memo: Share your answers using <{link}|this form>."
        ),
        None => WELCOME_TEXT.to_string(),
    }
}

/// The link section of a reply.
pub fn link_message(link: Option<&str>) -> String {
    match link {
        Some(link) => format!(":link: Here's the evaluation form for this channel: <{link}|Open the form>"),
        None => LINK_NOT_CONFIGURED.to_string(),
    }
}

/// The summary-only reply. `None` means the fetch failed.
pub fn summary_message(summary: Option<&str>) -> String {
    summary.unwrap_or(SUMMARY_UNAVAILABLE).to_string()
}

/// Summary section followed by the link section.
pub fn combined_message(summary: Option<&str>, link: Option<&str>) -> String {
    format!(
        "{}\n\n{}",
        summary.unwrap_or(NO_EVALUATIONS),
        link_message(link)
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
