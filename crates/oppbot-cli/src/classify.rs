//! `oppbot classify`: offline check of what a saved payload would trigger.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use oppbot_core::config::{load_config, load_dotenv};
use oppbot_core::events::{classify, InboundEvent};
use oppbot_core::messages::MentionIntent;

pub fn run(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    load_dotenv();
    let config = load_config(config_path);

    println!("{}", describe(&raw, &config.slack.channel_prefix)?);
    Ok(())
}

/// One-line description of how a payload would be handled.
fn describe(raw: &str, prefix: &str) -> Result<String> {
    let payload: serde_json::Value =
        serde_json::from_str(raw).context("payload is not valid JSON")?;
    let event = classify(&payload)?;
    let policy = oppbot_core::config::ChannelPrefixPolicy::new(prefix);

    let line = match &event {
        InboundEvent::Handshake { challenge } => {
            format!("{} → respond with challenge {challenge:?}", "handshake".cyan())
        }
        InboundEvent::ChannelCreated {
            channel_id,
            channel_name,
        } => {
            let action = if policy.matches(channel_name) {
                "join and announce".green().to_string()
            } else {
                format!("ignore (no \"{}\" prefix)", policy.prefix())
                    .dimmed()
                    .to_string()
            };
            format!(
                "{} #{channel_name} ({channel_id}) → {action}",
                "channel_created".cyan()
            )
        }
        InboundEvent::AppMention {
            channel_id, text, ..
        } => {
            let intent = MentionIntent::from_text(text);
            format!(
                "{} in {channel_id} → {intent:?} reply",
                "app_mention".cyan()
            )
        }
        InboundEvent::Unhandled { event_type } => match event_type {
            Some(t) => format!("{} ({t}) → acknowledge", "unhandled".dimmed()),
            None => format!("{} → no action", "unhandled".dimmed()),
        },
    };
    Ok(line)
}
