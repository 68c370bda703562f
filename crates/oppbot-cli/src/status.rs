//! `oppbot status`: show configuration status. Secrets are shown as set/unset only.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use oppbot_core::config::{get_config_path, load_config, load_dotenv};

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    load_dotenv();
    let config = load_config(config_path);
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Oppbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Slack
    println!();
    println!("  {}", "Slack:".bold());
    println!("    {:<20} {}", "Bot token", secret_status(config.slack.is_configured()));
    println!("    {:<20} {}", "API base", config.slack.api_base);
    println!("    {:<20} {}", "Channel prefix", config.slack.channel_prefix);
    println!(
        "    {:<20} {}",
        "Form URL",
        optional(config.slack.form_url.as_deref())
    );

    // Summary webhook
    println!();
    println!("  {}", "Summary webhook:".bold());
    println!(
        "    {:<20} {}",
        "URL",
        optional(config.summary.webhook_url.as_deref())
    );
    println!(
        "    {:<20} {}",
        "Username",
        secret_status(!config.summary.username.is_empty())
    );
    println!(
        "    {:<20} {}",
        "Password",
        secret_status(!config.summary.password.is_empty())
    );
    println!(
        "    {:<20} {}",
        "Invalid scores",
        format!("{:?}", config.summary.invalid_scores).to_lowercase()
    );

    // Server
    println!();
    println!("  {}", "Server:".bold());
    println!(
        "    {:<20} {}:{}",
        "Listen", config.server.host, config.server.port
    );
    println!("    {:<20} {}", "Events path", config.server.events_path);
    println!(
        "    {:<20} {}",
        "Dispatch mode",
        format!("{:?}", config.server.dispatch_mode).to_lowercase()
    );
    println!();

    Ok(())
}

fn secret_status(set: bool) -> String {
    if set {
        format!("{} (set)", "✓".green())
    } else {
        format!("{}", "· not set".dimmed())
    }
}

fn optional(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => format!("{}", "· not configured".dimmed()),
    }
}
