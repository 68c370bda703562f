//! Config loader: reads `~/.oppbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.oppbot/config.json` (or an explicit path)
//! 3. Legacy deployment variables (`SLACK_BOT_TOKEN`, `PORT`, ...)
//! 4. Environment variables `OPPBOT_<SECTION>__<FIELD>`

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load a `.env` file from the working directory unless running in production.
///
/// Production is signalled by `OPPBOT_ENV=production` or `NODE_ENV=production`.
/// Variables already present in the environment are never overwritten.
pub fn load_dotenv() {
    let production = ["OPPBOT_ENV", "NODE_ENV"]
        .iter()
        .any(|key| std::env::var(key).is_ok_and(|v| v == "production"));
    if production {
        debug!("production environment, skipping .env");
        return;
    }

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value. Legacy names are applied
/// first so the `OPPBOT_` form wins when both are set.
///
/// Supported overrides:
/// - `OPPBOT_SLACK__BOT_TOKEN` / `SLACK_BOT_TOKEN` → `slack.bot_token`
/// - `OPPBOT_SLACK__API_BASE` → `slack.api_base`
/// - `OPPBOT_SLACK__CHANNEL_PREFIX` → `slack.channel_prefix`
/// - `OPPBOT_SLACK__FORM_URL` / `FORM_URL` → `slack.form_url`
/// - `OPPBOT_SUMMARY__WEBHOOK_URL` / `SUMMARY_WEBHOOK_URL` → `summary.webhook_url`
/// - `OPPBOT_SUMMARY__USERNAME` / `WEBHOOK_USER` → `summary.username`
/// - `OPPBOT_SUMMARY__PASSWORD` / `WEBHOOK_PASSWORD` → `summary.password`
/// - `OPPBOT_SUMMARY__INVALID_SCORES` → `summary.invalid_scores`
/// - `OPPBOT_SUMMARY__TIMEOUT_SECS` → `summary.timeout_secs`
/// - `OPPBOT_SERVER__HOST` → `server.host`
/// - `OPPBOT_SERVER__PORT` / `PORT` → `server.port`
/// - `OPPBOT_SERVER__EVENTS_PATH` → `server.events_path`
/// - `OPPBOT_SERVER__DISPATCH_MODE` → `server.dispatch_mode`
fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |native: &str, legacy: Option<&str>| -> Option<String> {
        lookup(native).or_else(|| legacy.and_then(|name| lookup(name)))
    };

    // Slack
    if let Some(val) = var("OPPBOT_SLACK__BOT_TOKEN", Some("SLACK_BOT_TOKEN")) {
        config.slack.bot_token = val;
    }
    if let Some(val) = var("OPPBOT_SLACK__API_BASE", None) {
        config.slack.api_base = val;
    }
    if let Some(val) = var("OPPBOT_SLACK__CHANNEL_PREFIX", None) {
        config.slack.channel_prefix = val;
    }
    if let Some(val) = var("OPPBOT_SLACK__FORM_URL", Some("FORM_URL")) {
        config.slack.form_url = Some(val);
    }

    // Summary webhook
    if let Some(val) = var("OPPBOT_SUMMARY__WEBHOOK_URL", Some("SUMMARY_WEBHOOK_URL")) {
        config.summary.webhook_url = Some(val);
    }
    if let Some(val) = var("OPPBOT_SUMMARY__USERNAME", Some("WEBHOOK_USER")) {
        config.summary.username = val;
    }
    if let Some(val) = var("OPPBOT_SUMMARY__PASSWORD", Some("WEBHOOK_PASSWORD")) {
        config.summary.password = val;
    }
    if let Some(val) = var("OPPBOT_SUMMARY__INVALID_SCORES", None) {
        match val.parse() {
            Ok(policy) => config.summary.invalid_scores = policy,
            Err(e) => warn!("Ignoring OPPBOT_SUMMARY__INVALID_SCORES: {}", e),
        }
    }
    if let Some(val) = var("OPPBOT_SUMMARY__TIMEOUT_SECS", None) {
        if let Ok(n) = val.parse::<u64>() {
            config.summary.timeout_secs = n;
        }
    }

    // Server
    if let Some(val) = var("OPPBOT_SERVER__HOST", None) {
        config.server.host = val;
    }
    if let Some(val) = var("OPPBOT_SERVER__PORT", Some("PORT")) {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }
    if let Some(val) = var("OPPBOT_SERVER__EVENTS_PATH", None) {
        config.server.events_path = val;
    }
    if let Some(val) = var("OPPBOT_SERVER__DISPATCH_MODE", None) {
        match val.parse() {
            Ok(mode) => config.server.dispatch_mode = mode,
            Err(e) => warn!("Ignoring OPPBOT_SERVER__DISPATCH_MODE: {}", e),
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DispatchMode, InvalidScorePolicy};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.slack.channel_prefix, "opp");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "slack": {
                "botToken": "xoxb-file",
                "formUrl": "https://forms.example.com/eval"
            },
            "server": {
                "port": 8080,
                "dispatchMode": "background"
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.slack.bot_token, "xoxb-file");
        assert_eq!(
            config.slack.form_url.as_deref(),
            Some("https://forms.example.com/eval")
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.dispatch_mode, DispatchMode::Background);
        // Defaults preserved
        assert_eq!(config.server.events_path, "/slack/events");
        assert_eq!(config.slack.channel_prefix, "opp");
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert!(config.summary.webhook_url.is_none());
        assert_eq!(config.summary.timeout_secs, 30);
    }

    #[test]
    fn test_env_override_native_names() {
        let env = env_of(&[
            ("OPPBOT_SLACK__BOT_TOKEN", "xoxb-env"),
            ("OPPBOT_SLACK__CHANNEL_PREFIX", "deal"),
            ("OPPBOT_SUMMARY__WEBHOOK_URL", "https://hooks.example.com/s"),
            ("OPPBOT_SUMMARY__INVALID_SCORES", "skip"),
            ("OPPBOT_SERVER__PORT", "9999"),
            ("OPPBOT_SERVER__DISPATCH_MODE", "background"),
        ]);
        let config = apply_env_overrides(Config::default(), env);
        assert_eq!(config.slack.bot_token, "xoxb-env");
        assert_eq!(config.slack.channel_prefix, "deal");
        assert_eq!(
            config.summary.webhook_url.as_deref(),
            Some("https://hooks.example.com/s")
        );
        assert_eq!(config.summary.invalid_scores, InvalidScorePolicy::Skip);
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.dispatch_mode, DispatchMode::Background);
    }

    #[test]
    fn test_env_override_legacy_names() {
        let env = env_of(&[
            ("SLACK_BOT_TOKEN", "xoxb-legacy"),
            ("SUMMARY_WEBHOOK_URL", "https://hooks.example.com/legacy"),
            ("WEBHOOK_USER", "n8n"),
            ("WEBHOOK_PASSWORD", "hunter2"),
            ("PORT", "4000"),
        ]);
        let config = apply_env_overrides(Config::default(), env);
        assert_eq!(config.slack.bot_token, "xoxb-legacy");
        assert_eq!(config.summary.username, "n8n");
        assert_eq!(config.summary.password, "hunter2");
        assert_eq!(config.server.port, 4000);
        assert!(config.summary.is_configured());
    }

    #[test]
    fn test_env_native_wins_over_legacy() {
        let env = env_of(&[
            ("SLACK_BOT_TOKEN", "xoxb-legacy"),
            ("OPPBOT_SLACK__BOT_TOKEN", "xoxb-native"),
        ]);
        let config = apply_env_overrides(Config::default(), env);
        assert_eq!(config.slack.bot_token, "xoxb-native");
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let env = env_of(&[
            ("OPPBOT_SERVER__PORT", "not-a-port"),
            ("OPPBOT_SERVER__DISPATCH_MODE", "sometimes"),
            ("OPPBOT_SUMMARY__TIMEOUT_SECS", "-1"),
        ]);
        let config = apply_env_overrides(Config::default(), env);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.dispatch_mode, DispatchMode::Await);
        assert_eq!(config.summary.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let file = write_temp_json(r#"{ "server": { "eventsPath": "/hooks/slack" } }"#);
        let config = load_config_from_path(file.path());
        let config = apply_env_overrides(config, env_of(&[("OPPBOT_SERVER__HOST", "127.0.0.1")]));
        assert_eq!(config.server.events_path, "/hooks/slack");
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
