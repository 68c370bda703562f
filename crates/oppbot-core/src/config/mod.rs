//! Configuration system: schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use oppbot_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Listening on port {}", cfg.server.port);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, load_dotenv};
pub use schema::{
    ChannelPrefixPolicy, Config, DispatchMode, InvalidScorePolicy, ServerConfig, SlackConfig,
    SummaryConfig,
};
