//! Oppbot Core: shared building blocks for the Slack events webhook.
//!
//! This crate provides:
//! - **config**: typed configuration, JSON loading and env var overrides
//! - **events**: classification of raw Events API payloads into [`InboundEvent`]
//! - **summary**: evaluation records and the aggregate [`SummaryReport`]
//! - **messages**: welcome, link, summary and help reply composition

pub mod config;
pub mod events;
pub mod messages;
pub mod summary;
pub mod utils;

pub use config::Config;
pub use events::{classify, ClassifyError, InboundEvent};
pub use summary::{EvaluationRecord, SummaryError, SummaryReport};
