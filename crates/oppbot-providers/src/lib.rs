//! External data providers for Oppbot.
//!
//! # Architecture
//!
//! - [`summary::SummaryFetcher`]: trait the mention handler depends on
//! - [`summary::WebhookSummaryFetcher`]: Basic-auth HTTP client for the
//!   evaluation summary webhook

pub mod summary;

pub use summary::{SummaryFetcher, WebhookSummaryFetcher};
