//! Oppbot Dispatch: from a classified event to Slack side effects.
//!
//! This crate contains:
//! - **context**: `AppContext`, the gateway + fetcher + settings every action uses
//! - **actions**: join-and-announce and mention-reply
//! - **dispatcher**: decides which action runs and what Slack gets back
//! - **server**: the axum router Slack delivers events to

pub mod actions;
pub mod context;
pub mod dispatcher;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use context::AppContext;
pub use dispatcher::{Ack, ActionKind, DispatchOutcome, Dispatcher};
pub use server::router;
