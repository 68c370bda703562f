//! Action dispatcher: maps a classified event to an action and an ack.
//!
//! Two independent guards keyed on the event kind:
//! - `channel_created` with a matching name → join-and-announce
//! - `app_mention` → mention reply
//!
//! In [`DispatchMode::Await`] the action completes before the ack is
//! returned; in [`DispatchMode::Background`] it is spawned and the ack is
//! returned immediately.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use oppbot_core::config::DispatchMode;
use oppbot_core::events::InboundEvent;

use crate::actions;
use crate::context::AppContext;

/// What Slack gets back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ack {
    /// Handshake: the challenge, verbatim, as a plain-text body.
    Challenge(String),
    /// "Event received"
    Received,
    /// "No action taken"
    NoAction,
}

impl Ack {
    /// Plain-text response body.
    pub fn body(&self) -> &str {
        match self {
            Ack::Challenge(challenge) => challenge,
            Ack::Received => "Event received",
            Ack::NoAction => "No action taken",
        }
    }
}

/// Which action was started for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Announce,
    MentionReply,
}

/// Result of dispatching one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub ack: Ack,
    pub action: Option<ActionKind>,
}

impl DispatchOutcome {
    fn ack(ack: Ack) -> Self {
        Self { ack, action: None }
    }
}

/// Routes classified events to actions.
#[derive(Clone)]
pub struct Dispatcher {
    ctx: Arc<AppContext>,
}

impl Dispatcher {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Handle one event. Never fails: action errors are logged by the actions.
    pub async fn dispatch(&self, event: InboundEvent) -> DispatchOutcome {
        debug!(kind = event.kind(), "dispatching event");
        let callback = event.is_callback();

        match event {
            InboundEvent::Handshake { challenge } => {
                info!("answering url_verification handshake");
                DispatchOutcome::ack(Ack::Challenge(challenge))
            }
            InboundEvent::ChannelCreated {
                channel_id,
                channel_name,
            } => {
                if !self.ctx.prefix.matches(&channel_name) {
                    debug!(
                        channel_name = %channel_name,
                        prefix = %self.ctx.prefix.prefix(),
                        "channel name does not match prefix, ignoring"
                    );
                    return DispatchOutcome::ack(Ack::Received);
                }

                info!(channel_id = %channel_id, channel_name = %channel_name, "opportunity channel created");
                let ctx = self.ctx.clone();
                self.run(async move {
                    actions::join_and_announce(&ctx, &channel_id, &channel_name).await;
                })
                .await;

                DispatchOutcome {
                    ack: Ack::Received,
                    action: Some(ActionKind::Announce),
                }
            }
            InboundEvent::AppMention {
                channel_id,
                user_id,
                text,
            } => {
                let ctx = self.ctx.clone();
                self.run(async move {
                    actions::reply_to_mention(&ctx, &channel_id, &user_id, &text).await;
                })
                .await;

                DispatchOutcome {
                    ack: Ack::Received,
                    action: Some(ActionKind::MentionReply),
                }
            }
            InboundEvent::Unhandled { event_type } => {
                debug!(event_type = ?event_type, "no action for event");
                if callback {
                    DispatchOutcome::ack(Ack::Received)
                } else {
                    DispatchOutcome::ack(Ack::NoAction)
                }
            }
        }
    }

    /// Await the action or spawn it, per the dispatch mode.
    async fn run<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self.ctx.dispatch_mode {
            DispatchMode::Await => action.await,
            DispatchMode::Background => {
                tokio::spawn(action);
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
