//! Side-effecting actions.
//!
//! Actions never return errors: Slack must always get its 200, so failures
//! are logged here and go no further.

pub mod announce;
pub mod mention;

pub use announce::join_and_announce;
pub use mention::reply_to_mention;
