//! Click-to-like: resolve the clicked message, ask the server, restyle its button.

pub mod handler;
pub mod sequencer;
pub mod subscription;

pub use handler::{LikeToggle, LikeView, Outcome};
pub use subscription::{ClickSource, ClickTracker, Subscription};
