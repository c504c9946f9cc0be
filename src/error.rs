use crate::api::models::MessageId;
use reqwest::StatusCode;
use thiserror::Error;

/// Text shown to the user whenever a like cannot be completed.
pub const LIKE_FAILED_MESSAGE: &str = "Could not like post.";

#[derive(Debug, Error)]
pub enum LikeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered HTTP {0}")]
    Status(StatusCode),

    #[error("unreadable like response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("clicked element has no message row with an id")]
    MissingIdentifier,

    #[error("no button named like-button-{0}")]
    MissingButton(MessageId),

    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),
}

impl LikeError {
    /// Every failure collapses to the same alert text; the cause only goes to the log.
    pub fn user_message(&self) -> &'static str {
        LIKE_FAILED_MESSAGE
    }
}

pub type Result<T, E = LikeError> = std::result::Result<T, E>;
