use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a displayed message, as found on its list row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Returns `None` for blank input so an unlabelled row is never sent to the server.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the toggle button belonging to this message.
    pub fn button_name(&self) -> String {
        format!("like-button-{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

/// Any JSON body is accepted. `liked` counts only when it is exactly `true`; a missing,
/// null or non-boolean field reads as not liked. Only a body that is not JSON fails.
impl<'de> Deserialize<'de> for LikeResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        Ok(Self { liked: body.get("liked") == Some(&Value::Bool(true)) })
    }
}

impl LikeResponse {
    pub fn button_state(&self) -> ButtonState {
        if self.liked { ButtonState::Liked } else { ButtonState::NotLiked }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Liked,
    NotLiked,
}

impl ButtonState {
    /// Full class string applied to the button; replaces whatever was there.
    pub fn css_class(self) -> &'static str {
        match self {
            ButtonState::Liked => "btn btn-sm btn-primary",
            ButtonState::NotLiked => "btn btn-sm btn-secondary",
        }
    }

    /// Individual class names, for toolkits that take a list instead of a string.
    pub fn css_classes(self) -> Vec<&'static str> {
        self.css_class().split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(MessageId::parse(""), None);
        assert_eq!(MessageId::parse("   "), None);
        assert_eq!(MessageId::parse(" 42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn button_name_follows_id() {
        let id = MessageId::parse("42").unwrap();
        assert_eq!(id.button_name(), "like-button-42");
    }

    #[test]
    fn response_maps_to_button_state() {
        let liked: LikeResponse = serde_json::from_str(r#"{"liked": true, "count": 3}"#).unwrap();
        assert_eq!(liked.button_state(), ButtonState::Liked);
        assert_eq!(liked.button_state().css_class(), "btn btn-sm btn-primary");

        let unliked: LikeResponse = serde_json::from_str(r#"{"liked": false}"#).unwrap();
        assert_eq!(unliked.button_state().css_class(), "btn btn-sm btn-secondary");
    }

    #[test]
    fn anything_but_true_reads_as_not_liked() {
        for body in ["{}", r#"{"liked": null}"#, r#"{"liked": "true"}"#, r#"{"liked": 1}"#, "[true]", "null"] {
            let resp: LikeResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.button_state(), ButtonState::NotLiked, "body {}", body);
        }
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(serde_json::from_str::<LikeResponse>("<html>").is_err());
        assert!(serde_json::from_str::<LikeResponse>("").is_err());
    }

    #[test]
    fn css_classes_split_the_class_string() {
        assert_eq!(ButtonState::Liked.css_classes(), vec!["btn", "btn-sm", "btn-primary"]);
    }
}
