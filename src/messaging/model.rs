use serde::{Deserialize, Serialize};

use super::card::Attachment;

/// A messaging space
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomList {
    #[serde(default)]
    pub items: Vec<Room>,
}

/// A posted chat message as returned by the platform
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mentioned_people: Vec<String>,
}

impl ChatMessage {
    pub fn mentions(&self, person_id: &str) -> bool {
        self.mentioned_people.iter().any(|p| p == person_id)
    }
}

/// Outgoing message body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl MessagePayload {
    pub fn markdown(room_id: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            markdown: Some(markdown.into()),
            attachments: Vec::new(),
        }
    }

    /// Card message; `fallback` is shown by clients that cannot render cards
    pub fn card(room_id: impl Into<String>, fallback: impl Into<String>, card: Attachment) -> Self {
        Self {
            room_id: room_id.into(),
            markdown: Some(fallback.into()),
            attachments: vec![card],
        }
    }
}
