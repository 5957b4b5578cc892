//! Messaging platform collaborator
//!
//! Room lookup, message retrieval and message/card posting.

pub mod card;
pub mod client;
pub mod model;

use async_trait::async_trait;

pub use card::{Attachment, CardBuilder, Fact};
pub use client::WebexClient;
pub use model::{ChatMessage, MessagePayload, Room};

/// Maximum number of rooms fetched when resolving a room by title
pub const ROOM_LIST_MAX: usize = 1000;

#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// Rooms visible to the bot, at most [`ROOM_LIST_MAX`]
    async fn list_rooms(&self) -> Result<Vec<Room>, MessagingError>;

    async fn post_message(&self, payload: &MessagePayload) -> Result<(), MessagingError>;

    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, MessagingError>;
}

/// Resolve a room id by exact, case-sensitive title. The last match wins.
pub async fn find_room_id(
    platform: &dyn MessagingPlatform,
    title: &str,
) -> Result<String, MessagingError> {
    platform
        .list_rooms()
        .await?
        .into_iter()
        .filter(|room| room.title == title)
        .last()
        .map(|room| room.id)
        .ok_or_else(|| MessagingError::RoomNotFound(title.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRooms(Vec<Room>);

    #[async_trait]
    impl MessagingPlatform for FixedRooms {
        async fn list_rooms(&self) -> Result<Vec<Room>, MessagingError> {
            Ok(self.0.clone())
        }

        async fn post_message(&self, _payload: &MessagePayload) -> Result<(), MessagingError> {
            Ok(())
        }

        async fn get_message(&self, message_id: &str) -> Result<ChatMessage, MessagingError> {
            Err(MessagingError::Remote {
                status: 404,
                message: message_id.to_string(),
            })
        }
    }

    fn room(id: &str, title: &str) -> Room {
        Room {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_room_exact_match() {
        let rooms = FixedRooms(vec![
            room("r1", "wireless clients monitoring"),
            room("r2", "Wireless Clients Monitoring"),
        ]);

        let id = find_room_id(&rooms, "Wireless Clients Monitoring").await.unwrap();
        assert_eq!(id, "r2");
    }

    #[tokio::test]
    async fn test_find_room_last_match_wins() {
        let rooms = FixedRooms(vec![room("r1", "Ops"), room("r2", "Ops")]);
        assert_eq!(find_room_id(&rooms, "Ops").await.unwrap(), "r2");
    }

    #[tokio::test]
    async fn test_find_room_missing() {
        let rooms = FixedRooms(vec![room("r1", "Ops")]);
        let err = find_room_id(&rooms, "ops").await.unwrap_err();
        assert!(matches!(err, MessagingError::RoomNotFound(t) if t == "ops"));
    }
}
