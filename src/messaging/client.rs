use std::time::Duration;

use async_trait::async_trait;

use super::model::{ChatMessage, MessagePayload, Room, RoomList};
use super::{MessagingError, MessagingPlatform, ROOM_LIST_MAX};
use crate::config::WebexConfig;

/// REST client for the messaging platform, authenticated as a bot
#[derive(Debug, Clone)]
pub struct WebexClient {
    http_client: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl WebexClient {
    pub fn new(config: &WebexConfig, timeout: Duration) -> Result<Self, MessagingError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MessagingError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, MessagingError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(MessagingError::Remote { status, message })
    }
}

#[async_trait]
impl MessagingPlatform for WebexClient {
    async fn list_rooms(&self) -> Result<Vec<Room>, MessagingError> {
        let url = format!("{}/v1/rooms", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("max", ROOM_LIST_MAX.to_string())])
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| MessagingError::Network(e.to_string()))?;

        let rooms: RoomList = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MessagingError::Deserialization(e.to_string()))?;
        Ok(rooms.items)
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<(), MessagingError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.bot_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| MessagingError::Network(e.to_string()))?;

        Self::check_status(response).await?;
        tracing::debug!(room_id = %payload.room_id, "Message posted");
        Ok(())
    }

    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, MessagingError> {
        let url = format!("{}/v1/messages/{}", self.base_url, message_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| MessagingError::Network(e.to_string()))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MessagingError::Deserialization(e.to_string()))
    }
}
