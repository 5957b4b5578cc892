use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::command::{parse_command, BotCommand};
use crate::assurance::client_360_url;
use crate::config::BotConfig;
use crate::messaging::{find_room_id, CardBuilder, MessagePayload, MessagingError, MessagingPlatform};
use crate::store::{display_value, ClientStore, PersistedClient};

const STATUS_TITLE: &str = "Wireless Client Status";

/// Inbound chat webhook event
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEvent {
    pub data: ChatEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatEventData {
    /// Id of the message that triggered the event
    pub id: String,
}

/// What the bot did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReply {
    /// The message did not mention the bot
    Ignored,
    Menu,
    Status { username: String },
    NoData { username: String },
}

/// Answers status queries from the persisted per-user files
pub struct BotResponder {
    messaging: Arc<dyn MessagingPlatform>,
    store: ClientStore,
    config: BotConfig,
    dnac_url: String,
}

impl BotResponder {
    pub fn new(
        messaging: Arc<dyn MessagingPlatform>,
        store: ClientStore,
        config: BotConfig,
        dnac_url: impl Into<String>,
    ) -> Self {
        Self {
            messaging,
            store,
            config,
            dnac_url: dnac_url.into(),
        }
    }

    /// Handle a raw webhook body
    pub async fn handle_event(&self, event: &Value) -> Result<BotReply, BotError> {
        let event = ChatEvent::deserialize(event)?;
        let message = self.messaging.get_message(&event.data.id).await?;

        if !message.mentions(&self.config.bot_id) {
            tracing::debug!(message_id = %message.id, "Message does not mention the bot");
            return Ok(BotReply::Ignored);
        }

        let text = message.text.unwrap_or_default();
        tracing::info!(message_id = %message.id, text = %text, "Bot message received");

        let reply = match parse_command(&text, &self.config.bot_name) {
            BotCommand::Help => {
                self.post_markdown(self.help_menu()).await?;
                BotReply::Menu
            }
            BotCommand::Status { username } => match self.store.load_client(&username).await {
                Ok(client) => {
                    self.post_status_card(&username, &client).await?;
                    BotReply::Status { username }
                }
                Err(e) => {
                    tracing::info!(username = %username, error = %e, "No data for user");
                    self.post_markdown(format!(
                        "<p>No data was collected for this user: <br/><strong>{username}</strong>"
                    ))
                    .await?;
                    BotReply::NoData { username }
                }
            },
            BotCommand::Unknown => {
                self.post_markdown(
                    "<p>I can help you with: <br/><strong>client status</strong> - Enter wireless username + \" status\"".to_string(),
                )
                .await?;
                BotReply::Menu
            }
        };

        Ok(reply)
    }

    fn help_menu(&self) -> String {
        format!(
            "<p>I can help you with: <br/><strong>client status</strong> - Enter @{} + wireless username + status",
            self.config.bot_name
        )
    }

    async fn post_markdown(&self, markdown: String) -> Result<(), BotError> {
        let room_id = find_room_id(self.messaging.as_ref(), &self.config.room).await?;
        self.messaging
            .post_message(&MessagePayload::markdown(room_id, markdown))
            .await?;
        Ok(())
    }

    async fn post_status_card(&self, username: &str, client: &PersistedClient) -> Result<(), BotError> {
        let room_id = find_room_id(self.messaging.as_ref(), &self.config.room).await?;
        let payload = status_message(&room_id, username, client, &self.dnac_url);
        self.messaging.post_message(&payload).await?;
        Ok(())
    }
}

/// Card with the last collected status of a user
pub fn status_message(
    room_id: &str,
    username: &str,
    client: &PersistedClient,
    dnac_url: &str,
) -> MessagePayload {
    let details = &client.details;
    let health = details
        .health()
        .map(display_value)
        .unwrap_or_else(|| "unknown".to_string());
    let mac_address = display_value(&details.mac_address);

    let card = CardBuilder::new(STATUS_TITLE)
        .text(format!(
            "Last collected status for this client, {}:",
            display_value(&details.timestamp)
        ))
        .fact("Username: ", username)
        .fact("MAC Address:", &mac_address)
        .fact("Location:", display_value(&details.location))
        .fact("Access Point:", display_value(&details.access_point))
        .fact("SSID:", display_value(&details.ssid))
        .fact("Health Score:", health)
        .fact("SNR:", display_value(&details.snr))
        .open_url(
            "Cisco DNA Center Client 360",
            client_360_url(dnac_url, &mac_address),
        )
        .build();

    MessagePayload::card(room_id, STATUS_TITLE, card)
}

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("malformed chat event: {0}")]
    Event(#[from] serde_json::Error),

    #[error("Messaging platform error: {0}")]
    Messaging(#[from] MessagingError),
}
