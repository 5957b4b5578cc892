//! Alert card formatting and dispatch

use std::sync::Arc;

use super::checker::ClientAlert;
use crate::assurance::client_360_url;
use crate::messaging::{find_room_id, CardBuilder, MessagePayload, MessagingError, MessagingPlatform};
use crate::retry::{with_retry, RetryConfig};

const NOTIFICATION_TITLE: &str = "Wireless Client Notification";

/// Posts the alert card to the destination space
pub struct Notifier {
    messaging: Arc<dyn MessagingPlatform>,
    space: String,
    dnac_url: String,
    retry: RetryConfig,
}

impl Notifier {
    pub fn new(
        messaging: Arc<dyn MessagingPlatform>,
        space: impl Into<String>,
        dnac_url: impl Into<String>,
    ) -> Self {
        Self {
            messaging,
            space: space.into(),
            dnac_url: dnac_url.into(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve the space and post the card, retrying once on failure
    pub async fn notify(&self, alert: &ClientAlert) -> Result<(), NotifierError> {
        let room_id = with_retry(&self.retry, "Room lookup", || {
            find_room_id(self.messaging.as_ref(), &self.space)
        })
        .await?;

        let payload = self.build_message(&room_id, alert);
        with_retry(&self.retry, "Notification post", || {
            self.messaging.post_message(&payload)
        })
        .await?;

        tracing::info!(
            room_id = %room_id,
            username = %alert.client.username,
            "Notification message posted"
        );
        Ok(())
    }

    /// Card carrying the client identity and the triggering sample
    pub fn build_message(&self, room_id: &str, alert: &ClientAlert) -> MessagePayload {
        let sample = &alert.sample;
        let mac_address = &alert.client.mac_address;

        let card = CardBuilder::new(NOTIFICATION_TITLE)
            .text("Cisco DNA Center identified low wireless performance for this client:")
            .fact("Username: ", &alert.client.username)
            .fact("MAC Address:", mac_address)
            .fact("Location:", &sample.location)
            .fact("Access Point:", &sample.access_point)
            .fact("SSID:", &sample.ssid)
            .fact("Health Score:", sample.health_score)
            .fact("Total data:", sample.total_bytes())
            .fact("SNR:", sample.snr)
            .open_url(
                "Cisco DNA Center Client 360",
                client_360_url(&self.dnac_url, mac_address),
            )
            .build();

        MessagePayload::card(room_id, NOTIFICATION_TITLE, card)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Notification delivery failed: {0}")]
    Delivery(#[from] MessagingError),
}
