//! In-memory platform fakes shared by unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::assurance::{
    AssuranceError, AssurancePlatform, AuthToken, ClientDetail, EnrichmentRecord, Identity,
};
use crate::messaging::{ChatMessage, MessagePayload, MessagingError, MessagingPlatform, Room};

/// Client-detail record with the fields the monitor reads
pub fn detail(health: i64, snr: f64, total_bytes: f64) -> ClientDetail {
    serde_json::from_value(json!({
        "detail": {
            "healthScore": [{"healthType": "OVERALL", "score": health}],
            "txBytes": total_bytes.to_string(),
            "rxBytes": "0",
            "snr": snr.to_string(),
            "dataRate": "144.0",
            "location": "Global/SJC/Floor 2",
            "clientConnection": "AP-SJC-2-07",
            "ssid": "corp-wifi"
        }
    }))
    .unwrap()
}

#[derive(Default)]
pub struct FakeAssurance {
    enrichment: Vec<EnrichmentRecord>,
    lookup_fails: bool,
    auth_failures: AtomicU32,
    details: Mutex<VecDeque<Result<ClientDetail, AssuranceError>>>,
    pub auth_calls: AtomicU32,
    pub detail_calls: AtomicU32,
}

impl FakeAssurance {
    pub fn with_enrichment(mut self, records: Vec<EnrichmentRecord>) -> Self {
        self.enrichment = records;
        self
    }

    pub fn with_failing_lookup(mut self) -> Self {
        self.lookup_fails = true;
        self
    }

    /// The next `n` authentication attempts fail
    pub fn with_auth_failures(self, n: u32) -> Self {
        self.auth_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Queue client-detail responses, served in order
    pub fn with_details(self, details: Vec<Result<ClientDetail, AssuranceError>>) -> Self {
        *self.details.lock().unwrap() = details.into();
        self
    }
}

#[async_trait]
impl AssurancePlatform for FakeAssurance {
    async fn authenticate(&self) -> Result<AuthToken, AssuranceError> {
        let n = self.auth_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.auth_failures.load(Ordering::SeqCst);
        if failing > 0 {
            self.auth_failures.store(failing - 1, Ordering::SeqCst);
            return Err(AssuranceError::Network("connection refused".to_string()));
        }
        Ok(AuthToken::new(format!("token-{n}")))
    }

    async fn lookup_user_enrichment(
        &self,
        _identity: &Identity,
        _token: &AuthToken,
    ) -> Result<Vec<EnrichmentRecord>, AssuranceError> {
        if self.lookup_fails {
            return Err(AssuranceError::Deserialization("unexpected body".to_string()));
        }
        Ok(self.enrichment.clone())
    }

    async fn get_client_detail(
        &self,
        _mac_address: &str,
        _timestamp_ms: i64,
        _token: &AuthToken,
    ) -> Result<ClientDetail, AssuranceError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AssuranceError::Network("no more samples".to_string())))
    }
}

#[derive(Default)]
pub struct FakeMessaging {
    rooms: Vec<Room>,
    messages: HashMap<String, ChatMessage>,
    post_failures: AtomicU32,
    pub posted: Mutex<Vec<MessagePayload>>,
}

impl FakeMessaging {
    pub fn with_room(mut self, id: &str, title: &str) -> Self {
        self.rooms.push(Room {
            id: id.to_string(),
            title: title.to_string(),
        });
        self
    }

    pub fn with_message(mut self, id: &str, text: &str, mentioned: &[&str]) -> Self {
        self.messages.insert(
            id.to_string(),
            ChatMessage {
                id: id.to_string(),
                text: Some(text.to_string()),
                mentioned_people: mentioned.iter().map(|p| p.to_string()).collect(),
            },
        );
        self
    }

    /// The next `n` posts fail
    pub fn with_post_failures(self, n: u32) -> Self {
        self.post_failures.store(n, Ordering::SeqCst);
        self
    }

    pub fn posted(&self) -> Vec<MessagePayload> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingPlatform for FakeMessaging {
    async fn list_rooms(&self) -> Result<Vec<Room>, MessagingError> {
        Ok(self.rooms.clone())
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<(), MessagingError> {
        let failing = self.post_failures.load(Ordering::SeqCst);
        if failing > 0 {
            self.post_failures.store(failing - 1, Ordering::SeqCst);
            return Err(MessagingError::Remote {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        self.posted.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, MessagingError> {
        self.messages
            .get(message_id)
            .cloned()
            .ok_or_else(|| MessagingError::Remote {
                status: 404,
                message: format!("message {message_id} not found"),
            })
    }
}
