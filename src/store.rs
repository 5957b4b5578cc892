//! Per-user telemetry files and the chat event log

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

/// Shared append-only log of inbound chat events
pub const TEAMS_LOG_FILE: &str = "wireless_teams_detailed.log";

/// Files under the wireless folder.
///
/// No locking: concurrent writes to one user's file race and the last write wins.
#[derive(Debug, Clone)]
pub struct ClientStore {
    folder: PathBuf,
}

impl ClientStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of a user's file, `<folder>/<username>.json`
    pub fn client_path(&self, username: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_name(username) {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }
        Ok(self.folder.join(format!("{username}.json")))
    }

    /// Overwrite the user's file with the payload
    pub async fn save_client(&self, username: &str, payload: &Value) -> Result<PathBuf, StoreError> {
        let path = self.client_path(username)?;
        let line = format!("{}\n", serde_json::to_string(payload)?);
        tokio::fs::write(&path, line).await?;
        Ok(path)
    }

    pub async fn load_client(&self, username: &str) -> Result<PersistedClient, StoreError> {
        let path = self.client_path(username)?;
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(username.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Append one compact JSON line to the event log
    pub async fn append_event(&self, event: &Value) -> Result<(), StoreError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.folder.join(TEAMS_LOG_FILE))
            .await?;
        let line = format!("{}\n", serde_json::to_string(event)?);
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

/// Telemetry document as pushed for one user
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedClient {
    pub username: String,
    pub details: PersistedDetails,
}

/// Pushed fields are kept as raw JSON; absent or null labels render as "unknown"
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedDetails {
    #[serde(default)]
    pub mac_address: Value,
    #[serde(default)]
    pub location: Value,
    #[serde(default)]
    pub access_point: Value,
    #[serde(default)]
    pub ssid: Value,
    #[serde(default)]
    pub health_score: Vec<HealthScoreEntry>,
    #[serde(default)]
    pub snr: Value,
    #[serde(default)]
    pub timestamp: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthScoreEntry {
    #[serde(default)]
    pub score: Value,
}

impl PersistedDetails {
    /// First reported health score
    pub fn health(&self) -> Option<&Value> {
        self.health_score.first().map(|h| &h.score)
    }
}

/// Render a JSON scalar for display, strings without quotes
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "unknown".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("no data for user {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
