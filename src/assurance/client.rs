use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::model::{AuthToken, ClientDetail, EnrichmentRecord, Identity};
use super::{AssuranceError, AssurancePlatform};
use crate::config::DnacConfig;

/// REST client for the assurance platform
#[derive(Debug, Clone)]
pub struct DnacClient {
    http_client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token")]
    token: String,
}

impl DnacClient {
    pub fn new(config: &DnacConfig, timeout: Duration) -> Result<Self, AssuranceError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| AssuranceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AssuranceError> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssuranceError::Remote {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AssuranceError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl AssurancePlatform for DnacClient {
    async fn authenticate(&self) -> Result<AuthToken, AssuranceError> {
        let url = format!("{}/dna/system/api/v1/auth/token", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AssuranceError::Network(e.to_string()))?;

        let body: TokenResponse = Self::read_json(response).await?;
        Ok(AuthToken::new(body.token))
    }

    async fn lookup_user_enrichment(
        &self,
        identity: &Identity,
        token: &AuthToken,
    ) -> Result<Vec<EnrichmentRecord>, AssuranceError> {
        let url = format!("{}/dna/intent/api/v1/user-enrichment-details", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("x-auth-token", token.as_str())
            .header("entity_type", identity.entity_type())
            .header("entity_value", identity.entity_value())
            .send()
            .await
            .map_err(|e| AssuranceError::Network(e.to_string()))?;

        let records: Vec<EnrichmentRecord> = Self::read_json(response).await?;
        Ok(records
            .into_iter()
            .filter(|r| !r.user_details.is_empty())
            .collect())
    }

    async fn get_client_detail(
        &self,
        mac_address: &str,
        timestamp_ms: i64,
        token: &AuthToken,
    ) -> Result<ClientDetail, AssuranceError> {
        let url = format!("{}/dna/intent/api/v1/client-detail", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("timestamp", timestamp_ms.to_string()),
                ("macAddress", mac_address.to_string()),
            ])
            .header("x-auth-token", token.as_str())
            .send()
            .await
            .map_err(|e| AssuranceError::Network(e.to_string()))?;

        Self::read_json(response).await
    }
}
