//! Assurance platform collaborator
//!
//! Authentication, user enrichment lookup and client-detail retrieval.

pub mod client;
pub mod model;

use async_trait::async_trait;

pub use client::DnacClient;
pub use model::{
    AuthToken, ClientDetail, EnrichmentRecord, Identity, Sample, SampleError, UserDetails,
};

/// Operations the monitor needs from the assurance platform
#[async_trait]
pub trait AssurancePlatform: Send + Sync {
    /// Obtain a fresh token
    async fn authenticate(&self) -> Result<AuthToken, AssuranceError>;

    /// Look up enrichment records for a user or host.
    ///
    /// Records with empty user details are not returned.
    async fn lookup_user_enrichment(
        &self,
        identity: &Identity,
        token: &AuthToken,
    ) -> Result<Vec<EnrichmentRecord>, AssuranceError>;

    /// Client detail for a hardware address at a point in time (epoch millis)
    async fn get_client_detail(
        &self,
        mac_address: &str,
        timestamp_ms: i64,
        token: &AuthToken,
    ) -> Result<ClientDetail, AssuranceError>;
}

/// Deep link to the client 360 view
pub fn client_360_url(base_url: &str, mac_address: &str) -> String {
    format!(
        "{}/dna/assurance/client/details?macAddress={}",
        base_url.trim_end_matches('/'),
        mac_address
    )
}

#[derive(Debug, thiserror::Error)]
pub enum AssuranceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}
