//! Resolve the monitored client's hardware address

use crate::assurance::{AssurancePlatform, AuthToken, Identity};
use crate::config::ClientIdentity;

/// The client the monitor tracks for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClient {
    pub username: String,
    pub mac_address: String,
    /// True when the address came from the platform, false for the configured fallback
    pub discovered: bool,
}

/// Look the username up on the platform; fall back to the configured address.
///
/// When several wireless records exist, the last one wins. A failed lookup is
/// logged and handled as "no record".
pub async fn resolve_client(
    platform: &dyn AssurancePlatform,
    token: &AuthToken,
    identity: &ClientIdentity,
) -> Result<ResolvedClient, ResolveError> {
    let mut discovered = None;

    if !identity.username.is_empty() {
        let lookup = Identity::NetworkUserId(identity.username.clone());
        match platform.lookup_user_enrichment(&lookup, token).await {
            Ok(records) => {
                discovered = records
                    .iter()
                    .filter(|r| r.user_details.is_wireless())
                    .filter_map(|r| r.user_details.id.clone())
                    .filter(|id| !id.is_empty())
                    .last();
            }
            Err(e) => {
                tracing::warn!(
                    username = %identity.username,
                    error = %e,
                    "User enrichment lookup failed"
                );
            }
        }
    }

    match discovered {
        Some(mac_address) => {
            tracing::info!(username = %identity.username, %mac_address, "Wireless client MAC address found");
            Ok(ResolvedClient {
                username: identity.username.clone(),
                mac_address,
                discovered: true,
            })
        }
        None if !identity.fallback_mac.is_empty() => {
            tracing::info!(
                username = %identity.username,
                mac_address = %identity.fallback_mac,
                "Wireless client MAC address not found, using the pre-configured address"
            );
            Ok(ResolvedClient {
                username: identity.username.clone(),
                mac_address: identity.fallback_mac.clone(),
                discovered: false,
            })
        }
        None => Err(ResolveError::NoClientIdentifier {
            username: identity.username.clone(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("no MAC address found for user {username:?} and no fallback address configured")]
    NoClientIdentifier { username: String },
}
