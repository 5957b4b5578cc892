//! One monitoring session: resolve, poll until alerting, notify

use std::sync::Arc;

use super::checker::{ClientAlert, ClientMonitor};
use super::notifier::Notifier;
use super::resolver::{resolve_client, ResolveError};
use crate::assurance::{AssuranceError, AssurancePlatform, DnacClient};
use crate::config::MonitorSettings;
use crate::messaging::{MessagingError, MessagingPlatform, WebexClient};
use crate::retry::{with_retry, RetryConfig};

/// Build the platform clients and run one monitoring session to completion
pub async fn run_monitor(settings: MonitorSettings) -> Result<(), MonitorError> {
    let platform = Arc::new(DnacClient::new(&settings.dnac, settings.http_timeout)?);
    let messaging = Arc::new(WebexClient::new(&settings.webex, settings.http_timeout)?);

    monitor_client(platform, messaging, &settings, RetryConfig::default()).await?;
    Ok(())
}

/// Resolve the client, poll until the alert fires, then notify.
///
/// Delivery failures are logged; the alert is still returned.
pub async fn monitor_client(
    platform: Arc<dyn AssurancePlatform>,
    messaging: Arc<dyn MessagingPlatform>,
    settings: &MonitorSettings,
    retry: RetryConfig,
) -> Result<ClientAlert, MonitorError> {
    tracing::info!(username = %settings.client.username, "Wireless client user to be monitored");

    let token = with_retry(&retry, "Authentication", || platform.authenticate()).await?;
    let client = resolve_client(platform.as_ref(), &token, &settings.client).await?;

    let mut monitor = ClientMonitor::new(
        platform,
        client,
        settings.thresholds.clone(),
        settings.poll_interval(),
    )
    .with_auth_retry(retry.clone());
    let alert = monitor.run().await;

    tracing::warn!(
        username = %alert.client.username,
        mac_address = %alert.client.mac_address,
        consecutive = alert.consecutive,
        "Low wireless performance detected"
    );

    let notifier = Notifier::new(messaging, &settings.webex_space, &settings.dnac.base_url)
        .with_retry(retry);
    if let Err(e) = notifier.notify(&alert).await {
        tracing::error!(
            space = %settings.webex_space,
            error = %e,
            "Failed to send notification"
        );
    }

    Ok(alert)
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Assurance platform error: {0}")]
    Assurance(#[from] AssuranceError),

    #[error("Messaging platform error: {0}")]
    Messaging(#[from] MessagingError),
}
