//! Poll-evaluate-count loop for the monitored client

use std::sync::Arc;
use std::time::Duration;

use super::config::{AlertState, Breaches, MonitorPhase, Thresholds};
use super::resolver::ResolvedClient;
use crate::assurance::{AssuranceError, AssurancePlatform, Sample, SampleError};
use crate::retry::{with_retry, RetryConfig};

/// Polls one client until it has been degraded for `counter_max` consecutive ticks
pub struct ClientMonitor {
    platform: Arc<dyn AssurancePlatform>,
    client: ResolvedClient,
    thresholds: Thresholds,
    interval: Duration,
    auth_retry: RetryConfig,
    state: AlertState,
}

/// Result of a single poll
#[derive(Debug)]
pub enum TickOutcome {
    Healthy(Sample),
    Degraded { sample: Sample, breaches: Breaches },
    /// No usable sample this tick; the counter is left untouched
    Skipped(CollectError),
}

/// Why a tick produced no sample
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("authentication failed: {0}")]
    Auth(AssuranceError),

    #[error("client detail request failed: {0}")]
    Fetch(AssuranceError),

    #[error("unusable client detail: {0}")]
    Sample(#[from] SampleError),
}

/// Raised once the ceiling is reached
#[derive(Debug, Clone)]
pub struct ClientAlert {
    pub client: ResolvedClient,
    /// The sample that completed the run of degraded polls
    pub sample: Sample,
    pub consecutive: u32,
}

impl ClientMonitor {
    pub fn new(
        platform: Arc<dyn AssurancePlatform>,
        client: ResolvedClient,
        thresholds: Thresholds,
        interval: Duration,
    ) -> Self {
        let state = AlertState::new(thresholds.counter_max);
        Self {
            platform,
            client,
            thresholds,
            interval,
            auth_retry: RetryConfig::default(),
            state,
        }
    }

    pub fn with_auth_retry(mut self, retry: RetryConfig) -> Self {
        self.auth_retry = retry;
        self
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Poll until the alert fires, sleeping `interval` between ticks
    pub async fn run(&mut self) -> ClientAlert {
        loop {
            if let TickOutcome::Degraded { sample, .. } = self.tick().await {
                if self.state.phase() == MonitorPhase::Alerting {
                    return ClientAlert {
                        client: self.client.clone(),
                        sample,
                        consecutive: self.state.count(),
                    };
                }
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Collect one sample, evaluate it and update the counter
    pub async fn tick(&mut self) -> TickOutcome {
        let sample = match self.collect().await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(
                    mac_address = %self.client.mac_address,
                    error = %e,
                    count = self.state.count(),
                    "Unable to collect the client info, tick skipped"
                );
                return TickOutcome::Skipped(e);
            }
        };

        let breaches = self.thresholds.evaluate(&sample);
        let degraded = breaches.any();
        self.state.record(degraded);

        tracing::info!(
            health = sample.health_score,
            total_bytes = sample.total_bytes(),
            data_rate = sample.data_rate,
            snr = sample.snr,
            ssid = %sample.ssid,
            access_point = %sample.access_point,
            location = %sample.location,
            "Client sample"
        );
        tracing::info!(
            alert = degraded,
            count = self.state.count(),
            ceiling = self.state.ceiling(),
            "Alert state"
        );

        if degraded {
            TickOutcome::Degraded { sample, breaches }
        } else {
            TickOutcome::Healthy(sample)
        }
    }

    /// A fresh token every tick; platform tokens expire
    async fn collect(&self) -> Result<Sample, CollectError> {
        let token = with_retry(&self.auth_retry, "Authentication", || {
            self.platform.authenticate()
        })
        .await
        .map_err(CollectError::Auth)?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let detail = self
            .platform
            .get_client_detail(&self.client.mac_address, timestamp, &token)
            .await
            .map_err(CollectError::Fetch)?;

        Ok(Sample::try_from(&detail)?)
    }
}
