//! clientwatch monitor
//!
//! Run with: cargo run
//!
//! Environment variables (all prefixed `CLIENTWATCH_`):
//! - DNAC_URL, DNAC_USER, DNAC_PASS: assurance platform (required)
//! - DNAC_INSECURE: accept self-signed certificates (default: false)
//! - CLIENT_USERNAME: wireless user to monitor
//! - CLIENT_MAC: fallback MAC address when the user cannot be resolved
//! - HEALTH_LOW, SNR_MIN, BW_LOW: thresholds (default: 8, 60.0, 100.0)
//! - COUNTER_MAX: consecutive degraded polls before alerting (default: 3)
//! - TIME_INTERVAL: poll interval in minutes (default: 5)
//! - WEBEX_URL, BOT_TOKEN, WEBEX_SPACE: notification destination
//! - HTTP_TIMEOUT_SECS: timeout for every outbound call (default: 30)
//! - LOG_FILE: debug log file (default: application_run.log)
//! - RUST_LOG: stdout log level (default: info)

use clientwatch::alerts::run_monitor;
use clientwatch::config::MonitorSettings;
use clientwatch::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = MonitorSettings::from_env()?;
    let _log_guard = telemetry::init_with_file(&settings.log_file);

    let started = chrono::Local::now();
    tracing::info!(
        "Wireless Client Monitoring App Start, {}",
        started.format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!(
        health_low = settings.thresholds.health_low,
        snr_min = settings.thresholds.snr_min,
        bw_low = settings.thresholds.bw_low,
        counter_max = settings.thresholds.counter_max,
        interval_minutes = settings.poll_interval_minutes,
        "Thresholds"
    );

    run_monitor(settings).await?;

    tracing::info!(
        "Wireless Client Monitoring App Run End, {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
