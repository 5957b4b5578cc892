//! clientwatch webhook receiver
//!
//! Persists pushed wireless client telemetry and answers chat-bot status
//! queries.
//!
//! Environment variables (all prefixed `CLIENTWATCH_`):
//! - RECEIVER_HOST / RECEIVER_PORT: bind address (default: 0.0.0.0:8080)
//! - WEBHOOK_USER / WEBHOOK_PASS: basic auth for the gated endpoints (required)
//! - WIRELESS_FOLDER: storage folder (default: wireless_clients)
//! - DNAC_URL: assurance platform, for client 360 links (required)
//! - WEBEX_URL, BOT_TOKEN, BOT_ID (required), BOT_NAME, BOT_ROOM: chat bot
//! - HTTP_TIMEOUT_SECS: timeout for every outbound call (default: 30)

use clientwatch::api::run_server;
use clientwatch::config::ReceiverSettings;
use clientwatch::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_stdout();

    let settings = ReceiverSettings::from_env()?;

    tracing::info!("Receiver configuration:");
    tracing::info!("  Listen: {}:{}", settings.host, settings.port);
    tracing::info!("  Wireless folder: {}", settings.wireless_folder.display());
    tracing::info!("  Bot: {} in '{}'", settings.bot.bot_name, settings.bot.room);

    run_server(settings).await
}
