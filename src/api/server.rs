use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::auth::{basic_auth_middleware, BasicCredentials};
use super::handlers::{index, wireless_clients, wireless_teams, AppState};
use crate::bot::BotResponder;
use crate::config::ReceiverSettings;
use crate::messaging::WebexClient;
use crate::store::ClientStore;

/// Build the application router.
///
/// `/` and `/wireless_clients` require basic auth; the chat webhook is open.
pub fn build_router(state: Arc<AppState>, credentials: BasicCredentials) -> Router {
    let gated = Router::new()
        .route("/", get(index))
        .route("/wireless_clients", post(wireless_clients))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(credentials),
            basic_auth_middleware,
        ));

    Router::new()
        .route("/wireless_teams", post(wireless_teams))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the webhook receiver
pub async fn run_server(settings: ReceiverSettings) -> Result<(), Box<dyn std::error::Error>> {
    let store = ClientStore::new(&settings.wireless_folder);
    tokio::fs::create_dir_all(store.folder()).await?;

    let messaging = Arc::new(WebexClient::new(&settings.webex, settings.http_timeout)?);
    let bot = BotResponder::new(
        messaging,
        store.clone(),
        settings.bot.clone(),
        &settings.dnac_url,
    );

    let state = Arc::new(AppState {
        store,
        bot: Some(Arc::new(bot)),
    });
    let credentials =
        BasicCredentials::new(&settings.webhook_username, &settings.webhook_password);

    let app = build_router(state, credentials);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    tracing::info!("Starting receiver on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
