//! clientwatch: wireless client health monitoring
//!
//! Polls an assurance platform for one wireless client's health, signal and
//! traffic figures, and posts a notification card to a messaging space once
//! the client has been degraded for a configured number of consecutive polls.
//!
//! # Components
//!
//! - **Alert monitor** ([`alerts`]): resolve the client, poll, evaluate
//!   thresholds, count consecutive breaches, notify once
//! - **Platform clients** ([`assurance`], [`messaging`]): thin REST wrappers
//!   behind traits, with explicit timeouts
//! - **Webhook receiver** ([`api`]): persists pushed telemetry per user and
//!   forwards chat events to the [`bot`]
//! - **Bot responder** ([`bot`]): answers `status` queries from the persisted
//!   files
//!
//! # Example
//!
//! ```no_run
//! use clientwatch::alerts::run_monitor;
//! use clientwatch::config::MonitorSettings;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = MonitorSettings::from_env()?;
//! run_monitor(settings).await?;
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod api;
pub mod assurance;
pub mod bot;
pub mod config;
pub mod messaging;
pub mod retry;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use alerts::{ClientAlert, Thresholds};
pub use assurance::{AssurancePlatform, Sample};
pub use config::{MonitorSettings, ReceiverSettings};
pub use messaging::MessagingPlatform;
