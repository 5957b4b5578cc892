//! Client health alerting
//!
//! Resolves the monitored client, polls its health on a fixed interval and
//! posts a single notification after a run of consecutive degraded samples.

pub mod checker;
pub mod config;
pub mod notifier;
pub mod resolver;
pub mod runner;

pub use checker::{ClientAlert, ClientMonitor, CollectError, TickOutcome};
pub use config::{AlertState, Breaches, MonitorPhase, Thresholds};
pub use notifier::{Notifier, NotifierError};
pub use resolver::{resolve_client, ResolveError, ResolvedClient};
pub use runner::{monitor_client, run_monitor, MonitorError};
