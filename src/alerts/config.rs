//! Alert thresholds and the consecutive-breach counter

use serde::{Deserialize, Serialize};

use crate::assurance::Sample;

/// Static thresholds a sample is checked against.
///
/// A sample breaches when any value is at or below its floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum acceptable overall health score (1-10 scale)
    pub health_low: i64,
    /// Minimum acceptable signal-to-noise ratio
    pub snr_min: f64,
    /// Minimum acceptable transmitted + received bytes
    pub bw_low: f64,
    /// Consecutive degraded polls required before alerting
    pub counter_max: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            health_low: 8,
            snr_min: 60.0,
            bw_low: 100.0,
            counter_max: 3,
        }
    }
}

impl Thresholds {
    /// Check a sample against every floor
    pub fn evaluate(&self, sample: &Sample) -> Breaches {
        Breaches {
            health: sample.health_score <= self.health_low,
            snr: sample.snr <= self.snr_min,
            bandwidth: sample.total_bytes() <= self.bw_low,
        }
    }
}

/// Which floors a sample fell through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breaches {
    pub health: bool,
    pub snr: bool,
    pub bandwidth: bool,
}

impl Breaches {
    /// A sample is degraded when any single predicate is true
    pub fn any(&self) -> bool {
        self.health || self.snr || self.bandwidth
    }
}

/// Phase of the monitoring loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Monitoring,
    Alerting,
}

/// Counter of back-to-back degraded samples, bounded by the ceiling
#[derive(Debug, Clone)]
pub struct AlertState {
    consecutive_degraded: u32,
    ceiling: u32,
}

impl AlertState {
    pub fn new(ceiling: u32) -> Self {
        Self {
            consecutive_degraded: 0,
            ceiling: ceiling.max(1),
        }
    }

    /// Record the outcome of one evaluated sample.
    ///
    /// A healthy sample clears all history.
    pub fn record(&mut self, degraded: bool) -> MonitorPhase {
        if degraded {
            self.consecutive_degraded = (self.consecutive_degraded + 1).min(self.ceiling);
        } else {
            self.consecutive_degraded = 0;
        }
        self.phase()
    }

    pub fn phase(&self) -> MonitorPhase {
        if self.consecutive_degraded >= self.ceiling {
            MonitorPhase::Alerting
        } else {
            MonitorPhase::Monitoring
        }
    }

    pub fn count(&self) -> u32 {
        self.consecutive_degraded
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }
}
