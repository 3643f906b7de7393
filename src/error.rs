//! Domain-specific error types for Flow-Synth.
//!
//! Uses `thiserror` for ergonomic error definitions that integrate
//! with the broader `anyhow` error handling strategy.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by the window → distribution → allocation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid window: end {end} must be at least one minute after start {start}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Unrecognised date/time '{0}' (expected e.g. \"23/6/2020 11:00\" or \"2020-06-23 11:00\")")]
    InvalidDateTime(String),

    #[error(
        "Too few records to simulate realistic traffic: {requested} over {duration_minutes} minutes \
         is {density:.2}/min, below the floor of {threshold:.2}/min (need at least {minimum_total})"
    )]
    InsufficientDensity {
        requested: u64,
        duration_minutes: usize,
        density: f64,
        threshold: f64,
        minimum_total: u64,
    },

    #[error("Intensity sum over the window is zero; cannot scale {requested} records")]
    DivisionByZero { requested: u64 },

    #[error("Requested {requested} records, more than the supported maximum of {max}")]
    TotalTooLarge { requested: u64, max: u64 },
}

impl SimulationError {
    /// Whether the caller can recover by resubmitting with a different total.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientDensity { .. })
    }

    /// The smallest total that would pass the density check, if this is a density failure.
    pub fn minimum_total(&self) -> Option<u64> {
        match self {
            Self::InsufficientDensity { minimum_total, .. } => Some(*minimum_total),
            _ => None,
        }
    }
}

/// Errors found while validating configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ip_pool_size must be at least 2 (got {0})")]
    IpPoolTooSmall(usize),

    #[error("ip_pool_size must be at most {max} (got {actual})")]
    IpPoolTooLarge { actual: usize, max: usize },

    #[error("total_records must be at most {max} (got {actual})")]
    TotalRecordsTooLarge { actual: u64, max: u64 },

    #[error("density floor must have a non-zero number of minutes (got {records}/{minutes})")]
    InvalidDensityFloor { records: u64, minutes: u64 },

    #[error("max_attempts must be greater than 0")]
    NoAttempts,

    #[error("byte range is empty or non-positive ({min} .. {max})")]
    InvalidByteRange { min: f64, max: f64 },

    #[error("packet_size must be greater than 0")]
    ZeroPacketSize,
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
