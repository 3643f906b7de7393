//! Time window handling and phase alignment against the canonical anchor.
//!
//! A window is a half-open span `[start, start + D minutes)` where D is the
//! whole number of minutes between start and end. The phase of a window is
//! how far its start sits past the most recent 11:00 anchor.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::curve::{ANCHOR_HOUR, MINUTES_PER_DAY};
use crate::error::SimulationError;

/// Accepted input formats, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Minutes elapsed since the most recent canonical anchor, in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhaseOffset(usize);

impl PhaseOffset {
    /// Builds an offset, reducing modulo the cycle length.
    pub fn new(minutes: usize) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    pub fn minutes(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PhaseOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}m", self.0)
    }
}

/// Parses a date/time in any of the supported formats.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, SimulationError> {
    let trimmed = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SimulationError::InvalidDateTime(text.to_string()))
}

/// Resolves the phase of `start` against the canonical anchor.
///
/// The anchor is 11:00 on the start's own date, rolled back one day when the
/// start falls before it. Sub-minute remainders are truncated.
pub fn resolve_phase(start: NaiveDateTime) -> PhaseOffset {
    let anchor_time = NaiveTime::from_hms_opt(ANCHOR_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let mut anchor = start.date().and_time(anchor_time);
    if start < anchor {
        anchor -= Duration::days(1);
    }
    let minutes = start.signed_duration_since(anchor).num_minutes();
    PhaseOffset::new(minutes.max(0) as usize)
}

/// A validated simulation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration_minutes: usize,
}

impl Window {
    /// Creates a window, failing unless it spans at least one whole minute.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, SimulationError> {
        let minutes = end.signed_duration_since(start).num_minutes();
        if end <= start || minutes < 1 {
            return Err(SimulationError::InvalidWindow { start, end });
        }
        Ok(Self {
            start,
            end,
            duration_minutes: minutes as usize,
        })
    }

    /// Parses both endpoints and validates the window.
    pub fn parse(start: &str, end: &str) -> Result<Self, SimulationError> {
        Self::new(parse_datetime(start)?, parse_datetime(end)?)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whole minutes covered by the window.
    pub fn duration_minutes(&self) -> usize {
        self.duration_minutes
    }

    /// First instant after the last simulated minute.
    pub fn end_exclusive(&self) -> NaiveDateTime {
        self.start + Duration::minutes(self.duration_minutes as i64)
    }

    pub fn phase(&self) -> PhaseOffset {
        resolve_phase(self.start)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({} min)",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M"),
            self.duration_minutes
        )
    }
}
