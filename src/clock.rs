//! Wall-clock timestamps for response bodies.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Issues ISO-8601 timestamps that never go backwards within a process.
///
/// Wall-clock steps (NTP corrections, manual changes) are absorbed by
/// re-issuing the latest instant already handed out.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last_micros: Arc<AtomicI64>,
}

impl Clock {
    /// Create a new clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current instant, clamped to the last one issued.
    pub fn now(&self) -> DateTime<Utc> {
        self.observe(Utc::now())
    }

    /// Current instant as an RFC 3339 string with microsecond precision.
    pub fn now_iso8601(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn observe(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        let wall = wall.trunc_subsecs(6);
        let micros = wall.timestamp_micros();
        let prev = self.last_micros.fetch_max(micros, Ordering::AcqRel);
        if prev > micros {
            DateTime::from_timestamp_micros(prev).unwrap_or(wall)
        } else {
            wall
        }
    }
}
