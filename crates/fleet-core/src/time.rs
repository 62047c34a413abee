//! Report timestamps and wall-clock formatting.
//!
//! # Design
//!
//! A bus report carries the time of its last fix as whole seconds since the
//! Unix epoch.  The data source emits this in two shapes:
//!
//! ```text
//!   "lastUpdated": 1700000000
//!   "lastUpdated": { "seconds": 1700000000, "nanoseconds": 0 }
//! ```
//!
//! Both decode to the same [`Timestamp`].  The only consumer is the marker
//! popup, which shows the local time of day, so sub-second precision is
//! dropped on the way in.

use std::fmt;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Popup label used when a record has no usable timestamp.
pub const JUST_NOW: &str = "Just now";

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Seconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    #[inline]
    pub fn secs(self) -> i64 {
        self.0
    }

    /// A zero timestamp is what the source writes before a device has ever
    /// reported, so it is treated the same as "no timestamp".
    #[inline]
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Utc.timestamp_opt(self.0, 0).single() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "@{}", self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTimestamp {
            Secs(i64),
            Fractional(f64),
            Object {
                #[serde(alias = "_seconds")]
                seconds: i64,
            },
        }

        Ok(match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Secs(s) => Timestamp(s),
            RawTimestamp::Fractional(s) => Timestamp(s.trunc() as i64),
            RawTimestamp::Object { seconds } => Timestamp(seconds),
        })
    }
}

// ── Formatting ───────────────────────────────────────────────────────────────

/// Wall-clock time of day for `ts` in `tz`, e.g. `"3:04:05 PM"`.
///
/// Returns `None` when `ts` is outside the range chrono can represent.
pub fn format_time_of_day<Tz>(ts: Timestamp, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_opt(ts.0, 0)
        .single()
        .map(|dt| dt.format("%-I:%M:%S %p").to_string())
}
