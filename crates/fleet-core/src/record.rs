//! Bus position records as delivered by the live data source.
//!
//! The source is loosely typed.  A record may carry its position flat
//! (`lat`/`lng`) or nested (`location.lat`/`location.lng`), optional fields
//! come and go, and the occasional device writes a string where a number
//! belongs.  [`BusRecord`] therefore keeps *both* position shapes and reads
//! every field leniently: a value of the wrong JSON type becomes `None`
//! instead of failing the record.  Resolving which shape wins is the job of
//! `fleet_map::normalize`.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{BusId, FleetResult, Timestamp};

// ── Types ─────────────────────────────────────────────────────────────────────

/// Nested position shape: `{"location": {"lat": .., "lng": ..}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// One vehicle's reported state at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRecord {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: BusId,

    /// Flat position shape.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    /// Nested position shape.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location: Option<RawLocation>,

    /// km/h.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl BusRecord {
    /// A record with only an id: no position, speed, or timestamp.
    pub fn new(id: impl Into<BusId>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Set the flat `lat`/`lng` pair.
    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Set the nested `location` pair.
    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(RawLocation { lat: Some(lat), lng: Some(lng) });
        self
    }

    pub fn with_speed(mut self, kmh: f64) -> Self {
        self.speed = Some(kmh);
        self
    }

    pub fn with_last_updated(mut self, ts: Timestamp) -> Self {
        self.last_updated = Some(ts);
        self
    }

    pub fn with_driver(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }
}

// ── Snapshot parsing ──────────────────────────────────────────────────────────

/// Parse one wholesale snapshot from the data source.
///
/// Accepts a JSON array of records.  `null` (the source had nothing to send)
/// and any other non-array top level yield an empty snapshot; array entries
/// that are not objects are skipped.  Only syntactically invalid JSON is an
/// error.
pub fn parse_snapshot(json: &str) -> FleetResult<Vec<BusRecord>> {
    let value: Value = serde_json::from_str(json)?;
    Ok(records_from_value(value))
}

/// Read and parse a snapshot file.  See [`parse_snapshot`].
pub fn load_snapshot(path: &Path) -> FleetResult<Vec<BusRecord>> {
    let text = fs::read_to_string(path)?;
    parse_snapshot(&text)
}

/// Convert an already-decoded JSON value into records.  See [`parse_snapshot`].
pub fn records_from_value(value: Value) -> Vec<BusRecord> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => return Vec::new(),
        other => {
            log::warn!("snapshot is not an array (got {}); treating as empty", json_kind(&other));
            return Vec::new();
        }
    };

    let total = entries.len();
    let records: Vec<BusRecord> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|v| match serde_json::from_value::<BusRecord>(v) {
            Ok(r) => Some(r),
            Err(e) => {
                log::trace!("skipping undecodable record: {e}");
                None
            }
        })
        .collect();

    if records.len() < total {
        log::debug!("snapshot: kept {} of {} entries", records.len(), total);
    }
    records
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Lenient field decoding ────────────────────────────────────────────────────

/// Decode a field, mapping any type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let ts: Option<Timestamp> = lenient(deserializer)?;
    Ok(ts.filter(|t| !t.is_unset()))
}
