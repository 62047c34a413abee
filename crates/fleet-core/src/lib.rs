//! `fleet-core`: foundational types for the fleet map workspace.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and only a handful of external ones (`serde`,
//! `serde_json`, `chrono`, `thiserror`, `log`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BusId`                                               |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`record`]      | `BusRecord`, `RawLocation`, snapshot parsing          |
//! | [`time`]        | `Timestamp`, time-of-day formatting                   |
//! | [`error`]       | `FleetError`, `FleetResult`                           |
//!
//! Records are deliberately parsed leniently: a field with the wrong JSON
//! type reads as absent instead of rejecting the whole record.  Deciding
//! whether a record is *usable* is left to `fleet-map`.

pub mod error;
pub mod geo;
pub mod ids;
pub mod record;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FleetError, FleetResult};
pub use geo::GeoPoint;
pub use ids::BusId;
pub use record::{BusRecord, RawLocation, load_snapshot, parse_snapshot, records_from_value};
pub use time::{JUST_NOW, Timestamp, format_time_of_day};
