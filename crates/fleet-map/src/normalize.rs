//! Position resolution for loosely shaped bus records.
//!
//! A [`BusRecord`] may carry its position flat or nested.  Each component
//! is resolved on its own:
//!
//! 1. latitude is the flat `lat` if usable, otherwise `location.lat`;
//! 2. longitude is the flat `lng` if usable, otherwise `location.lng`;
//! 3. a record missing either component has no position and is dropped.
//!
//! A latitude from one shape may therefore pair with a longitude from the
//! other; [`PositionSource::Mixed`] reports when that happened.
//!
//! What "usable" means is set by [`CoordinatePolicy`].  The default treats
//! zero exactly like a missing value, because that is how the live feed has
//! always been interpreted: a device without a fix reports `0`.

use serde::{Deserialize, Serialize};

use fleet_core::{BusRecord, GeoPoint};

// ── Policy ───────────────────────────────────────────────────────────────────

/// Which coordinate values count as present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Zero, NaN, infinities and absent values are all unusable.  A bus
    /// sitting exactly on the equator or the prime meridian is dropped.
    #[default]
    FalsyIsMissing,
    /// Any present finite value is usable, including zero.
    PresenceOnly,
}

impl CoordinatePolicy {
    #[inline]
    fn accept(self, v: Option<f64>) -> Option<f64> {
        let v = v.filter(|v| v.is_finite())?;
        match self {
            CoordinatePolicy::FalsyIsMissing if v == 0.0 => None,
            _ => Some(v),
        }
    }
}

// ── PositionSource ───────────────────────────────────────────────────────────

/// Which record shape a resolved position came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PositionSource {
    Flat(GeoPoint),
    Nested(GeoPoint),
    /// One component from each shape.
    Mixed(GeoPoint),
}

impl PositionSource {
    #[inline]
    pub fn point(self) -> GeoPoint {
        match self {
            PositionSource::Flat(p) | PositionSource::Nested(p) | PositionSource::Mixed(p) => p,
        }
    }
}

// ── Normalizer ───────────────────────────────────────────────────────────────

/// Resolves a record to a single position under a [`CoordinatePolicy`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Normalizer {
    pub policy: CoordinatePolicy,
}

impl Normalizer {
    pub fn new(policy: CoordinatePolicy) -> Self {
        Self { policy }
    }

    /// Resolve `record`, reporting which shape supplied the position.
    pub fn resolve_source(&self, record: &BusRecord) -> Option<PositionSource> {
        let nested = record.location.unwrap_or_default();
        let (lat, lat_flat) = self.component(record.lat, nested.lat)?;
        let (lng, lng_flat) = self.component(record.lng, nested.lng)?;
        let p = GeoPoint::new(lat, lng);
        Some(match (lat_flat, lng_flat) {
            (true, true) => PositionSource::Flat(p),
            (false, false) => PositionSource::Nested(p),
            _ => PositionSource::Mixed(p),
        })
    }

    /// One component, flat first.  The flag is `true` when the flat value won.
    fn component(&self, flat: Option<f64>, nested: Option<f64>) -> Option<(f64, bool)> {
        match self.policy.accept(flat) {
            Some(v) => Some((v, true)),
            None => self.policy.accept(nested).map(|v| (v, false)),
        }
    }

    /// Resolve `record` to a position, or `None` if it has no usable one.
    #[inline]
    pub fn resolve(&self, record: &BusRecord) -> Option<GeoPoint> {
        self.resolve_source(record).map(PositionSource::point)
    }

    /// Positions of every resolvable record, in input order.
    pub fn positions<'a>(
        &'a self,
        records: &'a [BusRecord],
    ) -> impl Iterator<Item = GeoPoint> + 'a {
        records.iter().filter_map(|r| self.resolve(r))
    }

    /// Split `records` into resolvable `(record, position)` pairs and a count
    /// of the records that were dropped.
    pub fn partition<'a>(&self, records: &'a [BusRecord]) -> (Vec<(&'a BusRecord, GeoPoint)>, usize) {
        let mut kept = Vec::with_capacity(records.len());
        let mut dropped = 0;
        for record in records {
            match self.resolve(record) {
                Some(p) => kept.push((record, p)),
                None => {
                    log::trace!("bus {:?}: no usable position, skipped", record.id.as_str());
                    dropped += 1;
                }
            }
        }
        (kept, dropped)
    }
}

/// Resolve `record` under the default policy.
#[inline]
pub fn resolve(record: &BusRecord) -> Option<GeoPoint> {
    Normalizer::default().resolve(record)
}
