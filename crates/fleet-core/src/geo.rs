//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude: positions come straight from
//! GPS fixes and are handed to the map surface unchanged, so there is no
//! reason to lose precision on the way through.

use serde::{Deserialize, Serialize};

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Latitude within ±90° and longitude within ±180°.
    #[inline]
    pub fn in_range(self) -> bool {
        self.is_finite() && self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy is well under 0.5 % at city scale, which is all a
    /// "how far away is that bus" label needs.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        self.distance_m(other) / 1_000.0
    }

    /// `[lat, lng]` pair, the order map libraries expect.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<[f64; 2]> for GeoPoint {
    #[inline]
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
