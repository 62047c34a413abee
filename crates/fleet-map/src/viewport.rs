//! Bounding rectangles and the one-shot camera fit.
//!
//! Each pass the fitter collects every resolvable position, builds the
//! minimal enclosing rectangle and asks the surface to frame it with a fixed
//! pixel padding.  It is a single camera move, not a follow lock: the
//! operator can pan away and the view stays put until the next pass.
//!
//! With nothing to frame the fitter issues no call and the surface keeps
//! whatever camera it had.

use rstar::{AABB, Envelope};
use serde::{Deserialize, Serialize};

use fleet_core::{BusRecord, GeoPoint};

use crate::normalize::Normalizer;
use crate::surface::MapSurface;

/// Default padding around fitted bounds, pixels per side.
pub const DEFAULT_FIT_PADDING_PX: u32 = 50;

/// Latitude limit of the Web-Mercator projection.
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Tile edge in pixels; world width at zoom `z` is `TILE_SIZE * 2^z`.
const TILE_SIZE: f64 = 256.0;

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Axis-aligned lat/lng rectangle.  Stored as an `rstar` envelope over
/// `[lat, lng]` points.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    envelope: AABB<[f64; 2]>,
}

impl Bounds {
    /// Minimal rectangle enclosing `points`, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let pts: Vec<[f64; 2]> = points.into_iter().map(GeoPoint::to_array).collect();
        if pts.is_empty() {
            return None;
        }
        Some(Self { envelope: AABB::from_points(pts.iter()) })
    }

    pub fn from_corners(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self { envelope: AABB::from_corners(south_west.to_array(), north_east.to_array()) }
    }

    #[inline]
    pub fn south_west(&self) -> GeoPoint {
        self.envelope.lower().into()
    }

    #[inline]
    pub fn north_east(&self) -> GeoPoint {
        self.envelope.upper().into()
    }

    /// SW, NW, NE, SE.
    pub fn corners(&self) -> [GeoPoint; 4] {
        let sw = self.south_west();
        let ne = self.north_east();
        [
            sw,
            GeoPoint::new(ne.lat, sw.lng),
            ne,
            GeoPoint::new(sw.lat, ne.lng),
        ]
    }

    /// Geographic midpoint.
    pub fn center(&self) -> GeoPoint {
        let sw = self.south_west();
        let ne = self.north_east();
        GeoPoint::new((sw.lat + ne.lat) * 0.5, (sw.lng + ne.lng) * 0.5)
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.envelope.contains_point(&p.to_array())
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.corners().iter().all(|&c| self.contains(c))
    }

    /// Grow to include `p`.
    pub fn extend(&mut self, p: GeoPoint) {
        self.envelope.merge(&AABB::from_point(p.to_array()));
    }

    /// Corners are finite and not inverted.  Guards against NaN slipping in
    /// from pathological input.
    pub fn is_valid(&self) -> bool {
        let sw = self.south_west();
        let ne = self.north_east();
        sw.is_finite() && ne.is_finite() && sw.lat <= ne.lat && sw.lng <= ne.lng
    }

    /// Span in degrees as `(lat, lng)`.
    pub fn span(&self) -> (f64, f64) {
        let sw = self.south_west();
        let ne = self.north_east();
        (ne.lat - sw.lat, ne.lng - sw.lng)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.south_west(), self.north_east())
    }
}

// ── Padding / FitRequest ─────────────────────────────────────────────────────

/// Pixel padding applied on each side when fitting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Padding {
    pub const fn uniform(px: u32) -> Self {
        Self { x: px, y: px }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(DEFAULT_FIT_PADDING_PX)
    }
}

/// Pixel size of the visible map area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width:  u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

/// One camera move issued to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct FitRequest {
    pub bounds:  Bounds,
    pub padding: Padding,
}

// ── ViewportFitter ───────────────────────────────────────────────────────────

/// Frames the current set of positions on a [`MapSurface`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ViewportFitter {
    pub normalizer: Normalizer,
    pub padding:    Padding,
}

impl ViewportFitter {
    pub fn new(normalizer: Normalizer, padding: Padding) -> Self {
        Self { normalizer, padding }
    }

    /// Build the fit request for `positions` without touching a surface.
    ///
    /// `None` when there is nothing to frame or the rectangle is degenerate.
    pub fn plan<I>(&self, positions: I) -> Option<FitRequest>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let bounds = Bounds::from_points(positions)?;
        if !bounds.is_valid() {
            log::debug!("fit skipped: invalid bounds {bounds}");
            return None;
        }
        Some(FitRequest { bounds, padding: self.padding })
    }

    /// Resolve `records`, add `focus` if given, and issue at most one
    /// `fit_bounds` call on `surface`.  Returns the request that was issued.
    pub fn fit<S>(
        &self,
        records: &[BusRecord],
        focus:   Option<GeoPoint>,
        surface: &mut S,
    ) -> Option<FitRequest>
    where
        S: MapSurface + ?Sized,
    {
        let focus = focus.filter(|p| p.is_finite());
        let positions = focus.into_iter().chain(self.normalizer.positions(records));
        let request = self.plan(positions)?;
        surface.fit_bounds(&request);
        Some(request)
    }
}

// ── Zoom calculation ─────────────────────────────────────────────────────────

/// Web-Mercator pixel coordinates of `p` at zoom 0.
fn project(p: GeoPoint) -> (f64, f64) {
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (p.lng + 180.0) / 360.0 * TILE_SIZE;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5 * TILE_SIZE;
    (x, y)
}

/// Largest whole zoom level at which `bounds`, plus `padding` on each side,
/// fits inside `viewport`.  Clamped to `[min_zoom, max_zoom]`.
///
/// A single-point rectangle has no extent and yields `max_zoom`.
pub fn zoom_for_bounds(
    bounds:   &Bounds,
    viewport: ViewportSize,
    padding:  Padding,
    min_zoom: u8,
    max_zoom: u8,
) -> u8 {
    let (x0, y0) = project(bounds.south_west());
    let (x1, y1) = project(bounds.north_east());
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    let avail_w = viewport.width.saturating_sub(padding.x.saturating_mul(2)).max(1) as f64;
    let avail_h = viewport.height.saturating_sub(padding.y.saturating_mul(2)).max(1) as f64;

    let scale = (avail_w / dx).min(avail_h / dy);
    if !scale.is_finite() {
        return max_zoom;
    }
    let lo = min_zoom.min(max_zoom) as f64;
    let hi = max_zoom.max(min_zoom) as f64;
    scale.log2().floor().clamp(lo, hi) as u8
}
