//! The seam between the fleet view and whatever actually draws the map.
//!
//! A real deployment backs [`MapSurface`] with a browser mapping library;
//! the view only ever issues these four calls.  [`RecordingSurface`] is an
//! in-memory implementation that turns fit requests into a concrete camera,
//! used by the demo and the tests.

use fleet_core::GeoPoint;

use crate::marker::Marker;
use crate::tile::TileLayer;
use crate::viewport::{FitRequest, ViewportSize, zoom_for_bounds};

/// Center and zoom of a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub center: GeoPoint,
    pub zoom:   u8,
}

impl std::fmt::Display for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ z{}", self.center, self.zoom)
    }
}

/// Operations the fleet view performs on a map.
///
/// The camera is touched only by `set_view` (on mount) and `fit_bounds`
/// (once per pass with data); the overlay only by `set_markers`.
pub trait MapSurface {
    /// Jump to `center` at `zoom`.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Attach the basemap.  Called once per mount.
    fn add_tile_layer(&mut self, _layer: &TileLayer) {}

    /// Frame `request.bounds` with `request.padding` pixels on each side.
    fn fit_bounds(&mut self, request: &FitRequest);

    /// Replace the marker overlay with `markers`.
    fn set_markers(&mut self, markers: &[Marker]);

    /// Current camera, if the surface can report it.
    fn camera(&self) -> Option<Camera> {
        None
    }
}

// ── NoopSurface ──────────────────────────────────────────────────────────────

/// A [`MapSurface`] that discards every call.
pub struct NoopSurface;

impl MapSurface for NoopSurface {
    fn set_view(&mut self, _center: GeoPoint, _zoom: u8) {}
    fn fit_bounds(&mut self, _request: &FitRequest) {}
    fn set_markers(&mut self, _markers: &[Marker]) {}
}

// ── RecordingSurface ─────────────────────────────────────────────────────────

/// In-memory surface that keeps a camera and records every call.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub size:        ViewportSize,
    pub min_zoom:    u8,
    pub max_zoom:    u8,
    camera:          Option<Camera>,
    tile_layer:      Option<TileLayer>,
    markers:         Vec<Marker>,
    fits:            Vec<FitRequest>,
    set_view_calls:  usize,
}

impl RecordingSurface {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            size,
            min_zoom:       0,
            max_zoom:       19,
            camera:         None,
            tile_layer:     None,
            markers:        Vec::new(),
            fits:           Vec::new(),
            set_view_calls: 0,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Every fit request received, oldest first.
    pub fn fits(&self) -> &[FitRequest] {
        &self.fits
    }

    pub fn last_fit(&self) -> Option<&FitRequest> {
        self.fits.last()
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layer.as_ref()
    }

    pub fn set_view_calls(&self) -> usize {
        self.set_view_calls
    }

    /// Simulate the operator panning the map by hand.
    pub fn pan_to(&mut self, center: GeoPoint) {
        if let Some(cam) = self.camera.as_mut() {
            cam.center = center;
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.set_view_calls += 1;
        self.camera = Some(Camera { center, zoom });
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.min_zoom = layer.min_zoom;
        self.max_zoom = layer.max_zoom;
        self.tile_layer = Some(layer.clone());
    }

    fn fit_bounds(&mut self, request: &FitRequest) {
        let zoom = zoom_for_bounds(
            &request.bounds,
            self.size,
            request.padding,
            self.min_zoom,
            self.max_zoom,
        );
        self.camera = Some(Camera { center: request.bounds.center(), zoom });
        self.fits.push(request.clone());
    }

    fn set_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
    }

    fn camera(&self) -> Option<Camera> {
        self.camera
    }
}
