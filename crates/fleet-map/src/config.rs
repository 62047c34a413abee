//! Deployment configuration for a fleet map view.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "default_center": { "lat": 12.957952, "lng": 80.160793 },
//!   "default_zoom": 11,
//!   "fit_padding": { "x": 50, "y": 50 },
//!   "viewport_px": { "width": 800, "height": 600 },
//!   "coordinate_policy": "falsy_is_missing",
//!   "tile_layer": { "url_template": "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fleet_core::GeoPoint;

use crate::normalize::CoordinatePolicy;
use crate::tile::TileLayer;
use crate::viewport::{Padding, ViewportSize};
use crate::{MapError, MapResult};

/// Camera used before any data has arrived.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 12.957952, lng: 80.160793 };
pub const DEFAULT_ZOOM: u8 = 11;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub default_center:    GeoPoint,
    pub default_zoom:      u8,
    pub fit_padding:       Padding,
    /// Size of the map area.  Only consulted by surfaces that compute their
    /// own camera, such as `RecordingSurface`.
    pub viewport_px:       ViewportSize,
    pub coordinate_policy: CoordinatePolicy,
    pub tile_layer:        TileLayer,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            default_center:    DEFAULT_CENTER,
            default_zoom:      DEFAULT_ZOOM,
            fit_padding:       Padding::default(),
            viewport_px:       ViewportSize::default(),
            coordinate_policy: CoordinatePolicy::default(),
            tile_layer:        TileLayer::default(),
        }
    }
}

impl MapViewConfig {
    pub fn from_json_str(json: &str) -> MapResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> MapResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the config can drive a view.
    pub fn validate(&self) -> MapResult<()> {
        if !self.default_center.in_range() {
            return Err(MapError::InvalidCenter(self.default_center));
        }
        let tiles = &self.tile_layer;
        if tiles.min_zoom > tiles.max_zoom {
            return Err(MapError::Config(format!(
                "tile layer min_zoom {} exceeds max_zoom {}",
                tiles.min_zoom, tiles.max_zoom
            )));
        }
        if !tiles.allows_zoom(self.default_zoom) {
            return Err(MapError::InvalidZoom {
                zoom: self.default_zoom,
                min:  tiles.min_zoom,
                max:  tiles.max_zoom,
            });
        }
        if tiles.url_template.trim().is_empty() {
            return Err(MapError::Config("tile layer url_template is empty".into()));
        }
        if self.viewport_px.width == 0 || self.viewport_px.height == 0 {
            return Err(MapError::Config("viewport_px must be non-zero".into()));
        }
        Ok(())
    }
}
