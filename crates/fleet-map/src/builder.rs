//! Fluent builder for constructing a [`FleetMapView`].

use std::fmt;

use chrono::{Local, TimeZone};

use fleet_core::GeoPoint;

use crate::config::MapViewConfig;
use crate::surface::MapSurface;
use crate::view::FleetMapView;
use crate::MapResult;

/// Fluent builder for [`FleetMapView<S, Tz>`].
///
/// # Required inputs
///
/// - [`MapViewConfig`]: default camera, padding, tile layer, …
/// - `S: MapSurface`: the map being driven
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                         |
/// |-----------------|---------------------------------|
/// | `.timezone(tz)` | `chrono::Local`                 |
/// | `.focus(p)`     | none (no distance labels)       |
///
/// # Example
///
/// ```rust,ignore
/// let mut view = MapViewBuilder::new(MapViewConfig::default(), surface)
///     .timezone(chrono::Utc)
///     .build()?;
/// view.recompute(Some(records), UpdateTrigger::RecordsReplaced);
/// ```
pub struct MapViewBuilder<S: MapSurface, Tz = Local> {
    config:  MapViewConfig,
    surface: S,
    tz:      Tz,
    focus:   Option<GeoPoint>,
}

impl<S: MapSurface> MapViewBuilder<S, Local> {
    pub fn new(config: MapViewConfig, surface: S) -> Self {
        Self { config, surface, tz: Local, focus: None }
    }
}

impl<S, Tz> MapViewBuilder<S, Tz>
where
    S: MapSurface,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Render popup times in `tz` instead of the host's local zone.
    pub fn timezone<Tz2>(self, tz: Tz2) -> MapViewBuilder<S, Tz2>
    where
        Tz2: TimeZone,
        Tz2::Offset: fmt::Display,
    {
        MapViewBuilder {
            config:  self.config,
            surface: self.surface,
            tz,
            focus:   self.focus,
        }
    }

    /// Include `focus` in every fit and label markers with their distance
    /// from it.
    pub fn focus(mut self, focus: GeoPoint) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Validate the config and return an unmounted view.  The first
    /// [`recompute`](FleetMapView::recompute) mounts it.
    pub fn build(self) -> MapResult<FleetMapView<S, Tz>> {
        self.config.validate()?;
        Ok(FleetMapView::from_parts(self.config, self.surface, self.tz, self.focus))
    }
}
