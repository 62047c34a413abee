//! `fleet-map`: live fleet map core.
//!
//! # One recompute pass
//!
//! ```text
//! host replaces record array
//!   └─ FleetMapView::recompute(records, RecordsReplaced)
//!        ① Mount:     first pass only: default camera + tile layer.
//!        ② Resolve:   Normalizer picks lat and lng, each flat first, then
//!                       nested; records missing either are dropped.
//!        ③ Fit:       ViewportFitter bounds the survivors and issues one
//!                       fit_bounds call (50 px padding).  Empty ⇒ no call.
//!        ④ Render:    MarkerRenderer builds one marker + popup per
//!                       survivor; the overlay is replaced wholesale.
//! ```
//!
//! Passes are synchronous and never fail: bad position data is an expected
//! condition for a moving fleet and is skipped, not reported.  Errors exist
//! only at the configuration edge ([`MapError`]).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_map::{MapViewBuilder, MapViewConfig, RecordingSurface, UpdateTrigger};
//!
//! let mut view = MapViewBuilder::new(MapViewConfig::default(), RecordingSurface::default())
//!     .build()?;
//! let records = fleet_core::parse_snapshot(json)?;
//! view.recompute(Some(records), UpdateTrigger::RecordsReplaced);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod marker;
pub mod normalize;
pub mod surface;
pub mod tile;
pub mod view;
pub mod viewport;


pub use builder::MapViewBuilder;
pub use config::MapViewConfig;
pub use error::{MapError, MapResult};
pub use marker::{Marker, MarkerGlyph, MarkerRenderer, PopupSummary};
pub use normalize::{CoordinatePolicy, Normalizer, PositionSource};
pub use surface::{Camera, MapSurface, NoopSurface, RecordingSurface};
pub use tile::TileLayer;
pub use view::{FleetMapView, PassReport, UpdateTrigger, ViewState};
pub use viewport::{Bounds, FitRequest, Padding, ViewportFitter, ViewportSize, zoom_for_bounds};
