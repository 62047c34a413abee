//! The `FleetMapView` and its recompute pass.
//!
//! # Lifecycle
//!
//! ```text
//!   Uninitialized ──mount──▶ DefaultView ──first fit──▶ FittedView
//!                                                         │   ▲
//!                                                         └───┘ refit in place
//! ```
//!
//! The host calls [`FleetMapView::recompute`] whenever the record array it
//! holds is replaced, saying so with [`UpdateTrigger::RecordsReplaced`].
//! Each pass is synchronous and complete: resolve positions, fit the camera
//! once, replace the marker overlay.  Nothing is carried between passes
//! except the latest snapshot and whatever camera the surface keeps.

use std::fmt;

use chrono::{Local, TimeZone};

use fleet_core::{BusRecord, GeoPoint};

use crate::config::MapViewConfig;
use crate::marker::MarkerRenderer;
use crate::normalize::Normalizer;
use crate::surface::MapSurface;
use crate::viewport::{FitRequest, ViewportFitter};

// ── State / trigger / report ──────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// No surface calls made yet.
    Uninitialized,
    /// Default center and zoom applied; no data framed yet.
    DefaultView,
    /// At least one pass has framed live positions.
    FittedView,
}

/// Why the host is calling [`FleetMapView::recompute`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateTrigger {
    /// The host holds a new record array.  The pass runs.
    RecordsReplaced,
    /// Same array as last time.  The pass is skipped.
    Unchanged,
}

/// Outcome of one recompute pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PassReport {
    /// Bus markers placed on the surface.  A focus marker is not counted.
    pub markers: usize,
    /// Records without a usable position.
    pub dropped: usize,
    /// The camera move issued, if any.
    pub fit:     Option<FitRequest>,
}

// ── FleetMapView ──────────────────────────────────────────────────────────────

/// Owns a map surface and keeps it showing the current fleet.
///
/// Create via [`MapViewBuilder`][crate::MapViewBuilder].
pub struct FleetMapView<S: MapSurface, Tz = Local> {
    config:   MapViewConfig,
    surface:  S,
    fitter:   ViewportFitter,
    renderer: MarkerRenderer<Tz>,
    records:  Vec<BusRecord>,
    focus:    Option<GeoPoint>,
    state:    ViewState,
}

impl<S, Tz> FleetMapView<S, Tz>
where
    S: MapSurface,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub(crate) fn from_parts(
        config:  MapViewConfig,
        surface: S,
        tz:      Tz,
        focus:   Option<GeoPoint>,
    ) -> Self {
        let normalizer = Normalizer::new(config.coordinate_policy);
        let fitter = ViewportFitter::new(normalizer, config.fit_padding);
        let mut renderer = MarkerRenderer::with_timezone(normalizer, tz);
        renderer.set_focus(focus);
        Self {
            config,
            surface,
            fitter,
            renderer,
            records: Vec::new(),
            focus: focus.filter(|p| p.is_finite()),
            state: ViewState::Uninitialized,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Apply the default camera and attach the tile layer.  No-op once
    /// mounted.
    pub fn mount(&mut self) {
        if self.state != ViewState::Uninitialized {
            return;
        }
        self.surface.set_view(self.config.default_center, self.config.default_zoom);
        self.surface.add_tile_layer(&self.config.tile_layer);
        self.state = ViewState::DefaultView;
        log::info!(
            "fleet map mounted at {} z{}",
            self.config.default_center,
            self.config.default_zoom
        );
    }

    /// Run one pass for the host's current record array.
    ///
    /// `records` replaces the held snapshot wholesale; `None` is treated as
    /// an empty array.  Returns `None` when `trigger` says nothing changed.
    pub fn recompute(
        &mut self,
        records: Option<Vec<BusRecord>>,
        trigger: UpdateTrigger,
    ) -> Option<PassReport> {
        if trigger == UpdateTrigger::Unchanged {
            return None;
        }
        self.records = records.unwrap_or_default();
        Some(self.run_pass())
    }

    /// Frame the current snapshot once.  The operator is free to pan away
    /// afterwards.
    pub fn fit_to_current(&mut self) -> Option<FitRequest> {
        self.mount();
        let fit = self.fitter.fit(&self.records, self.focus, &mut self.surface);
        if fit.is_some() && self.state != ViewState::FittedView {
            log::info!("fleet map framed live positions");
            self.state = ViewState::FittedView;
        }
        fit
    }

    /// Set or clear the focus location (e.g. a breakdown spot) and rerun
    /// the pass so bounds and distance labels reflect it.
    pub fn set_focus(&mut self, focus: Option<GeoPoint>) -> PassReport {
        self.focus = focus.filter(|p| p.is_finite());
        self.renderer.set_focus(self.focus);
        self.run_pass()
    }

    /// Swap in a new surface handle, mount it, and rerun the pass on it.
    /// Returns the previous surface.  A view that has framed live positions
    /// stays in [`ViewState::FittedView`] even if the current snapshot is
    /// empty.
    pub fn replace_surface(&mut self, surface: S) -> (S, PassReport) {
        let old = std::mem::replace(&mut self.surface, surface);
        let prior = self.state;
        self.state = ViewState::Uninitialized;
        self.mount();
        if prior == ViewState::FittedView {
            self.state = ViewState::FittedView;
        }
        let report = self.run_pass();
        (old, report)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn records(&self) -> &[BusRecord] {
        &self.records
    }

    pub fn focus(&self) -> Option<GeoPoint> {
        self.focus
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for host-driven interaction such as manual panning.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn run_pass(&mut self) -> PassReport {
        self.mount();
        let fit = self.fit_to_current();
        let mut markers = self.renderer.render(&self.records);
        let placed = markers.len();
        markers.extend(self.renderer.focus_marker());
        self.surface.set_markers(&markers);

        let report = PassReport {
            markers: placed,
            dropped: self.records.len() - placed,
            fit,
        };
        match &report.fit {
            Some(req) => log::debug!(
                "pass: {} markers, {} dropped, fit {}",
                report.markers,
                report.dropped,
                req.bounds
            ),
            None => log::debug!(
                "pass: {} markers, {} dropped, camera unchanged",
                report.markers,
                report.dropped
            ),
        }
        report
    }
}
