//! Marker derivation: one glyph plus popup summary per resolvable record.
//!
//! Missing optional fields never fail a record: speed defaults to `0 km/h`
//! and a missing timestamp reads "Just now".  Records without a usable
//! position get no marker and no placeholder.
//!
//! With a focus location set (a breakdown spot), popups switch to the
//! breakdown layout: the driver line always appears, distance from the
//! focus is shown, and a driver phone becomes a `tel:` call link.  The focus
//! itself is drawn with [`MarkerGlyph::Breakdown`].

use std::fmt;

use chrono::{Local, TimeZone};

use fleet_core::{BusId, BusRecord, GeoPoint, JUST_NOW, format_time_of_day};

use crate::normalize::Normalizer;

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Visual glyph drawn for a marker.  Every bus uses the same one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerGlyph {
    #[default]
    Bus,
    /// The focus location.
    Breakdown,
}

impl MarkerGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            MarkerGlyph::Bus       => "🚌",
            MarkerGlyph::Breakdown => "🆘",
        }
    }

    /// Icon box, pixels.
    pub fn size_px(self) -> (u32, u32) {
        match self {
            MarkerGlyph::Bus       => (30, 30),
            MarkerGlyph::Breakdown => (35, 35),
        }
    }

    /// Pixel offset of the anchor point from the icon's top-left corner.
    pub fn anchor_px(self) -> (u32, u32) {
        match self {
            MarkerGlyph::Bus       => (15, 15),
            MarkerGlyph::Breakdown => (17, 17),
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MarkerGlyph::Bus       => "custom-bus-icon",
            MarkerGlyph::Breakdown => "custom-my-bus-icon",
        }
    }
}

/// Surface key of the focus marker.
pub const FOCUS_MARKER_ID: &str = "breakdown-location";

pub const FOCUS_POPUP_TITLE: &str = "Your Breakdown Location";

/// Driver line when a breakdown popup has no name to show.
pub const UNKNOWN_DRIVER: &str = "Unknown";

// ── Popup ────────────────────────────────────────────────────────────────────

/// Text shown when the operator interacts with a marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupSummary {
    /// The bus id, verbatim.
    pub title:          String,
    /// e.g. `"35 km/h"`.
    pub speed_label:    String,
    /// Local time of the last fix, or `"Just now"`.
    pub time_label:     String,
    pub driver_label:   Option<String>,
    /// Distance from the view's focus location, when one is set.
    pub distance_label: Option<String>,
    /// `tel:` link for the driver, breakdown popups only.
    pub call_link:      Option<String>,
}

impl PopupSummary {
    /// Popup of the focus marker: a title and nothing else.
    pub fn focus() -> Self {
        Self {
            title:          FOCUS_POPUP_TITLE.to_owned(),
            speed_label:    String::new(),
            time_label:     String::new(),
            driver_label:   None,
            distance_label: None,
            call_link:      None,
        }
    }

    /// Non-empty lines in display order.
    pub fn lines(&self) -> Vec<&str> {
        let mut out = vec![self.title.as_str()];
        out.extend(self.driver_label.as_deref());
        out.push(&self.speed_label);
        out.extend(self.distance_label.as_deref());
        out.extend(self.call_link.as_deref());
        out.push(&self.time_label);
        out.retain(|l| !l.is_empty());
        out
    }
}

impl fmt::Display for PopupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join(" | "))
    }
}

// ── Marker ───────────────────────────────────────────────────────────────────

/// A rendered bus.  `id` is the stable key a view layer diffs on.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id:       BusId,
    pub position: GeoPoint,
    pub glyph:    MarkerGlyph,
    pub popup:    PopupSummary,
}

// ── Labels ───────────────────────────────────────────────────────────────────

/// Speed rounded half-up to whole km/h; absent, zero or non-finite ⇒ `0`.
pub fn speed_label(speed: Option<f64>) -> String {
    let kmh = speed
        .filter(|s| s.is_finite())
        .map(|s| (s + 0.5).floor() as i64)
        .unwrap_or(0);
    format!("{kmh} km/h")
}

pub fn distance_label(from: GeoPoint, to: GeoPoint) -> String {
    format!("{:.1} km away", from.distance_km(to))
}

/// `tel:` link for a trimmed, non-empty phone number.
pub fn call_link(phone: Option<&str>) -> Option<String> {
    phone.map(str::trim).filter(|p| !p.is_empty()).map(|p| format!("tel:{p}"))
}

// ── MarkerRenderer ───────────────────────────────────────────────────────────

/// Turns records into markers.  Timestamps are shown in `Tz`, which is the
/// host's local zone unless a renderer is built with
/// [`with_timezone`](MarkerRenderer::with_timezone).
#[derive(Clone, Debug)]
pub struct MarkerRenderer<Tz = Local> {
    normalizer: Normalizer,
    tz:         Tz,
    focus:      Option<GeoPoint>,
}

impl MarkerRenderer<Local> {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer, tz: Local, focus: None }
    }
}

impl Default for MarkerRenderer<Local> {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl<Tz> MarkerRenderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(normalizer: Normalizer, tz: Tz) -> Self {
        Self { normalizer, tz, focus: None }
    }

    /// Measure each marker's distance from `focus` (e.g. a breakdown spot).
    pub fn set_focus(&mut self, focus: Option<GeoPoint>) {
        self.focus = focus.filter(|p| p.is_finite());
    }

    pub fn focus(&self) -> Option<GeoPoint> {
        self.focus
    }

    /// The breakdown marker at the focus location, if one is set.
    pub fn focus_marker(&self) -> Option<Marker> {
        self.focus.map(|position| Marker {
            id:       BusId::from(FOCUS_MARKER_ID),
            position,
            glyph:    MarkerGlyph::Breakdown,
            popup:    PopupSummary::focus(),
        })
    }

    /// One marker per record with a usable position, in input order.  The
    /// focus marker is not included; see [`focus_marker`](Self::focus_marker).
    pub fn render(&self, records: &[BusRecord]) -> Vec<Marker> {
        records
            .iter()
            .filter_map(|r| self.normalizer.resolve(r).map(|p| self.marker(r, p)))
            .collect()
    }

    /// Build the marker for a record already resolved to `position`.
    pub fn marker(&self, record: &BusRecord, position: GeoPoint) -> Marker {
        Marker {
            id:       record.id.clone(),
            position,
            glyph:    MarkerGlyph::Bus,
            popup:    self.summarize(record, position),
        }
    }

    pub fn summarize(&self, record: &BusRecord, position: GeoPoint) -> PopupSummary {
        let time_label = record
            .last_updated
            .and_then(|ts| format_time_of_day(ts, &self.tz))
            .unwrap_or_else(|| JUST_NOW.to_owned());
        let name = record.driver_name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let breakdown = self.focus.is_some();

        PopupSummary {
            title:          record.id.to_string(),
            speed_label:    speed_label(record.speed),
            time_label,
            driver_label:   match (name, breakdown) {
                (Some(n), _) => Some(format!("Driver: {n}")),
                (None, true) => Some(format!("Driver: {UNKNOWN_DRIVER}")),
                (None, false) => None,
            },
            distance_label: self.focus.map(|f| distance_label(f, position)),
            call_link:      if breakdown { call_link(record.phone.as_deref()) } else { None },
        }
    }
}
