//! fleet-snapshot: replay bus position snapshots through a fleet map view.
//!
//! Each snapshot is fed to a `FleetMapView` backed by an in-memory surface,
//! exactly as a dispatcher page would on every push from the data source.
//! After each pass the camera and marker table are printed.
//!
//! Usage:
//!
//! ```text
//! fleet-snapshot [SNAPSHOTS.json] [CONFIG.json]
//! ```
//!
//! `SNAPSHOTS.json` is either one snapshot (an array of bus records) or an
//! array of snapshots.  Without it a built-in sequence is replayed.  Set
//! `RUST_LOG=debug` to see per-pass logging.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use fleet_core::{BusRecord, GeoPoint, records_from_value};
use fleet_map::{
    FleetMapView, MapSurface, MapViewBuilder, MapViewConfig, RecordingSurface, UpdateTrigger,
};

// ── Built-in replay ───────────────────────────────────────────────────────────

// Four pushes from the data source: nothing yet, a mixed-shape fleet with one
// bus lacking a fix, the same fleet a minute later, and an empty push.
const DEMO_SNAPSHOTS: &str = r#"[
  [],
  [
    {"id": "101", "lat": 12.9716, "lng": 80.1495, "speed": 34.6,
     "lastUpdated": {"seconds": 1700000000}, "driverName": "KARMEGAM"},
    {"id": "103", "location": {"lat": 12.9249, "lng": 80.1000}, "speed": 12.2},
    {"id": "104", "lat": 0, "lng": 80.2},
    {"id": "105", "location": {"lat": 13.0012, "lng": 80.2565}}
  ],
  [
    {"id": "101", "lat": 12.9788, "lng": 80.1601, "speed": 41.1,
     "lastUpdated": 1700000060, "driverName": "KARMEGAM", "phone": "9840012345"},
    {"id": "103", "lat": 12.9301, "location": {"lng": 80.1102}, "speed": 9.5},
    {"id": "104", "lat": 12.9500, "lng": 80.2000},
    {"id": "105", "location": {"lat": 13.0040, "lng": 80.2500}}
  ],
  null
]"#;

// Where the breakdown-assistance pass is centred.
const BREAKDOWN_SPOT: GeoPoint = GeoPoint { lat: 12.9400, lng: 80.1800 };

// ── Input loading ─────────────────────────────────────────────────────────────

/// A top-level array of arrays (or nulls) is a sequence; anything else is one
/// snapshot.
fn split_snapshots(value: Value) -> Vec<Vec<BusRecord>> {
    match value {
        Value::Array(items)
            if !items.is_empty() && items.iter().all(|v| v.is_array() || v.is_null()) =>
        {
            items.into_iter().map(records_from_value).collect()
        }
        other => vec![records_from_value(other)],
    }
}

fn load_snapshots(path: Option<&str>) -> Result<Vec<Vec<BusRecord>>> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?,
        None => DEMO_SNAPSHOTS.to_owned(),
    };
    let value: Value = serde_json::from_str(&text).context("parsing snapshots")?;
    Ok(split_snapshots(value))
}

fn load_config(path: Option<&str>) -> Result<MapViewConfig> {
    match path {
        Some(p) => MapViewConfig::from_path(Path::new(p)).with_context(|| format!("loading {p}")),
        None => Ok(MapViewConfig::default()),
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_view(view: &FleetMapView<RecordingSurface>) {
    let surface = view.surface();
    match surface.camera() {
        Some(cam) => println!("  camera : {cam}  [{:?}]", view.state()),
        None => println!("  camera : (none)  [{:?}]", view.state()),
    }
    if surface.markers().is_empty() {
        println!("  (no markers)");
        return;
    }
    println!("     {:<20} {:<24} popup", "marker", "position");
    for m in surface.markers() {
        println!(
            "  {}  {:<20} {:<24} {}",
            m.glyph.symbol(),
            m.id.as_str(),
            m.position.to_string(),
            m.popup
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let snapshots = load_snapshots(args.first().map(String::as_str))?;
    let config = load_config(args.get(1).map(String::as_str))?;

    println!("=== fleet-snapshot ===");
    println!(
        "Default view: {} z{}  |  padding {}×{} px  |  {} snapshot(s)",
        config.default_center,
        config.default_zoom,
        config.fit_padding.x,
        config.fit_padding.y,
        snapshots.len()
    );
    println!();

    let surface = RecordingSurface::new(config.viewport_px);
    let mut view = MapViewBuilder::new(config, surface).build()?;

    for (i, records) in snapshots.into_iter().enumerate() {
        let report = view
            .recompute(Some(records), UpdateTrigger::RecordsReplaced)
            .context("pass skipped")?;
        println!(
            "Pass {}: {} marker(s), {} dropped, {}",
            i + 1,
            report.markers,
            report.dropped,
            if report.fit.is_some() { "camera fitted" } else { "camera unchanged" }
        );
        print_view(&view);
        println!();
    }

    log::info!("breakdown spot at {BREAKDOWN_SPOT}");
    let report = view.set_focus(Some(BREAKDOWN_SPOT));
    println!("Breakdown assist from {BREAKDOWN_SPOT}: {} marker(s)", report.markers);
    print_view(&view);

    println!();
    println!("Total camera fits issued: {}", view.surface().fits().len());
    Ok(())
}
