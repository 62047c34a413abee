//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::BusId;

    #[test]
    fn string_and_numeric_ids_agree() {
        let a: BusId = serde_json::from_str(r#""101""#).unwrap();
        let b: BusId = serde_json::from_str("101").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "101");
    }

    #[test]
    fn display_is_verbatim() {
        assert_eq!(BusId::new("TN-58 AX 1234").to_string(), "TN-58 AX 1234");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(12.957952, 80.160793);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude_is_about_111_km() {
        let a = GeoPoint::new(12.0, 80.0);
        let b = GeoPoint::new(13.0, 80.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.5, "got {d}");
    }

    #[test]
    fn range_checks() {
        assert!(GeoPoint::new(12.9, 80.1).in_range());
        assert!(!GeoPoint::new(91.0, 80.1).in_range());
        assert!(!GeoPoint::new(f64::NAN, 80.1).in_range());
        assert!(!GeoPoint::new(12.9, f64::INFINITY).is_finite());
    }
}

#[cfg(test)]
mod time {
    use chrono::{FixedOffset, Utc};

    use crate::{Timestamp, format_time_of_day};

    #[test]
    fn formats_twelve_hour_clock() {
        // 2023-11-14T22:13:20Z
        let ts = Timestamp(1_700_000_000);
        assert_eq!(format_time_of_day(ts, &Utc).as_deref(), Some("10:13:20 PM"));
    }

    #[test]
    fn respects_timezone_offset() {
        // IST is UTC+05:30 → 03:43:20 the next morning.
        let ist = FixedOffset::east_opt(5 * 3_600 + 30 * 60).unwrap();
        let ts = Timestamp(1_700_000_000);
        assert_eq!(format_time_of_day(ts, &ist).as_deref(), Some("3:43:20 AM"));
    }

    #[test]
    fn decodes_both_shapes() {
        let bare: Timestamp = serde_json::from_str("1700000000").unwrap();
        let object: Timestamp =
            serde_json::from_str(r#"{"seconds": 1700000000, "nanoseconds": 500}"#).unwrap();
        let underscored: Timestamp =
            serde_json::from_str(r#"{"_seconds": 1700000000, "_nanoseconds": 0}"#).unwrap();
        assert_eq!(bare, Timestamp(1_700_000_000));
        assert_eq!(object, bare);
        assert_eq!(underscored, bare);
    }

    #[test]
    fn display_is_utc_iso() {
        assert_eq!(Timestamp(0).to_string(), "1970-01-01T00:00:00Z");
    }
}

#[cfg(test)]
mod record {
    use serde_json::json;

    use crate::{BusId, BusRecord, RawLocation, Timestamp, parse_snapshot, records_from_value};

    #[test]
    fn flat_record_decodes() {
        let r: BusRecord = serde_json::from_value(json!({
            "id": "101", "lat": 12.9, "lng": 80.1, "speed": 34.6
        }))
        .unwrap();
        assert_eq!(r.id, BusId::new("101"));
        assert_eq!(r.lat, Some(12.9));
        assert_eq!(r.lng, Some(80.1));
        assert_eq!(r.speed, Some(34.6));
        assert!(r.location.is_none());
        assert!(r.last_updated.is_none());
    }

    #[test]
    fn nested_record_decodes() {
        let r: BusRecord = serde_json::from_value(json!({
            "id": "102", "location": {"lat": 13.0, "lng": 80.2},
            "lastUpdated": {"seconds": 1700000000}
        }))
        .unwrap();
        assert_eq!(r.location, Some(RawLocation { lat: Some(13.0), lng: Some(80.2) }));
        assert_eq!(r.last_updated, Some(Timestamp(1_700_000_000)));
    }

    #[test]
    fn wrong_types_read_as_absent() {
        let r: BusRecord = serde_json::from_value(json!({
            "id": true,
            "lat": "12.9",
            "lng": null,
            "speed": "fast",
            "location": "somewhere",
            "lastUpdated": "yesterday",
            "driverName": 7
        }))
        .unwrap();
        assert!(r.id.is_empty());
        assert_eq!(r.lat, None);
        assert_eq!(r.lng, None);
        assert_eq!(r.speed, None);
        assert_eq!(r.location, None);
        assert_eq!(r.last_updated, None);
        assert_eq!(r.driver_name, None);
    }

    #[test]
    fn zero_timestamp_is_absent() {
        let r: BusRecord =
            serde_json::from_value(json!({"id": "1", "lastUpdated": {"seconds": 0}})).unwrap();
        assert_eq!(r.last_updated, None);
    }

    #[test]
    fn unknown_fields_ignored() {
        let r: BusRecord = serde_json::from_value(json!({
            "id": "9", "lat": 1.5, "lng": 2.5, "passengerCount": 31, "route": "R9"
        }))
        .unwrap();
        assert_eq!(r, BusRecord::new("9").with_position(1.5, 2.5));
    }

    #[test]
    fn snapshot_null_is_empty() {
        assert!(parse_snapshot("null").unwrap().is_empty());
        assert!(parse_snapshot("[]").unwrap().is_empty());
    }

    #[test]
    fn snapshot_skips_non_objects() {
        let records = parse_snapshot(r#"[{"id":"1","lat":1.0,"lng":2.0}, 42, "x", null, {"id":"2"}]"#)
            .unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn snapshot_object_top_level_is_empty() {
        assert!(records_from_value(json!({"id": "1"})).is_empty());
    }

    #[test]
    fn snapshot_invalid_json_errors() {
        assert!(parse_snapshot("[{").is_err());
    }

    #[test]
    fn load_snapshot_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":"101","lat":12.9,"lng":80.1}}]"#).unwrap();
        let records = crate::load_snapshot(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "101");
    }

    #[test]
    fn load_snapshot_missing_file_is_io_error() {
        let err = crate::load_snapshot(std::path::Path::new("/nonexistent/fleet.json")).unwrap_err();
        assert!(matches!(err, crate::FleetError::Io(_)));
    }
}
