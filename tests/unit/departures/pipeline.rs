use chrono::NaiveTime;
use serde_json::json;

use super::*;
use crate::departures::model::Products;

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap()
}

fn station() -> Station {
    Station {
        name: "Adlershof".to_string(),
        id: "900193002".to_string(),
        directions: vec![],
        departure_rows: 2,
        departure_cols: 2,
        day: Products::ALL,
        night: Products::ALL,
        night_start: NaiveTime::from_hms_opt(1, 0, 0).unwrap(),
        night_stop: NaiveTime::from_hms_opt(4, 0, 0).unwrap(),
        min_time: 2.0,
        max_time: 60.0,
        time_needed: 6.0,
    }
}

fn dep(id: &str, minutes: f64) -> Departure {
    Departure {
        id: Some(id.to_string()),
        line: "s8".to_string(),
        direction: "Zeuthen".to_string(),
        minutes_until_departure: minutes,
        delay: None,
        product: "suburban".to_string(),
        reachable: true,
    }
}

fn ids(departures: &[Departure]) -> Vec<&str> {
    departures
        .iter()
        .map(|d| d.id.as_deref().unwrap_or("-"))
        .collect()
}

#[test]
fn merge_dedup_sort_keeps_first_and_stable_order() {
    let out = order_departures(vec![
        vec![dep("A", 5.0), dep("B", 3.0)],
        vec![dep("A", 5.0), dep("C", 3.0)],
    ]);
    assert_eq!(ids(&out), vec!["B", "C", "A"]);
    let minutes: Vec<f64> = out.iter().map(|d| d.minutes_until_departure).collect();
    assert_eq!(minutes, vec![3.0, 3.0, 5.0]);
}

#[test]
fn dedup_uses_identity_not_time() {
    let mut first = dep("A", 5.0);
    first.direction = "first".to_string();
    let out = dedup_by_id(vec![first, dep("B", 5.0), dep("A", 9.0)]);
    assert_eq!(ids(&out), vec!["A", "B"]);
    assert_eq!(out[0].direction, "first");
}

#[test]
fn departures_without_id_are_never_merged() {
    let mut a = dep("x", 4.0);
    a.id = None;
    let out = order_departures(vec![vec![a.clone()], vec![a]]);
    assert_eq!(out.len(), 2);
}

#[test]
fn sort_is_stable_for_equal_minutes() {
    let mut list = vec![dep("late", 7.0), dep("one", 2.5), dep("two", 2.5)];
    sort_by_time(&mut list);
    assert_eq!(ids(&list), vec!["one", "two", "late"]);
}

#[test]
fn fill_slots_pads_and_truncates() {
    let padded = fill_slots(vec![dep("A", 1.0)], 3);
    assert_eq!(padded.len(), 3);
    assert!(padded[0].is_some());
    assert!(padded[1].is_none() && padded[2].is_none());

    let cut = fill_slots(vec![dep("A", 1.0), dep("B", 2.0), dep("C", 3.0)], 2);
    assert_eq!(cut.len(), 2);
    assert_eq!(cut[1].as_ref().and_then(|d| d.id.as_deref()), Some("B"));

    assert!(fill_slots(vec![], 0).is_empty());
}

#[test]
fn minutes_until_parses_offsets_and_naive_times() {
    assert_eq!(minutes_until("2024-05-01T12:05:30+02:00", now()), Some(5.5));
    assert_eq!(minutes_until("2024-05-01T10:10:00Z", now()), Some(10.0));
    assert_eq!(minutes_until("2024-05-01T12:03:00", now()), Some(3.0));
    assert_eq!(minutes_until("soon", now()), None);
}

#[test]
fn convert_applies_window_and_reachability() {
    let records = vec![
        json!({"tripId": "too-soon", "when": "2024-05-01T12:01:00+02:00", "line": {"id": "s8"}}),
        json!({"tripId": "close", "when": "2024-05-01T12:04:00+02:00", "line": {"id": "s8"}}),
        json!({"tripId": "later", "when": "2024-05-01T12:20:00+02:00", "line": {"id": "s8"}}),
        json!({"tripId": "too-late", "when": "2024-05-01T14:00:00+02:00", "line": {"id": "s8"}}),
        json!({"tripId": "cancelled", "when": null, "line": {"id": "s8"}}),
        json!({"tripId": "garbled", "when": "not a time"}),
        json!("not a record"),
    ];
    let out = convert_records(&records, &station(), now(), &DirectionFilter::default());
    assert_eq!(ids(&out), vec!["close", "later"]);
    assert!(!out[0].reachable);
    assert!(out[1].reachable);
}

#[test]
fn convert_maps_fields() {
    let record = json!({
        "tripId": "1|77",
        "when": "2024-05-01T12:10:00+02:00",
        "delay": 60.0,
        "direction": "S Schöneweide Bhf  (Berlin)",
        "line": {"id": "s9", "name": "S9", "product": "suburban"}
    });
    let d = convert_record(&record, &station(), now(), &DirectionFilter::default()).unwrap();
    assert_eq!(d.id.as_deref(), Some("1|77"));
    assert_eq!(d.line, "s9");
    assert_eq!(d.product, "suburban");
    assert_eq!(d.direction, "S Schöneweide");
    assert_eq!(d.delay, Some(60.0));
    assert_eq!(d.minutes_until_departure, 10.0);
}

#[test]
fn direction_filter_rewrites_in_order() {
    let filter = DirectionFilter::default();
    assert_eq!(filter.apply("Schienenersatzverkehr Grünau"), "SEV Grünau");
    assert_eq!(filter.apply("Ersatzverkehr -> Falkenberg"), "EV -> Falkenberg");
    assert_eq!(filter.apply("Flughafen BER Terminal 5"), "BER Terminal 5");
    assert_eq!(filter.apply("  U Hermannstr.  "), "U Hermannstr.");

    let custom = DirectionFilter::new(vec![("a".to_string(), "b".to_string()), ("b".to_string(), "c".to_string())]);
    assert_eq!(custom.apply("a"), "c");
}

#[test]
fn direction_filter_reads_pairs_from_json() {
    let filter: DirectionFilter = serde_json::from_value(json!([["Bhf", ""], ["S+U", "S"]])).unwrap();
    assert_eq!(filter.pairs().len(), 2);
    assert_eq!(filter.apply("S+U Pankow Bhf"), "S Pankow");
}

#[test]
fn station_departures_merges_all_directions() {
    use crate::departures::source::StaticSource;

    let mut s = station();
    s.directions = vec!["north".to_string(), "south".to_string()];
    let mut source = StaticSource::new()
        .with_feed(
            "900193002",
            Some("north"),
            vec![
                json!({"tripId": "A", "when": "2024-05-01T12:05:00+02:00"}),
                json!({"tripId": "B", "when": "2024-05-01T12:03:00+02:00"}),
            ],
        )
        .with_feed(
            "900193002",
            Some("south"),
            vec![
                json!({"tripId": "A", "when": "2024-05-01T12:05:00+02:00"}),
                json!({"tripId": "C", "when": "2024-05-01T12:03:00+02:00"}),
            ],
        );
    let out = station_departures(&s, &mut source, now(), &DirectionFilter::default()).unwrap();
    assert_eq!(ids(&out), vec!["B", "C", "A"]);
}

#[test]
fn station_departures_survives_one_failing_direction() {
    use crate::departures::source::StaticSource;

    let mut s = station();
    s.directions = vec!["north".to_string(), "south".to_string()];
    let mut source = StaticSource::new().with_feed(
        "900193002",
        Some("south"),
        vec![json!({"tripId": "C", "when": "2024-05-01T12:03:00+02:00"})],
    );
    let out = station_departures(&s, &mut source, now(), &DirectionFilter::default()).unwrap();
    assert_eq!(ids(&out), vec!["C"]);

    let mut empty = StaticSource::new();
    assert_eq!(
        station_departures(&s, &mut empty, now(), &DirectionFilter::default()),
        None
    );
}

#[test]
fn departed_records_do_not_use_up_the_result_limit() {
    use crate::departures::source::StaticSource;

    let mut s = station();
    s.departure_rows = 2;
    s.departure_cols = 2;
    let mut records: Vec<_> = (0..5)
        .map(|i| json!({"tripId": format!("gone{i}"), "when": "2024-05-01T11:50:00+02:00"}))
        .collect();
    records.push(json!({"tripId": "fresh", "when": "2024-05-01T12:10:00+02:00"}));
    let mut source = StaticSource::new().with_feed("900193002", None, records);

    let out = station_departures(&s, &mut source, now(), &DirectionFilter::default()).unwrap();
    assert_eq!(ids(&out), vec!["fresh"]);
}

#[test]
fn result_limit_counts_departures_inside_the_window() {
    use crate::departures::source::StaticSource;

    let mut s = station();
    s.departure_rows = 1;
    s.departure_cols = 2;
    let records = vec![
        json!({"tripId": "soon", "when": "2024-05-01T12:01:00+02:00"}),
        json!({"tripId": "A", "when": "2024-05-01T12:05:00+02:00"}),
        json!({"tripId": "B", "when": "2024-05-01T12:07:00+02:00"}),
        json!({"tripId": "C", "when": "2024-05-01T12:09:00+02:00"}),
    ];
    let mut source = StaticSource::new().with_feed("900193002", None, records);

    let out = station_departures(&s, &mut source, now(), &DirectionFilter::default()).unwrap();
    assert_eq!(ids(&out), vec!["A", "B"]);
}
