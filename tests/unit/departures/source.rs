use serde_json::json;

use super::*;
use crate::departures::model::Products;

fn query(direction: Option<&str>) -> DepartureQuery {
    DepartureQuery {
        station_id: "900193002".to_string(),
        direction: direction.map(str::to_string),
        products: Products {
            suburban: true,
            ..Products::default()
        },
        min_time: 0.0,
        max_time: 60.0,
        results: 10,
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("depboard-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn static_source_filters_products() {
    let mut source = StaticSource::new().with_feed(
        "900193002",
        None,
        vec![
            json!({"tripId": "s", "line": {"product": "suburban"}}),
            json!({"tripId": "b", "line": {"product": "bus"}}),
            json!({"tripId": "unknown"}),
        ],
    );
    let records = source.fetch(&query(None)).unwrap();
    let trips: Vec<_> = records.iter().map(|r| r["tripId"].as_str().unwrap()).collect();
    assert_eq!(trips, vec!["s", "unknown"]);
}

#[test]
fn static_source_returns_every_admitted_record() {
    let mut source = StaticSource::new().with_feed(
        "900193002",
        Some("north"),
        (0..5).map(|i| json!({"tripId": i.to_string()})).collect(),
    );
    let mut q = query(Some("north"));
    q.results = 3;
    assert_eq!(source.fetch(&q).unwrap().len(), 5);
}

#[test]
fn top_level_product_is_used_without_line_product() {
    let mut source = StaticSource::new().with_feed(
        "900193002",
        None,
        vec![
            json!({"tripId": "s", "product": "suburban", "line": {"name": "S8"}}),
            json!({"tripId": "b", "product": "bus"}),
            json!({"tripId": "line-wins", "product": "bus", "line": {"product": "suburban"}}),
        ],
    );
    let records = source.fetch(&query(None)).unwrap();
    let trips: Vec<_> = records.iter().map(|r| r["tripId"].as_str().unwrap()).collect();
    assert_eq!(trips, vec!["s", "line-wins"]);
}

#[test]
fn static_source_missing_feed_is_source_error() {
    let mut source = StaticSource::new();
    assert!(matches!(
        source.fetch(&query(Some("south"))),
        Err(BoardError::Source(_))
    ));
}

#[test]
fn closures_are_sources() {
    let mut calls = 0;
    let mut source = |q: &DepartureQuery| -> BoardResult<Vec<serde_json::Value>> {
        calls += 1;
        Ok(vec![json!({"tripId": q.station_id.clone()})])
    };
    let records = source.fetch(&query(None)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(calls, 1);
}

#[test]
fn feed_dir_reads_both_layouts() {
    let dir = temp_dir("feeds");
    std::fs::write(
        dir.join("900193002.json"),
        r#"[{"tripId": "a"}, {"tripId": "b"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("900193002_north.json"),
        r#"{"departures": [{"tripId": "c"}], "realtimeDataUpdatedAt": 0}"#,
    )
    .unwrap();
    std::fs::write(dir.join("900193002_south.json"), r#"{"other": 1}"#).unwrap();

    let mut source = FeedDirSource::new(&dir);
    assert_eq!(source.fetch(&query(None)).unwrap().len(), 2);
    assert_eq!(source.fetch(&query(Some("north"))).unwrap().len(), 1);
    assert!(matches!(
        source.fetch(&query(Some("south"))),
        Err(BoardError::Source(_))
    ));
    let missing = source.fetch(&query(Some("west"))).unwrap_err();
    assert!(missing.to_string().contains("900193002_west.json"));

    std::fs::remove_dir_all(&dir).unwrap();
}
