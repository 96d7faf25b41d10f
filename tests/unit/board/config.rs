use super::*;

fn minimal_json() -> String {
    r#"{
        "stations": [{
            "name": "Adlershof",
            "id": "900193002",
            "departure_rows": 4,
            "departure_cols": 2,
            "day": {"suburban": true, "tram": true},
            "night": {"bus": true},
            "night_start": "01:00:00",
            "night_stop": "04:30:00",
            "min_time": 2,
            "max_time": 60,
            "time_needed": 6
        }]
    }"#
    .to_string()
}

#[test]
fn defaults_fill_missing_sections() {
    let config = BoardConfig::from_json_str(&minimal_json()).unwrap();
    assert_eq!(config.canvas, Canvas { width: 1280, height: 1024 });
    assert_eq!(config.periods, Periods { stations: 5, posters: 18, clock: 5 });
    assert_eq!(config.columns, vec![2.0, 1.0]);
    assert_eq!(config.title_anchor, Anchor::West);
    assert_eq!(config.dims.direction_width, 250.0);
    assert_eq!(config.direction_filter, DirectionFilter::default());
    assert!(config.events.is_empty() && config.posters.is_empty());
    assert_eq!(config.stations[0].slots(), 8);
}

#[test]
fn json_round_trips_through_pretty_printer() {
    let config = BoardConfig::from_json_str(&minimal_json()).unwrap();
    let again = BoardConfig::from_json_str(&config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(config, again);
}

#[test]
fn unknown_anchor_is_rejected() {
    let json = minimal_json().replacen('{', r#"{"title_anchor": "top-left","#, 1);
    let err = BoardConfig::from_json_str(&json).unwrap_err();
    assert!(matches!(err, BoardError::Serde(_)));
    assert!(err.to_string().contains("invalid anchor"));
}

#[test]
fn validation_catches_bad_documents() {
    let base = BoardConfig::from_json_str(&minimal_json()).unwrap();

    let mut c = base.clone();
    c.stations.clear();
    assert!(matches!(c.validate(), Err(BoardError::Validation(_))));

    let mut c = base.clone();
    c.columns = vec![1.0];
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.columns = vec![0.0, 0.0];
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.columns = vec![3.0, -1.0];
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.periods.clock = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.canvas.height = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.padding.row = -1.0;
    assert!(c.validate().is_err());

    let mut c = base;
    c.fonts.insert(
        FontRole::Clock,
        FontSpec {
            path: "clock.ttf".into(),
            size_px: 0.0,
        },
    );
    assert!(c.validate().is_err());
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = BoardConfig::from_json_path(Path::new("/no/such/board.json")).unwrap_err();
    assert!(err.to_string().contains("board.json"));
}
