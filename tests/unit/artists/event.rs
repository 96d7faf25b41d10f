use super::*;

use crate::{
    draw::{measure::FixedMeasure, surface::Scene},
    layout::cascade::{EditGeometry, Resize},
};

fn event(desc: &str) -> Event {
    Event {
        date: "24.12.".to_string(),
        desc: desc.to_string(),
    }
}

#[test]
fn height_is_tallest_column() {
    let mut scene = Scene::new();
    let mut measure = FixedMeasure::new(10.0, 20.0);
    let res = Resources::default();

    let single = EventArtist::new(&mut scene, &mut measure, &res, &event("Party"), Anchor::NorthWest);
    assert_eq!(single.cell().width(), 60.0 + 50.0);
    assert!((single.cell().height() - 26.0).abs() < 1e-9);

    let double = EventArtist::new(
        &mut scene,
        &mut measure,
        &res,
        &event("Lecture\nRoom 1.101"),
        Anchor::NorthWest,
    );
    assert!((double.cell().height() - 46.0).abs() < 1e-9);
    assert_eq!(double.cell().width(), 60.0 + 100.0);
}

#[test]
fn description_follows_date_column() {
    let mut scene = Scene::new();
    let mut measure = FixedMeasure::new(10.0, 20.0);
    let mut artist = EventArtist::new(
        &mut scene,
        &mut measure,
        &Resources::default(),
        &event("Party"),
        Anchor::West,
    );
    Resize::new(&mut artist, &mut scene).set_corner(Anchor::NorthWest, Point::new(5.0, 7.0));
    assert_eq!(scene.get(artist.date()).unwrap().at, Point::new(5.0, 7.0));
    assert_eq!(scene.get(artist.desc()).unwrap().at, Point::new(65.0, 7.0));
}

#[test]
fn events_read_from_json() {
    let e: Event = serde_json::from_str(r#"{"date": "01.05.", "desc": "Holiday"}"#).unwrap();
    assert_eq!(e, Event { date: "01.05.".to_string(), desc: "Holiday".to_string() });
}
