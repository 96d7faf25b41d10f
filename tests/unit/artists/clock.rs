use super::*;

use crate::draw::{measure::FixedMeasure, surface::Scene};

fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn ticks_format_hours_and_minutes() {
    let mut scene = Scene::new();
    let mut measure = FixedMeasure::new(10.0, 20.0);
    let mut clock = ClockArtist::new(&mut scene, &mut measure, &Resources::default(), Anchor::North);
    assert_eq!(clock.cell().width(), 50.0);

    clock.tick(&mut scene, hms(7, 5, 0));
    assert_eq!(scene.get(clock.primitive()).unwrap().text_str(), Some("07:05"));
}

#[test]
fn same_minute_is_not_reconfigured() {
    let mut scene = Scene::new();
    let mut measure = FixedMeasure::new(10.0, 20.0);
    let mut clock = ClockArtist::new(&mut scene, &mut measure, &Resources::default(), Anchor::North);
    clock.tick(&mut scene, hms(23, 59, 1));
    clock.tick(&mut scene, hms(23, 59, 40));
    assert_eq!(scene.stats().configures, 1);
    clock.tick(&mut scene, hms(0, 0, 0));
    assert_eq!(scene.stats().configures, 2);
    assert_eq!(scene.get(clock.primitive()).unwrap().text_str(), Some("00:00"));
}
