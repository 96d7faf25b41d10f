use super::*;

#[test]
fn narrow_text_is_unchanged() {
    let mut m = FixedMeasure::new(10.0, 12.0);
    assert_eq!(
        truncate_to_width(&mut m, "Pankow", FontRole::Departure, 61.0, "..."),
        "Pankow"
    );
}

#[test]
fn wide_text_keeps_longest_fitting_prefix() {
    let mut m = FixedMeasure::new(10.0, 12.0);
    // marker 30 + 4 chars = 70 < 75, a fifth char would reach 80
    let out = truncate_to_width(&mut m, "Gesundbrunnen", FontRole::Departure, 75.0, "...");
    assert_eq!(out, "Gesu...");
    assert!(m.text_width(&out, FontRole::Departure) < 75.0);
}

#[test]
fn exact_fit_is_still_truncated() {
    let mut m = FixedMeasure::new(10.0, 12.0);
    let out = truncate_to_width(&mut m, "abcdef", FontRole::Departure, 60.0, "..");
    assert_eq!(out, "abc..");
}

#[test]
fn marker_alone_when_nothing_fits() {
    let mut m = FixedMeasure::new(10.0, 12.0);
    assert_eq!(
        truncate_to_width(&mut m, "Schöneweide", FontRole::Departure, 35.0, "..."),
        "..."
    );
}

#[test]
fn multibyte_characters_are_kept_whole() {
    let mut m = FixedMeasure::new(10.0, 12.0);
    let out = truncate_to_width(&mut m, "Grünau Süd", FontRole::Departure, 65.0, "...");
    assert_eq!(out, "Grü...");
}

#[test]
fn line_and_text_heights_scale_font_height() {
    let mut m = FixedMeasure::new(8.0, 10.0).with_role(FontRole::Title, 16.0, 20.0);
    assert_eq!(m.line_height(FontRole::Event), 13.0);
    assert_eq!(m.line_height(FontRole::Title), 26.0);
    assert_eq!(m.text_height("one", FontRole::Event), 13.0);
    assert!((m.text_height("one\ntwo", FontRole::Event) - 23.0).abs() < 1e-9);
    assert_eq!(m.text_height("", FontRole::Event), 13.0);
    assert_eq!(m.text_width("ab\nabcd", FontRole::Title), 64.0);
}
