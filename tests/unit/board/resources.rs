use super::*;

fn icon(shade: u8) -> PreparedImage {
    PreparedImage::solid(4, 4, Rgba8::rgb(shade, shade, shade))
}

#[test]
fn icon_lookup_falls_back_line_product_default() {
    let mut res = Resources::default();
    let s8 = res.insert_icon("s8", icon(1));
    let bus = res.insert_icon("bus", icon(2));
    let default = res.insert_icon("default", icon(3));

    assert_eq!(res.icon_for("s8", "suburban"), Some(s8));
    assert_eq!(res.icon_for("m11", "bus"), Some(bus));
    assert_eq!(res.icon_for("x", "ferry"), Some(default));
    assert_eq!(res.images().len(), 3);
}

#[test]
fn icon_lookup_without_default_is_none() {
    let res = Resources::default();
    assert_eq!(res.icon_for("s8", "suburban"), None);
}

#[test]
fn posters_keep_insertion_order() {
    let mut res = Resources::default();
    let a = res.add_poster(icon(1));
    res.insert_icon("default", icon(9));
    let b = res.add_poster(icon(2));
    assert_eq!(res.posters(), &[a, b]);
}

#[test]
fn palette_defaults_and_json() {
    let p = Palette::default();
    assert_eq!(p.no_time, Rgba8::rgb(0xd2, 0x22, 0x22));
    let parsed: Palette = serde_json::from_str(r##"{"text": "#000000"}"##).unwrap();
    assert_eq!(parsed.text, Rgba8::BLACK);
    assert_eq!(parsed.error, p.error);
}

#[test]
fn dimensions_validate() {
    assert!(Dimensions::default().validate().is_ok());
    let bad = Dimensions {
        icon_width: -1.0,
        ..Dimensions::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn icon_dir_keys_by_file_stem() {
    let dir = std::env::temp_dir().join(format!("depboard-icons-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    image::RgbaImage::from_pixel(80, 80, image::Rgba([255, 255, 0, 255]))
        .save(dir.join("tram.png"))
        .unwrap();
    std::fs::write(dir.join("broken.png"), b"nope").unwrap();

    let mut res = Resources::default();
    assert_eq!(res.load_icon_dir(&dir).unwrap(), 1);
    let id = res.icon_for("m17", "tram").unwrap();
    assert_eq!(
        res.images().size(id),
        Some(crate::foundation::core::Size::new(40.0, 40.0))
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_font_file_is_reported() {
    let mut fonts = BTreeMap::new();
    fonts.insert(
        FontRole::Title,
        FontSpec {
            path: "missing.ttf".into(),
            size_px: 24.0,
        },
    );
    let err = register_fonts(&fonts, Path::new("/nowhere"), &mut TextEngine::new()).unwrap_err();
    assert!(err.to_string().contains("missing.ttf"));
}
