use super::*;

#[test]
fn register_rejects_bad_size() {
    let mut engine = TextEngine::new();
    let err = engine
        .register(FontRole::Title, vec![0u8; 16], 0.0)
        .unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    assert!(!engine.has_role(FontRole::Title));
}

#[test]
fn register_rejects_non_font_bytes() {
    let mut engine = TextEngine::new();
    assert!(
        engine
            .register(FontRole::Clock, b"definitely not a font".to_vec(), 14.0)
            .is_err()
    );
    assert_eq!(engine.family(FontRole::Clock), None);
    assert!(engine.font_bytes(FontRole::Clock).is_none());
}

#[test]
fn layout_without_font_is_a_render_error() {
    let mut engine = TextEngine::new();
    assert!(matches!(
        engine.layout("12:00", FontRole::Clock, Rgba8::WHITE),
        Err(BoardError::Render(_))
    ));
}

#[test]
fn measuring_without_font_yields_zero() {
    let mut engine = TextEngine::new();
    assert_eq!(engine.text_width("Adlershof", FontRole::Title), 0.0);
    assert_eq!(engine.font_height(FontRole::Title), 0.0);
    assert_eq!(engine.line_height(FontRole::Title), 0.0);
}
