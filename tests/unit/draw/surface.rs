use super::*;

#[test]
fn ids_follow_creation_order() {
    let mut scene = Scene::new();
    let a = scene.create(Primitive::image(None, Anchor::Center));
    let b = scene.create(Primitive::text("x", FontRole::Title, Rgba8::WHITE, Anchor::West));
    assert_eq!((a, b), (PrimitiveId(0), PrimitiveId(1)));
    let order: Vec<_> = scene.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn move_and_configure_update_the_primitive() {
    let mut scene = Scene::new();
    let t = scene.create(Primitive::text("old", FontRole::Event, Rgba8::WHITE, Anchor::NorthWest));
    scene.move_to(t, Point::new(3.0, 4.0));
    scene.configure(t, Configure::Text("new".into()));
    scene.configure(t, Configure::Color(Rgba8::BLACK));

    let p = scene.get(t).unwrap();
    assert_eq!(p.at, Point::new(3.0, 4.0));
    assert_eq!(p.text_str(), Some("new"));
    assert_eq!(p.color(), Some(Rgba8::BLACK));
    assert_eq!(
        scene.stats(),
        SceneStats {
            creates: 1,
            moves: 1,
            configures: 2
        }
    );
}

#[test]
fn mismatched_configure_is_ignored() {
    let mut scene = Scene::new();
    let img = scene.create(Primitive::image(Some(ImageId(7)), Anchor::Center));
    scene.configure(img, Configure::Text("nope".into()));
    assert_eq!(scene.get(img).unwrap().image_id(), Some(ImageId(7)));
    assert_eq!(scene.stats().configures, 0);

    scene.configure(img, Configure::Image(None));
    assert_eq!(scene.get(img).unwrap().image_id(), None);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut scene = Scene::new();
    scene.move_to(PrimitiveId(9), Point::ORIGIN);
    scene.configure(PrimitiveId(9), Configure::Text(String::new()));
    assert!(scene.is_empty());
    assert_eq!(scene.stats(), SceneStats::default());
}
