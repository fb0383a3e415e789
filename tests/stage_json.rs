use scrollstage::{Evaluator, ScrollFraction, Stage};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/minimal_stage.json");
    let stage: Stage = serde_json::from_str(s).unwrap();
    stage.validate().unwrap();
}

#[test]
fn omitted_props_fall_back_to_static_defaults() {
    let s = include_str!("data/minimal_stage.json");
    let stage: Stage = serde_json::from_str(s).unwrap();

    // "opener" declares only opacity; everything else must be inert.
    let frame = Evaluator::eval(&stage, ScrollFraction::new(0.2)).unwrap();
    let opener = &frame.panels[0];
    assert_eq!(opener.transform.scale, 1.0);
    assert_eq!(opener.transform.rotation_deg, 0.0);
    assert_eq!(opener.transform.translate.x, 0.0);
    assert_eq!(opener.blur_px, 0.0);
}

#[test]
fn fixture_crossfade_evaluates() {
    let s = include_str!("data/minimal_stage.json");
    let stage: Stage = serde_json::from_str(s).unwrap();

    let frame = Evaluator::eval(&stage, ScrollFraction::new(0.5)).unwrap();
    assert!((frame.panels[0].opacity - 0.5).abs() < 1e-9);
    assert!((frame.panels[1].opacity - 0.5).abs() < 1e-9);
    let expected_y = 48.0 * (1.0 - scrollstage::Ease::OutQuad.apply(0.5));
    assert!((frame.panels[1].transform.translate.y - expected_y).abs() < 1e-9);
}

#[test]
fn stage_round_trips_through_json() {
    let stage = scrollstage::deck::canonical().unwrap();
    let json = serde_json::to_string(&stage).unwrap();
    let back: Stage = serde_json::from_str(&json).unwrap();
    back.validate().unwrap();

    let f = ScrollFraction::new(0.275);
    let a = Evaluator::eval(&stage, f).unwrap();
    let b = Evaluator::eval(&back, f).unwrap();
    for (x, y) in a.panels.iter().zip(&b.panels) {
        assert_eq!(x.opacity, y.opacity);
    }
}
