use scrollstage::{Evaluator, ScrollFraction, deck};

#[test]
fn coverage_holds_across_the_whole_scroll_range() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let stage = deck::canonical().unwrap();

    for step in 0..=1000u32 {
        let fraction = ScrollFraction::new(f64::from(step) / 1000.0);
        let frame = Evaluator::eval(&stage, fraction).unwrap();

        let sum: f64 = frame.panels.iter().map(|p| p.opacity).sum();
        assert!(
            sum >= 1.0 - 1e-9,
            "opacity sum {sum} below 1 at fraction {}",
            fraction.get()
        );

        let visible = frame.panels.iter().filter(|p| p.opacity > 0.0).count();
        assert!(
            visible <= 2,
            "{visible} panels visible at fraction {}",
            fraction.get()
        );
    }
}

#[test]
fn opacity_is_continuous_at_every_breakpoint() {
    let stage = deck::canonical().unwrap();

    for panel in &stage.panels {
        for key in &panel.props.opacity.keys {
            let sampled = panel.props.opacity.sample(key.at).unwrap();
            assert!(
                (sampled - key.value).abs() < 1e-12,
                "panel '{}' discontinuous at {}: {} vs {}",
                panel.id,
                key.at.get(),
                sampled,
                key.value
            );
        }
    }
}

#[test]
fn cta_band_matches_the_reference_points() {
    let stage = deck::canonical().unwrap();
    for (f, visible) in [(0.10, false), (0.50, true), (0.95, false)] {
        let frame = Evaluator::eval(&stage, ScrollFraction::new(f)).unwrap();
        assert_eq!(frame.cta_visible, visible, "cta at fraction {f}");
    }
}

#[test]
fn parameters_stay_inside_their_keyframe_ranges() {
    let stage = deck::canonical().unwrap();

    for step in 0..=500u32 {
        let fraction = ScrollFraction::new(f64::from(step) / 500.0);
        let frame = Evaluator::eval(&stage, fraction).unwrap();
        for (panel, source) in frame.panels.iter().zip(&stage.panels) {
            assert!((0.0..=1.0).contains(&panel.opacity));
            assert!(panel.blur_px >= 0.0);

            let scales: Vec<f64> = source.props.scale.keys.iter().map(|k| k.value).collect();
            let lo = scales.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = scales.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(
                panel.transform.scale >= lo - 1e-12 && panel.transform.scale <= hi + 1e-12,
                "panel '{}' scale {} overshoots [{lo}, {hi}]",
                panel.id,
                panel.transform.scale
            );
        }
    }
}
