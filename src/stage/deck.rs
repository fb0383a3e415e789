use crate::{
    animation::ease::Ease,
    animation::ops::{fade_in_hold, fade_window, hold_fade_out, reversed, shift},
    animation::track::Track,
    foundation::core::Vec2,
    foundation::error::StageResult,
    preload::manifest::AssetManifest,
    stage::builder::{PanelBuilder, StageBuilder},
    timeline::model::{Stage, VisibilityBand},
};

/// The canonical four-panel deck: hero, two product panels, closing
/// call-to-action.
///
/// Crossfades are centered at 0.275, 0.525 and 0.775 with 0.10-wide
/// opacity ramps and a 0.05 lead-in, so that across the whole scroll
/// range the panel opacities sum to at least 1 and no more than two
/// panels are visible at once. At fraction 0 only the hero is visible;
/// at fraction 1 only the finale.
pub fn canonical() -> StageResult<Stage> {
    let haircut_opacity = fade_window(0.20, 0.30, 0.50, 0.60);
    // The beard panel runs the haircut window mirrored through the deck
    // midpoint, nudged late so its ramps land on 0.45..0.85.
    let beard_opacity = shift(&reversed(&haircut_opacity), 0.05);

    let hero = PanelBuilder::new("hero")
        .z(0)
        .opacity(hold_fade_out(0.25, 0.35))
        .translate(
            Track::from_pairs([(0.0, Vec2::ZERO), (0.35, Vec2::new(0.0, -120.0))])
                .eased(Ease::OutQuad),
        )
        .scale(Track::from_pairs([(0.0, 1.0), (0.35, 1.08)]))
        .blur_px(Track::from_pairs([(0.25, 0.0), (0.35, 8.0)]))
        .build()?;

    let haircut = PanelBuilder::new("haircut")
        .z(1)
        .opacity(haircut_opacity)
        .translate(
            Track::from_pairs([
                (0.20, Vec2::new(48.0, 24.0)),
                (0.30, Vec2::ZERO),
                (0.50, Vec2::ZERO),
                (0.60, Vec2::new(0.0, -64.0)),
            ])
            .eased(Ease::OutQuad),
        )
        .scale(Track::from_pairs([
            (0.20, 0.94),
            (0.30, 1.0),
            (0.50, 1.0),
            (0.60, 1.04),
        ]))
        .rotation_deg(Track::from_pairs([(0.20, -3.0), (0.30, 0.0)]).eased(Ease::OutQuad))
        .build()?;

    let beard = PanelBuilder::new("beard")
        .z(2)
        .opacity(beard_opacity)
        .translate(
            Track::from_pairs([
                (0.45, Vec2::new(-48.0, 24.0)),
                (0.55, Vec2::ZERO),
                (0.75, Vec2::ZERO),
                (0.85, Vec2::new(0.0, -64.0)),
            ])
            .eased(Ease::OutQuad),
        )
        .scale(Track::from_pairs([
            (0.45, 0.94),
            (0.55, 1.0),
            (0.75, 1.0),
            (0.85, 1.04),
        ]))
        .rotation_deg(Track::from_pairs([(0.45, 3.0), (0.55, 0.0)]).eased(Ease::OutQuad))
        .build()?;

    let finale = PanelBuilder::new("finale")
        .z(3)
        .opacity(fade_in_hold(0.70, 0.80))
        .translate(
            Track::from_pairs([(0.70, Vec2::new(0.0, 40.0)), (0.80, Vec2::ZERO)])
                .eased(Ease::OutCubic),
        )
        .scale(Track::from_pairs([(0.70, 0.95), (0.80, 1.0)]).eased(Ease::OutCubic))
        .build()?;

    StageBuilder::new(VisibilityBand::new(0.15, 0.90))
        .hint_fade(hold_fade_out(0.02, 0.08))
        .manifest(AssetManifest::new([
            "images/haircut.webp",
            "images/beard.webp",
            "images/final-poster.webp",
        ]))
        .panel(hero)
        .panel(haircut)
        .panel(beard)
        .panel(finale)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::ScrollFraction, timeline::evaluator::Evaluator,
    };

    fn opacities(f: f64) -> Vec<f64> {
        let stage = canonical().unwrap();
        Evaluator::eval(&stage, ScrollFraction::new(f))
            .unwrap()
            .panels
            .iter()
            .map(|p| p.opacity)
            .collect()
    }

    #[test]
    fn top_shows_only_the_hero() {
        assert_eq!(opacities(0.0), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn bottom_shows_only_the_finale() {
        assert_eq!(opacities(1.0), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn first_crossfade_overlaps_hero_and_haircut() {
        let o = opacities(0.275);
        assert!(o[0] > 0.0 && o[0] < 1.0, "hero {o:?}");
        assert!(o[1] > 0.0 && o[1] < 1.0, "haircut {o:?}");
        assert!(o[0] + o[1] >= 1.0);
        assert_eq!(o[2], 0.0);
        assert_eq!(o[3], 0.0);
    }

    #[test]
    fn mirrored_window_lands_on_expected_breakpoints() {
        let stage = canonical().unwrap();
        let beard = &stage.panels[2].props.opacity;
        let span = beard.span().unwrap();
        assert!((span.0.get() - 0.45).abs() < 1e-12);
        assert!((span.1.get() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn deck_validates() {
        canonical().unwrap().validate().unwrap();
    }
}
