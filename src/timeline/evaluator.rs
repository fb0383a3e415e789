use crate::{
    foundation::core::{PanelTransform, Revision, ScrollFraction, ScrollSignal},
    foundation::error::StageResult,
    timeline::model::{Panel, Stage},
};

/// Everything the timeline derives from one scroll position.
///
/// Every panel appears in `panels` on every tick, whatever its opacity.
/// Panels are never unmounted; the engine only drives them invisible.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TimelineFrame {
    pub fraction: ScrollFraction,
    /// Revision of the scroll observation this frame was computed from,
    /// when evaluated through a [`ScrollSignal`]. A frame whose revision
    /// is no longer current must be discarded, not applied.
    pub revision: Option<Revision>,
    pub panels: Vec<PanelFrame>,
    pub cta_visible: bool,
    pub hint_opacity: f64,
}

/// One panel's interpolated style parameters at a scroll position.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PanelFrame {
    pub id: String,
    pub z: i32,
    /// Clamped to `[0, 1]`.
    pub opacity: f64,
    pub transform: PanelTransform,
    pub blur_px: f64,
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate the stage at a scroll fraction.
    ///
    /// Each parameter track is sampled independently; the whole derivation
    /// is a pure function of `fraction`, cheap enough to run on every
    /// scroll tick.
    #[tracing::instrument(skip(stage))]
    pub fn eval(stage: &Stage, fraction: ScrollFraction) -> StageResult<TimelineFrame> {
        stage.validate()?;

        let mut panels_with_key: Vec<((i32, usize, String), PanelFrame)> = Vec::new();
        for (index, panel) in stage.panels.iter().enumerate() {
            let frame = eval_panel(panel, fraction)?;
            let sort_key = (frame.z, index, frame.id.clone());
            panels_with_key.push((sort_key, frame));
        }

        panels_with_key.sort_by(|a, b| a.0.cmp(&b.0));
        let panels = panels_with_key.into_iter().map(|(_, p)| p).collect();

        Ok(TimelineFrame {
            fraction,
            revision: None,
            panels,
            cta_visible: stage.cta.contains(fraction),
            hint_opacity: stage.hint_fade.sample(fraction)?.clamp(0.0, 1.0),
        })
    }

    /// Evaluate at the latest observation of a [`ScrollSignal`], stamping
    /// the frame with the observation's revision so stale frames can be
    /// recognized. The most recent fraction always wins.
    pub fn eval_signal(stage: &Stage, signal: &ScrollSignal) -> StageResult<TimelineFrame> {
        let mut frame = Self::eval(stage, signal.fraction())?;
        frame.revision = Some(signal.revision());
        Ok(frame)
    }
}

fn eval_panel(panel: &Panel, fraction: ScrollFraction) -> StageResult<PanelFrame> {
    let props = &panel.props;

    let opacity = props.opacity.sample(fraction)?.clamp(0.0, 1.0);
    let transform = PanelTransform {
        translate: props.translate.sample(fraction)?,
        rotation_deg: props.rotation_deg.sample(fraction)?,
        scale: props.scale.sample(fraction)?,
        anchor: props.anchor,
    };
    let blur_px = props.blur_px.sample(fraction)?.max(0.0);

    Ok(PanelFrame {
        id: panel.id.clone(),
        z: panel.z,
        opacity,
        transform,
        blur_px,
    })
}
