use crate::{
    animation::track::Track,
    foundation::core::{ScrollFraction, Vec2},
    foundation::error::{StageError, StageResult},
    preload::manifest::AssetManifest,
};

/// A complete scroll-driven stage.
///
/// A stage is a pure data model: an ordered set of panels whose style
/// parameters are keyframed over the scroll range, a visibility band for
/// the floating call-to-action, and the manifest of media assets the
/// splash screen preloads. It can be built programmatically (see
/// [`crate::StageBuilder`]) or serialized via Serde (JSON).
///
/// Evaluating a stage at a scroll position is performed by
/// [`crate::Evaluator::eval`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    /// Panels in stacking order (lowest drawn first).
    pub panels: Vec<Panel>,
    /// Scroll band in which the floating call-to-action is shown.
    pub cta: VisibilityBand,
    /// Opacity of the "scroll down" hint shown near the top of the range.
    #[serde(default = "default_hint_fade")]
    pub hint_fade: Track<f64>,
    /// Media assets preloaded behind the splash screen.
    #[serde(default)]
    pub manifest: AssetManifest,
}

/// One always-mounted content panel and its keyframed style parameters.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Panel {
    /// Panel identifier (stable within a stage).
    pub id: String,
    /// Stacking order; higher draws above lower.
    pub z: i32,
    /// Animated style parameters.
    pub props: PanelProps,
}

/// Keyframed style parameters for a panel. Every parameter is an
/// independent [`Track`] over the scroll fraction; none of them share
/// state, so per-tick evaluation has no ordering dependency.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PanelProps {
    /// Opacity in `[0, 1]`; zero outside the panel's activation window.
    pub opacity: Track<f64>,
    /// Translation in pixels.
    #[serde(default = "default_translate")]
    pub translate: Track<Vec2>,
    /// Uniform scale factor.
    #[serde(default = "default_scale")]
    pub scale: Track<f64>,
    /// Rotation in degrees.
    #[serde(default = "default_rotation")]
    pub rotation_deg: Track<f64>,
    /// Blur radius in pixels.
    #[serde(default = "default_blur")]
    pub blur_px: Track<f64>,
    /// Transform pivot in panel-local pixels.
    #[serde(default = "default_anchor")]
    pub anchor: Vec2,
}

fn default_anchor() -> Vec2 {
    Vec2::ZERO
}

fn default_translate() -> Track<Vec2> {
    Track::constant(Vec2::ZERO)
}

fn default_scale() -> Track<f64> {
    Track::constant(1.0)
}

fn default_rotation() -> Track<f64> {
    Track::constant(0.0)
}

fn default_blur() -> Track<f64> {
    Track::constant(0.0)
}

fn default_hint_fade() -> Track<f64> {
    Track::constant(0.0)
}

impl Default for PanelProps {
    fn default() -> Self {
        Self {
            opacity: Track::constant(1.0),
            translate: default_translate(),
            scale: default_scale(),
            rotation_deg: default_rotation(),
            blur_px: default_blur(),
            anchor: Vec2::ZERO,
        }
    }
}

/// Scroll sub-range in which a panel is the primary visible content,
/// derived from the support of its opacity track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActivationWindow {
    pub enter: ScrollFraction,
    pub exit: ScrollFraction,
}

impl ActivationWindow {
    pub fn contains(self, f: ScrollFraction) -> bool {
        self.enter <= f && f <= self.exit
    }
}

impl Panel {
    /// The panel's activation window: the span of its opacity breakpoints.
    /// Panels whose opacity clamps at full toward a deck edge extend to
    /// that edge.
    pub fn activation_window(&self) -> ActivationWindow {
        let (enter, exit) = match self.props.opacity.span() {
            Some(span) => span,
            None => (ScrollFraction::ZERO, ScrollFraction::ONE),
        };
        let first_full = self
            .props
            .opacity
            .keys
            .first()
            .is_some_and(|k| k.value >= 1.0);
        let last_full = self
            .props
            .opacity
            .keys
            .last()
            .is_some_and(|k| k.value >= 1.0);
        ActivationWindow {
            enter: if first_full { ScrollFraction::ZERO } else { enter },
            exit: if last_full { ScrollFraction::ONE } else { exit },
        }
    }
}

/// Open scroll interval gating a thresholded boolean signal. Strict at
/// both ends, so the signal is hidden exactly at the band edges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisibilityBand {
    pub after: ScrollFraction,
    pub before: ScrollFraction,
}

impl VisibilityBand {
    pub fn new(after: f64, before: f64) -> Self {
        Self {
            after: ScrollFraction::new(after),
            before: ScrollFraction::new(before),
        }
    }

    pub fn contains(self, f: ScrollFraction) -> bool {
        self.after < f && f < self.before
    }

    pub fn validate(&self) -> StageResult<()> {
        if self.after >= self.before {
            return Err(StageError::validation(
                "visibility band 'after' must be < 'before'",
            ));
        }
        Ok(())
    }
}

impl Stage {
    /// Validate stage invariants: panel identity, track ordering, and
    /// parameter domains.
    pub fn validate(&self) -> StageResult<()> {
        if self.panels.is_empty() {
            return Err(StageError::validation("stage must have at least one panel"));
        }

        for (i, panel) in self.panels.iter().enumerate() {
            if panel.id.trim().is_empty() {
                return Err(StageError::validation("panel id must be non-empty"));
            }
            if self.panels[..i].iter().any(|p| p.id == panel.id) {
                return Err(StageError::validation(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }

            let props = &panel.props;
            let field = |name: &str| format!("panel '{}' {name}", panel.id);
            validate_scalar_track(&props.opacity, &field("opacity"), Some((0.0, 1.0)))?;
            validate_scalar_track(&props.scale, &field("scale"), None)?;
            validate_scalar_track(&props.rotation_deg, &field("rotation_deg"), None)?;
            validate_scalar_track(&props.blur_px, &field("blur_px"), None)?;
            if props.blur_px.keys.iter().any(|k| k.value < 0.0) {
                return Err(StageError::validation(format!(
                    "panel '{}' blur_px must be >= 0",
                    panel.id
                )));
            }

            props.translate.validate()?;
            if props
                .translate
                .keys
                .iter()
                .any(|k| !k.value.x.is_finite() || !k.value.y.is_finite())
            {
                return Err(StageError::validation(format!(
                    "panel '{}' translate values must be finite",
                    panel.id
                )));
            }
            if !props.anchor.x.is_finite() || !props.anchor.y.is_finite() {
                return Err(StageError::validation(format!(
                    "panel '{}' anchor must be finite",
                    panel.id
                )));
            }
        }

        self.cta.validate()?;
        validate_scalar_track(&self.hint_fade, "hint_fade", Some((0.0, 1.0)))?;
        self.manifest.validate()?;

        Ok(())
    }
}

fn validate_scalar_track(
    track: &Track<f64>,
    field: &str,
    range: Option<(f64, f64)>,
) -> StageResult<()> {
    track.validate()?;
    for k in &track.keys {
        if !k.value.is_finite() {
            return Err(StageError::validation(format!(
                "{field} values must be finite"
            )));
        }
        if let Some((lo, hi)) = range
            && !(lo..=hi).contains(&k.value)
        {
            return Err(StageError::validation(format!(
                "{field} values must be within [{lo}, {hi}]"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ops::{fade_window, hold_fade_out};

    fn one_panel_stage(opacity: Track<f64>) -> Stage {
        Stage {
            panels: vec![Panel {
                id: "hero".to_string(),
                z: 0,
                props: PanelProps {
                    opacity,
                    ..PanelProps::default()
                },
            }],
            cta: VisibilityBand::new(0.15, 0.9),
            hint_fade: default_hint_fade(),
            manifest: AssetManifest::default(),
        }
    }

    #[test]
    fn valid_stage_passes() {
        one_panel_stage(hold_fade_out(0.25, 0.35)).validate().unwrap();
    }

    #[test]
    fn opacity_outside_unit_range_is_rejected() {
        let stage = one_panel_stage(Track::from_pairs([(0.0, 0.0), (0.5, 1.4)]));
        assert!(stage.validate().is_err());
    }

    #[test]
    fn duplicate_panel_ids_are_rejected() {
        let mut stage = one_panel_stage(hold_fade_out(0.25, 0.35));
        let dup = stage.panels[0].clone();
        stage.panels.push(dup);
        assert!(stage.validate().is_err());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut stage = one_panel_stage(hold_fade_out(0.25, 0.35));
        stage.cta = VisibilityBand::new(0.9, 0.15);
        assert!(stage.validate().is_err());
    }

    #[test]
    fn band_is_strict_at_both_ends() {
        let band = VisibilityBand::new(0.15, 0.9);
        assert!(!band.contains(ScrollFraction::new(0.15)));
        assert!(band.contains(ScrollFraction::new(0.16)));
        assert!(!band.contains(ScrollFraction::new(0.9)));
    }

    #[test]
    fn activation_window_extends_to_clamped_edges() {
        let stage = one_panel_stage(hold_fade_out(0.25, 0.35));
        let w = stage.panels[0].activation_window();
        assert_eq!(w.enter, ScrollFraction::ZERO);
        assert_eq!(w.exit, ScrollFraction::new(0.35));

        let interior = Panel {
            id: "mid".to_string(),
            z: 1,
            props: PanelProps {
                opacity: fade_window(0.2, 0.3, 0.5, 0.6),
                ..PanelProps::default()
            },
        };
        let w = interior.activation_window();
        assert_eq!(w.enter, ScrollFraction::new(0.2));
        assert_eq!(w.exit, ScrollFraction::new(0.6));
        assert!(w.contains(ScrollFraction::new(0.4)));
        assert!(!w.contains(ScrollFraction::new(0.7)));
    }
}
