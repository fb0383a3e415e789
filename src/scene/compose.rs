use crate::{
    foundation::core::{Affine, Revision, ScrollFraction},
    preload::splash::SplashState,
    timeline::evaluator::TimelineFrame,
};

/// Whether a node receives pointer input or lets it fall through to the
/// panel underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PointerPolicy {
    Interactive,
    PassThrough,
}

/// One always-mounted visual node, ready for the hosting renderer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneNode {
    pub id: String,
    pub z: i32,
    pub affine: Affine,
    pub opacity: f64,
    pub blur_px: f64,
    pub pointer: PointerPolicy,
}

/// A composed scene: the full node list plus the chrome signals derived
/// from the same scroll tick and the splash state.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneFrame {
    pub fraction: ScrollFraction,
    pub revision: Option<Revision>,
    pub panels: Vec<SceneNode>,
    /// Floating call-to-action: inside its scroll band AND splash done.
    pub cta_visible: bool,
    /// Fixed nav chrome is revealed once the splash hands off.
    pub chrome_revealed: bool,
    /// "Scroll down" hint opacity near the top of the range.
    pub hint_opacity: f64,
}

const FULL_OPACITY_EPS: f64 = 1e-6;

/// Compile an evaluated timeline frame into the scene the host renders.
///
/// Panels map one-to-one onto nodes whatever their opacity; a panel at
/// zero opacity stays in the list, invisible and pointer-transparent, so
/// transitions never re-initialize mid-crossfade. Exactly the topmost
/// panel at effectively full opacity is interactive; every other node
/// passes pointer input through to it. While the splash screen is up, all
/// chrome is held back and every panel ignores input.
#[tracing::instrument(skip(frame, splash))]
pub fn compose(frame: &TimelineFrame, splash: SplashState) -> SceneFrame {
    let revealed = splash.is_ready();

    let interactive = if revealed {
        frame
            .panels
            .iter()
            .rposition(|p| (1.0 - p.opacity).abs() <= FULL_OPACITY_EPS)
    } else {
        None
    };

    let panels = frame
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| SceneNode {
            id: p.id.clone(),
            z: p.z,
            affine: p.transform.to_affine(),
            opacity: p.opacity,
            blur_px: p.blur_px,
            pointer: if Some(i) == interactive {
                PointerPolicy::Interactive
            } else {
                PointerPolicy::PassThrough
            },
        })
        .collect();

    SceneFrame {
        fraction: frame.fraction,
        revision: frame.revision,
        panels,
        cta_visible: frame.cta_visible && revealed,
        chrome_revealed: revealed,
        hint_opacity: if revealed { frame.hint_opacity } else { 0.0 },
    }
}
