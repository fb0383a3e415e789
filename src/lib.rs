//! Scrollstage is a scroll-driven presentation engine.
//!
//! It turns a normalized scroll position into the style values of a
//! full-screen panel deck: overlapping crossfading panels, parallax
//! motion, and the chrome signals around them, preceded by an
//! asset-preload splash screen.
//!
//! # Pipeline overview
//!
//! 1. **Observe**: raw scroll geometry -> [`ScrollSignal`] -> [`ScrollFraction`]
//! 2. **Evaluate**: `Stage + ScrollFraction -> TimelineFrame` (interpolated
//!    parameters per panel, CTA band)
//! 3. **Compose**: `TimelineFrame + SplashState -> SceneFrame` (always-mounted
//!    nodes with affine transforms, opacity, blur, pointer gating)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure per tick**: evaluation is a function of the latest fraction;
//!   there is no shared accumulator and no ordering between parameters.
//! - **Total inputs**: out-of-range or non-finite scroll input clamps into
//!   `[0, 1]`; a collapsed scroll range resolves to the top, never to a
//!   division by zero.
//! - **No IO**: asset fetching and event dispatch belong to the host; the
//!   preloader consumes settlement events and caller-fed time.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod preload;
mod scene;
mod stage;
mod timeline;

pub use animation::ease::Ease;
pub use animation::ops::{fade_in_hold, fade_window, hold_fade_out, reversed, shift};
pub use animation::track::{Breakpoint, InterpMode, Lerp, Track};
pub use foundation::core::{
    Affine, PanelTransform, Revision, ScrollFraction, ScrollMetrics, ScrollSignal, Vec2,
};
pub use foundation::error::{StageError, StageResult};
pub use preload::manifest::AssetManifest;
pub use preload::splash::{AssetOutcome, HOLD_AT_FULL, Preloader, Progress, SplashState};
pub use scene::compose::{PointerPolicy, SceneFrame, SceneNode, compose};
pub use stage::builder::{PanelBuilder, StageBuilder};
pub use stage::deck;
pub use timeline::evaluator::{Evaluator, PanelFrame, TimelineFrame};
pub use timeline::model::{ActivationWindow, Panel, PanelProps, Stage, VisibilityBand};
