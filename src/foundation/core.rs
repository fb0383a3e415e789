pub use kurbo::{Affine, Vec2};

/// Normalized scroll position: 0 = top of the scroll range, 1 = fully
/// scrolled. The constructor is total: non-finite input resolves to 0 and
/// out-of-range input is clamped, so every `ScrollFraction` in the system
/// is a valid interpolation input.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for ScrollFraction {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ScrollFraction> for f64 {
    fn from(value: ScrollFraction) -> f64 {
        value.0
    }
}

/// Raw scroll geometry as reported by the hosting environment.
///
/// `range_px` is the scrollable extent (content height minus viewport
/// height), not the content height itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Current scroll offset in pixels from the top.
    pub offset_px: f64,
    /// Total scrollable range in pixels.
    pub range_px: f64,
}

impl ScrollMetrics {
    pub fn new(offset_px: f64, range_px: f64) -> Self {
        Self {
            offset_px,
            range_px,
        }
    }

    /// Normalize to a [`ScrollFraction`]. A missing or collapsed scroll
    /// range (container no taller than its viewport, mid-resize) resolves
    /// to fraction 0 rather than dividing by zero.
    pub fn fraction(self) -> ScrollFraction {
        if !self.range_px.is_finite() || self.range_px <= 0.0 {
            return ScrollFraction::ZERO;
        }
        ScrollFraction::new(self.offset_px / self.range_px)
    }
}

/// Monotonically increasing revision stamp for scroll observations.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Revision(pub u64);

/// Latest-wins holder for scroll observations.
///
/// The host pushes raw metrics on every scroll/resize event; evaluation
/// reads whatever is current. Each observation bumps the revision, so a
/// frame computed from a stale fraction can be recognized and discarded
/// instead of applied out of order.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScrollSignal {
    metrics: ScrollMetrics,
    revision: Revision,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self {
            metrics: ScrollMetrics::new(0.0, 0.0),
            revision: Revision(0),
        }
    }

    pub fn observe(&mut self, metrics: ScrollMetrics) -> Revision {
        self.metrics = metrics;
        self.revision = Revision(self.revision.0.wrapping_add(1));
        self.revision
    }

    pub fn fraction(&self) -> ScrollFraction {
        self.metrics.fraction()
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// True when `revision` still names the most recent observation.
    pub fn is_current(&self, revision: Revision) -> bool {
        self.revision == revision
    }
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Affine-composable panel transform sampled from the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelTransform {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Rotation in degrees (host style values use degrees).
    pub rotation_deg: f64,
    /// Uniform scale factor, default 1.
    pub scale: f64,
    /// Pivot in panel-local pixels.
    pub anchor: Vec2,
}

impl Default for PanelTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
            anchor: Vec2::ZERO,
        }
    }
}

impl PanelTransform {
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale(self.scale);

        // Canonical order:
        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_clamped_and_total() {
        assert_eq!(ScrollFraction::new(-0.5).get(), 0.0);
        assert_eq!(ScrollFraction::new(1.5).get(), 1.0);
        assert_eq!(ScrollFraction::new(f64::NAN).get(), 0.0);
        assert_eq!(ScrollFraction::new(0.25).get(), 0.25);
    }

    #[test]
    fn zero_range_resolves_to_top() {
        assert_eq!(
            ScrollMetrics::new(480.0, 0.0).fraction(),
            ScrollFraction::ZERO
        );
        assert_eq!(
            ScrollMetrics::new(480.0, -10.0).fraction(),
            ScrollFraction::ZERO
        );
        assert_eq!(
            ScrollMetrics::new(480.0, f64::NAN).fraction(),
            ScrollFraction::ZERO
        );
    }

    #[test]
    fn metrics_normalize_and_clamp() {
        assert_eq!(ScrollMetrics::new(500.0, 1000.0).fraction().get(), 0.5);
        // Overscroll (rubber-banding) clamps at the edges.
        assert_eq!(ScrollMetrics::new(-40.0, 1000.0).fraction().get(), 0.0);
        assert_eq!(ScrollMetrics::new(1200.0, 1000.0).fraction().get(), 1.0);
    }

    #[test]
    fn signal_keeps_latest_observation() {
        let mut signal = ScrollSignal::new();
        let r1 = signal.observe(ScrollMetrics::new(100.0, 1000.0));
        let r2 = signal.observe(ScrollMetrics::new(700.0, 1000.0));
        assert!(!signal.is_current(r1));
        assert!(signal.is_current(r2));
        assert_eq!(signal.fraction().get(), 0.7);
    }

    #[test]
    fn transform_to_affine_identity_and_translation() {
        let t = PanelTransform::default();
        assert_eq!(t.to_affine(), Affine::IDENTITY);

        let t = PanelTransform {
            translate: Vec2::new(10.0, -2.5),
            ..PanelTransform::default()
        };
        assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
    }
}
