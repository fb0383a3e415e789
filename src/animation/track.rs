use crate::{
    animation::ease::Ease,
    foundation::core::{ScrollFraction, Vec2},
    foundation::error::{StageError, StageResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// One keyframe of a [`Track`]: a value pinned at a scroll position, with
/// the easing applied toward the next breakpoint.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint<T> {
    pub at: ScrollFraction,
    pub value: T,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    Hold,
    Linear,
}

/// A piecewise-linear mapping from [`ScrollFraction`] to a style value.
///
/// Breakpoints are sorted by position. Between neighbors the value is
/// interpolated (eased); before the first and past the last breakpoint the
/// boundary value is held constant: tracks clamp, they never extrapolate.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track<T> {
    pub keys: Vec<Breakpoint<T>>, // sorted by position
    pub mode: InterpMode,
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Breakpoint {
                at: ScrollFraction::ZERO,
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
        }
    }

    /// Linear track from `(position, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, T)>) -> Self {
        Self {
            keys: pairs
                .into_iter()
                .map(|(at, value)| Breakpoint {
                    at: ScrollFraction::new(at),
                    value,
                    ease: Ease::Linear,
                })
                .collect(),
            mode: InterpMode::Linear,
        }
    }

    pub fn validate(&self) -> StageResult<()> {
        if self.keys.is_empty() {
            return Err(StageError::animation(
                "track must have at least one breakpoint",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(StageError::animation(
                "track breakpoints must be sorted by position",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, f: ScrollFraction) -> StageResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(StageError::animation("track has no breakpoints"));
        };

        let idx = self.keys.partition_point(|k| k.at <= f);

        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at.get() - a.at.get();
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let t = (f.get() - a.at.get()) / denom;
        let te = a.ease.apply(t);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }

    /// The same track with every segment eased by `ease`.
    pub fn eased(mut self, ease: Ease) -> Self {
        for k in &mut self.keys {
            k.ease = ease;
        }
        self
    }

    /// Scroll positions of the first and last breakpoint.
    pub fn span(&self) -> Option<(ScrollFraction, ScrollFraction)> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        Some((first.at, last.at))
    }
}
