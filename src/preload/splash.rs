use std::time::Duration;

use crate::preload::manifest::AssetManifest;

/// How long the progress bar sits at 100% before the splash hands off.
pub const HOLD_AT_FULL: Duration = Duration::from_millis(500);

const INITIAL_JUMP: u8 = 10;

/// Preload progress percentage, monotonically non-decreasing.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= 100
    }
}

impl From<u8> for Progress {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> u8 {
        value.0
    }
}

/// How an asset load finished. Failures settle like successes; a broken
/// asset must never stall the splash screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded,
    Failed,
}

/// Splash screen state as seen by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashState {
    Loading(Progress),
    Ready,
}

impl SplashState {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// The asset-preload state machine behind the splash screen.
///
/// States are `Loading(progress)` and `Ready`, with a single transition
/// gated on "all assets settled AND the hold delay elapsed". The machine
/// owns one counter (settled assets) and one timer; time is fed by the
/// caller through [`Preloader::advance`], so the machine itself never
/// reads a clock.
///
/// Progress jumps to 10 on [`Preloader::begin`] (activity before the
/// first asset completes), then follows `10 + floor(90 * settled/total)`,
/// reaching exactly 100 once every asset has settled.
#[derive(Clone, Debug)]
pub struct Preloader {
    total: usize,
    settled: usize,
    started: bool,
    progress: Progress,
    hold_remaining: Option<Duration>,
    hold_cancelled: bool,
    ready: bool,
}

impl Preloader {
    pub fn new(manifest: &AssetManifest) -> Self {
        Self::with_total(manifest.len())
    }

    pub fn with_total(total: usize) -> Self {
        Self {
            total,
            settled: 0,
            started: false,
            progress: Progress::ZERO,
            hold_remaining: None,
            hold_cancelled: false,
            ready: false,
        }
    }

    /// Start loading. Idempotent. With an empty manifest the progress goes
    /// straight to 100 and the hold delay is armed.
    pub fn begin(&mut self) -> Progress {
        if self.started {
            return self.progress;
        }
        self.started = true;
        tracing::debug!(total = self.total, "preload started");

        if self.total == 0 {
            self.bump(Progress::FULL);
            self.arm_hold();
        } else {
            self.bump(Progress::new(INITIAL_JUMP));
        }
        self.progress
    }

    /// Record one settled asset. Loaded and failed assets count alike;
    /// settlements beyond the manifest total are ignored.
    pub fn settle(&mut self, outcome: AssetOutcome) -> Progress {
        if !self.started {
            tracing::warn!("asset settled before preload started; ignored");
            return self.progress;
        }
        if self.settled >= self.total {
            tracing::warn!("asset settled after manifest was exhausted; ignored");
            return self.progress;
        }

        self.settled += 1;
        match outcome {
            AssetOutcome::Loaded => {
                tracing::debug!(settled = self.settled, total = self.total, "asset loaded");
            }
            AssetOutcome::Failed => {
                tracing::warn!(
                    settled = self.settled,
                    total = self.total,
                    "asset failed to load; counted as settled"
                );
            }
        }

        let pct = INITIAL_JUMP as usize + (90 * self.settled) / self.total;
        self.bump(Progress::new(pct as u8));

        if self.settled == self.total {
            self.arm_hold();
        }
        self.progress
    }

    /// Advance the hold timer by `elapsed`. The `Loading -> Ready`
    /// transition fires only here, once the armed hold runs out.
    pub fn advance(&mut self, elapsed: Duration) -> SplashState {
        if self.ready || self.hold_cancelled {
            return self.state();
        }
        if let Some(remaining) = self.hold_remaining {
            if elapsed >= remaining {
                self.hold_remaining = None;
                self.ready = true;
                tracing::debug!("splash ready");
            } else {
                self.hold_remaining = Some(remaining - elapsed);
            }
        }
        self.state()
    }

    /// Clear the pending hold timer. Called on unmount so the timer never
    /// fires into a dead view; the machine then stays in `Loading`.
    pub fn cancel_hold(&mut self) {
        if self.hold_remaining.take().is_some() {
            tracing::debug!("splash hold cancelled");
        }
        self.hold_cancelled = true;
    }

    pub fn state(&self) -> SplashState {
        if self.ready {
            SplashState::Ready
        } else {
            SplashState::Loading(self.progress)
        }
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn arm_hold(&mut self) {
        if !self.hold_cancelled {
            self.hold_remaining = Some(HOLD_AT_FULL);
        }
    }

    // Progress may only move up.
    fn bump(&mut self, next: Progress) {
        self.progress = self.progress.max(next);
    }
}
