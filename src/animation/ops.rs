use crate::{
    animation::ease::Ease,
    animation::track::{Breakpoint, Track},
    foundation::core::ScrollFraction,
};

/// Shift every breakpoint by `delta` along the scroll axis. Positions
/// saturate at the ends of the scroll range.
pub fn shift<T: Clone>(track: &Track<T>, delta: f64) -> Track<T> {
    Track {
        keys: track
            .keys
            .iter()
            .map(|k| Breakpoint {
                at: ScrollFraction::new(k.at.get() + delta),
                value: k.value.clone(),
                ease: k.ease,
            })
            .collect(),
        mode: track.mode,
    }
}

/// Mirror a track around the middle of the scroll range, so a panel that
/// enters early and leaves late becomes one that enters late and leaves
/// early. Segment easings are inverted to preserve the traversal shape.
pub fn reversed<T: Clone>(track: &Track<T>) -> Track<T> {
    let n = track.keys.len();
    let keys = (0..n)
        .map(|j| {
            let src = &track.keys[n - 1 - j];
            let ease = if j + 1 < n {
                track.keys[n - 2 - j].ease.inverted()
            } else {
                Ease::Linear
            };
            Breakpoint {
                at: ScrollFraction::new(1.0 - src.at.get()),
                value: src.value.clone(),
                ease,
            }
        })
        .collect();
    Track {
        keys,
        mode: track.mode,
    }
}

/// Opacity ramp 0 → 1 → 1 → 0 across four breakpoints: the activation
/// window of an interior panel.
pub fn fade_window(enter_start: f64, enter_end: f64, exit_start: f64, exit_end: f64) -> Track<f64> {
    Track::from_pairs([
        (enter_start, 0.0),
        (enter_end, 1.0),
        (exit_start, 1.0),
        (exit_end, 0.0),
    ])
}

/// Opacity ramp 0 → 1 that then holds at full: the window of the last
/// panel (boundary clamp supplies the trailing hold).
pub fn fade_in_hold(enter_start: f64, enter_end: f64) -> Track<f64> {
    Track::from_pairs([(enter_start, 0.0), (enter_end, 1.0)])
}

/// Full opacity from the top that ramps 1 → 0: the window of the first
/// panel (boundary clamp supplies the leading hold).
pub fn hold_fade_out(exit_start: f64, exit_end: f64) -> Track<f64> {
    Track::from_pairs([(exit_start, 1.0), (exit_end, 0.0)])
}
