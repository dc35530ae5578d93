//! Easing curves and a one-shot tween clock.
//!
//! [`Tween`] is the shared "time remaining" state behind every timed
//! interpolation in the scenario: overlay fades in
//! [`crate::resources::overlay`] and the anomaly approach in
//! [`crate::components::anomaly`]. It only tracks time; callers interpolate
//! whatever they animate with [`Tween::progress`].

/// Shortest duration a tween may have. Guards the `elapsed / duration` divide.
pub const MIN_TWEEN_DURATION: f32 = 0.01;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Slow start and end (cubic).
    CubicInOut,
    /// Hermite ease-in/ease-out with zero end tangents: `3t² - 2t³`.
    SmoothStep,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One-shot tween clock.
///
/// Advanced by the owner each tick; reports completion exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Duration in seconds, at least [`MIN_TWEEN_DURATION`].
    pub duration: f32,
    /// Seconds elapsed, clamped to `duration`.
    pub elapsed: f32,
    /// Easing function applied by [`Tween::progress`].
    pub easing: Easing,
    /// False once the tween has reached its end.
    pub playing: bool,
}

impl Tween {
    pub fn new(duration: f32) -> Self {
        Tween {
            duration: duration.max(MIN_TWEEN_DURATION),
            elapsed: 0.0,
            easing: Easing::Linear,
            playing: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt` seconds. Returns `true` only on the call that finishes
    /// the tween; later calls are no-ops returning `false`.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.elapsed >= self.duration {
            self.playing = false;
            return true;
        }
        false
    }

    /// Linear progress in [0, 1].
    pub fn linear_progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self) -> f32 {
        ease(self.easing, self.linear_progress())
    }

    pub fn is_finished(&self) -> bool {
        !self.playing
    }
}
