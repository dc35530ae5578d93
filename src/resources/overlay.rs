//! Full-screen overlay fades.
//!
//! The visual collaborator reads [`OverlayFade::alpha`] each frame; the phase
//! controller drives the fades and waits for them to finish before moving on
//! (glitch overlay before the anomaly reveal, blackout before the scene load).

use bevy_ecs::prelude::Resource;

use crate::components::tween::{Tween, lerp_f32};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayFade {
    alpha: f32,
    active: bool,
    fade: Option<(f32, f32, Tween)>,
}

impl OverlayFade {
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether the overlay is shown at all.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Activate the overlay and fade from the current alpha to `target`.
    pub fn begin_fade(&mut self, target: f32, duration: f32) {
        self.active = true;
        self.fade = Some((self.alpha, target.clamp(0.0, 1.0), Tween::new(duration)));
    }

    /// Advance the fade. Returns `true` on the tick it completes; an overlay
    /// faded to zero deactivates itself.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some((from, to, tween)) = self.fade.as_mut() else {
            return false;
        };
        let finished = tween.advance(dt);
        self.alpha = lerp_f32(*from, *to, tween.progress());
        if finished {
            self.alpha = *to;
            self.active = self.alpha > 0.0;
            self.fade = None;
        }
        finished
    }

    /// Hide immediately and cancel any fade.
    pub fn hide(&mut self) {
        self.alpha = 0.0;
        self.active = false;
        self.fade = None;
    }
}

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct Overlays {
    pub glitch: OverlayFade,
    pub blackout: OverlayFade,
}

impl Overlays {
    pub fn hide_all(&mut self) {
        self.glitch.hide();
        self.blackout.hide();
    }
}
