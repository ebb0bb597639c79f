//! Per-target tracking channel with throttled targets and per-frame smoothing.
//!
//! A channel owns a target yaw/pitch written at the scheduled solve rate and
//! a current yaw/pitch advanced every frame by exponential smoothing, so the
//! output moves continuously even between infrequent target updates.

use glam::Vec3;

use crate::filters::OneEuroPair;
use crate::math::Basis;

/// Angle clamp limits and dead-zone for one channel (radians)
#[derive(Debug, Clone, Copy)]
pub struct AngleLimits {
    pub max_yaw: f32,
    pub max_pitch_up: f32,
    pub max_pitch_down: f32,
    pub center_deadzone: f32,
}

impl AngleLimits {
    /// Clamp (yaw, pitch) into the configured range and zero yaw inside the
    /// center dead-zone
    #[must_use]
    pub fn apply(&self, yaw: f32, pitch: f32) -> (f32, f32) {
        let yaw = yaw.clamp(-self.max_yaw, self.max_yaw);
        let pitch = pitch.clamp(-self.max_pitch_down, self.max_pitch_up);
        // Exact zero inside the dead-zone prevents left/right flicker at the
        // midline
        let yaw = if yaw.abs() < self.center_deadzone { 0.0 } else { yaw };
        (yaw, pitch)
    }
}

/// One smoothed tracking channel (eyes or head)
pub struct Channel {
    target_yaw: f32,
    target_pitch: f32,
    current_yaw: f32,
    current_pitch: f32,
    smooth_speed: f32,
    limits: AngleLimits,
    filters: OneEuroPair,
}

impl Channel {
    /// Create a channel with its smoothing speed, limits and filter pair
    #[must_use]
    pub fn new(smooth_speed: f32, limits: AngleLimits, filters: OneEuroPair) -> Self {
        Self {
            target_yaw: 0.0,
            target_pitch: 0.0,
            current_yaw: 0.0,
            current_pitch: 0.0,
            smooth_speed,
            limits,
            filters,
        }
    }

    /// Write a new solved target: filter, clamp, dead-zone, assign.
    ///
    /// Targets are clamped before assignment, so the smoothed current
    /// angles can never leave the configured range.
    pub fn set_target(&mut self, raw_yaw: f32, raw_pitch: f32, t_secs: f64) {
        let (yaw, pitch) = self.filters.filter(raw_yaw, raw_pitch, t_secs);
        let (yaw, pitch) = self.limits.apply(yaw, pitch);
        self.target_yaw = yaw;
        self.target_pitch = pitch;
    }

    /// Advance the current angles toward the target.
    ///
    /// `alpha = 1 - exp(-dt * smooth_speed)` gives critically-damped
    /// convergence with no overshoot.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let alpha = 1.0 - (-dt * self.smooth_speed).exp();
        self.current_yaw += (self.target_yaw - self.current_yaw) * alpha;
        self.current_pitch += (self.target_pitch - self.current_pitch) * alpha;
    }

    /// Reconstruct the world point the channel currently aims at, at a
    /// fixed radius from `origin` in the given basis. Used by the eye
    /// channel to feed the external look-at consumer every frame.
    #[must_use]
    pub fn world_point(&self, origin: Vec3, basis: &Basis, radius: f32) -> Vec3 {
        origin + basis.compose(self.current_yaw, self.current_pitch) * radius
    }

    /// Snap current and target angles back to neutral and re-prime filters
    pub fn reset(&mut self) {
        self.target_yaw = 0.0;
        self.target_pitch = 0.0;
        self.current_yaw = 0.0;
        self.current_pitch = 0.0;
        self.filters.reset();
    }

    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    pub fn current_pitch(&self) -> f32 {
        self.current_pitch
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }
}
