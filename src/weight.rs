//! Animation-state-aware tracking weight.
//!
//! Derives a 0..1 weight from the host's animation-state queries and
//! smooths transitions so tracking fades in and out instead of snapping.

use crate::constants::{DRAG_WEIGHT, IDLE_CYCLE_WEIGHT, WEIGHT_EPSILON};

/// Host-supplied animation state queries, read once per frame
pub trait AnimationState {
    /// A one-shot, non-cyclic action animation is currently playing
    fn is_one_shot_action_playing(&self) -> bool;

    /// A cyclic idle animation is currently playing
    fn is_idle_cycle_playing(&self) -> bool;

    /// The user is dragging/orbiting the model or camera
    fn is_manual_drag_in_progress(&self) -> bool;
}

/// Smoothed 0..1 tracking weight driven by animation state
pub struct WeightController {
    current_weight: f32,
    target_weight: f32,
    transition_duration: f32,
}

impl WeightController {
    /// Create a controller with the given transition duration in seconds
    ///
    /// # Panics
    ///
    /// Panics if the duration is not positive
    #[must_use]
    pub fn new(transition_duration: f32) -> Self {
        assert!(transition_duration > 0.0, "Transition duration must be positive");
        Self {
            current_weight: 1.0,
            target_weight: 1.0,
            transition_duration,
        }
    }

    /// Re-derive the target weight and move the current weight toward it.
    ///
    /// Priority, highest first: one-shot action fully suppresses tracking;
    /// a manual drag keeps a small residual weight so the head does not
    /// snap fully off; an idle cycle gets partial weight so tracking is
    /// additive on top of the idle motion; otherwise full tracking.
    pub fn update(&mut self, dt: f32, state: &dyn AnimationState) {
        self.target_weight = if state.is_one_shot_action_playing() {
            0.0
        } else if state.is_manual_drag_in_progress() {
            DRAG_WEIGHT
        } else if state.is_idle_cycle_playing() {
            IDLE_CYCLE_WEIGHT
        } else {
            1.0
        };

        if dt > 0.0 {
            let alpha = 1.0 - (-dt / self.transition_duration).exp();
            self.current_weight += (self.target_weight - self.current_weight) * alpha;
        }
    }

    /// Current smoothed weight
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current_weight
    }

    /// Current target weight
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target_weight
    }

    /// True when the weight is too small to justify touching any bones
    #[must_use]
    pub fn is_negligible(&self) -> bool {
        self.current_weight < WEIGHT_EPSILON
    }

    /// Snap back to full weight (used on reset/re-enable)
    pub fn reset(&mut self) {
        self.current_weight = 1.0;
        self.target_weight = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flags {
        one_shot: bool,
        idle_cycle: bool,
        dragging: bool,
    }

    impl AnimationState for Flags {
        fn is_one_shot_action_playing(&self) -> bool {
            self.one_shot
        }

        fn is_idle_cycle_playing(&self) -> bool {
            self.idle_cycle
        }

        fn is_manual_drag_in_progress(&self) -> bool {
            self.dragging
        }
    }

    #[test]
    fn test_one_shot_wins_over_everything() {
        let mut w = WeightController::new(0.2);
        let state = Flags {
            one_shot: true,
            idle_cycle: true,
            dragging: true,
        };
        for _ in 0..300 {
            w.update(1.0 / 60.0, &state);
        }
        assert_eq!(w.target(), 0.0);
        assert!(w.current() < 1e-3);
        assert!(w.is_negligible());
    }

    #[test]
    fn test_priority_order() {
        let mut w = WeightController::new(0.2);

        w.update(
            0.016,
            &Flags {
                one_shot: false,
                idle_cycle: true,
                dragging: true,
            },
        );
        assert_eq!(w.target(), DRAG_WEIGHT);

        w.update(
            0.016,
            &Flags {
                one_shot: false,
                idle_cycle: true,
                dragging: false,
            },
        );
        assert_eq!(w.target(), IDLE_CYCLE_WEIGHT);

        w.update(
            0.016,
            &Flags {
                one_shot: false,
                idle_cycle: false,
                dragging: false,
            },
        );
        assert_eq!(w.target(), 1.0);
    }

    #[test]
    fn test_monotone_convergence_no_overshoot() {
        let mut w = WeightController::new(0.2);
        let state = Flags {
            one_shot: true,
            idle_cycle: false,
            dragging: false,
        };

        let mut last = w.current();
        for _ in 0..100 {
            w.update(0.016, &state);
            assert!(w.current() <= last + 1e-7);
            assert!(w.current() >= 0.0);
            last = w.current();
        }
    }

    #[test]
    #[should_panic(expected = "Transition duration must be positive")]
    fn test_zero_duration_panics() {
        let _ = WeightController::new(0.0);
    }
}
