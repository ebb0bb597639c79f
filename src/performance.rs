//! Performance levels and the solve scheduler.
//!
//! Only the expensive gaze-target solve is throttled; per-frame smoothing
//! and bone application always run while tracking is enabled. Each level
//! selects how often the eye and head targets are re-solved while the
//! pointer is active versus idle, and whether idle solving is skipped
//! entirely.

use crate::constants::POINTER_IDLE_MS;

/// User-selectable performance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceLevel {
    /// Tracking fully off; every per-frame entry point returns immediately
    Off,
    /// Slowest cadence; no solving at all while the pointer is idle
    Low,
    /// Balanced cadence with a slow idle re-solve
    Medium,
    /// Fastest cadence
    #[default]
    High,
}

impl PerformanceLevel {
    /// The immutable preset for this level
    #[must_use]
    pub const fn profile(self) -> PerformanceProfile {
        match self {
            Self::Off => PerformanceProfile {
                enabled: false,
                eye_active_interval_ms: f64::INFINITY,
                eye_idle_interval_ms: f64::INFINITY,
                head_active_interval_ms: f64::INFINITY,
                head_idle_interval_ms: f64::INFINITY,
                skip_idle_solve: true,
            },
            Self::Low => PerformanceProfile {
                enabled: true,
                eye_active_interval_ms: 150.0,
                eye_idle_interval_ms: f64::INFINITY,
                head_active_interval_ms: 200.0,
                head_idle_interval_ms: f64::INFINITY,
                skip_idle_solve: true,
            },
            Self::Medium => PerformanceProfile {
                enabled: true,
                eye_active_interval_ms: 66.0,
                eye_idle_interval_ms: 250.0,
                head_active_interval_ms: 100.0,
                head_idle_interval_ms: 400.0,
                skip_idle_solve: false,
            },
            Self::High => PerformanceProfile {
                enabled: true,
                eye_active_interval_ms: 33.0,
                eye_idle_interval_ms: 120.0,
                head_active_interval_ms: 50.0,
                head_idle_interval_ms: 200.0,
                skip_idle_solve: false,
            },
        }
    }
}

/// Immutable scheduling preset for one performance level
#[derive(Debug, Clone, Copy)]
pub struct PerformanceProfile {
    /// Whether tracking runs at all
    pub enabled: bool,
    /// Minimum ms between eye-target solves while the pointer moves
    pub eye_active_interval_ms: f64,
    /// Minimum ms between eye-target solves while the pointer is idle
    pub eye_idle_interval_ms: f64,
    /// Minimum ms between head-target solves while the pointer moves
    pub head_active_interval_ms: f64,
    /// Minimum ms between head-target solves while the pointer is idle
    pub head_idle_interval_ms: f64,
    /// Skip solving entirely once the pointer has gone idle
    pub skip_idle_solve: bool,
}

/// Which channel a scheduling decision is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveChannel {
    Eye,
    Head,
}

/// Tracks per-channel last-solve times and answers "solve now?"
#[derive(Debug, Default)]
pub struct SolveScheduler {
    last_eye_solve_ms: Option<f64>,
    last_head_solve_ms: Option<f64>,
}

impl SolveScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether the given channel should re-solve at `now_ms`.
    ///
    /// `last_pointer_move_ms` is the timestamp of the most recent pointer
    /// movement; the pointer counts as idle once `POINTER_IDLE_MS` have
    /// passed without movement. A positive decision records the solve time.
    pub fn should_solve(
        &mut self,
        channel: SolveChannel,
        now_ms: f64,
        last_pointer_move_ms: f64,
        profile: &PerformanceProfile,
    ) -> bool {
        if !profile.enabled {
            return false;
        }

        let idle = now_ms - last_pointer_move_ms > POINTER_IDLE_MS;
        if idle && profile.skip_idle_solve {
            return false;
        }

        let interval = match (channel, idle) {
            (SolveChannel::Eye, false) => profile.eye_active_interval_ms,
            (SolveChannel::Eye, true) => profile.eye_idle_interval_ms,
            (SolveChannel::Head, false) => profile.head_active_interval_ms,
            (SolveChannel::Head, true) => profile.head_idle_interval_ms,
        };

        let last = match channel {
            SolveChannel::Eye => &mut self.last_eye_solve_ms,
            SolveChannel::Head => &mut self.last_head_solve_ms,
        };

        let due = match *last {
            Some(t) => now_ms - t >= interval,
            None => true,
        };
        if due {
            *last = Some(now_ms);
        }
        due
    }

    /// Forget solve history so the next frame solves immediately
    pub fn reset(&mut self) {
        self.last_eye_solve_ms = None;
        self.last_head_solve_ms = None;
    }
}

/// Cheap instrumentation counters, useful for debugging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingStats {
    /// Gaze-target solves performed
    pub solves: u64,
    /// Joint rotations written
    pub bone_writes: u64,
    /// Frames where solving was skipped by the scheduler
    pub skipped_solves: u64,
}
