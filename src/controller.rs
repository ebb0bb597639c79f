//! The cursor-follow orchestrator.
//!
//! Owns the two tracking channels, the weight controller, the bone applier
//! and the solve scheduler. The host drives it with two calls per rendered
//! frame: [`CursorFollowController::update_target`] before its skeleton
//! update and [`CursorFollowController::apply_head`] after it, so the
//! additive head offset is not overwritten by the base animation. Pointer
//! samples arrive through [`CursorFollowController::notify_pointer`], which
//! only records the latest value; all computation is deferred to the frame
//! callbacks.

use glam::Vec3;
use log::{debug, info};

use crate::bone_applier::BoneRotationApplier;
use crate::channel::{AngleLimits, Channel};
use crate::config::{ChannelConfig, TrackingConfig};
use crate::constants::{BOUNDS_REFRESH_MS, POINTER_MOVE_THRESHOLD_PX};
use crate::filters::OneEuroPair;
use crate::gaze_solver::{BoundsCache, GazeSolver, PointerSample, ViewportSource};
use crate::math::{Basis, CameraView};
use crate::performance::{
    PerformanceLevel, PerformanceProfile, SolveChannel, SolveScheduler, TrackingStats,
};
use crate::rig::{probe_forward_sign, Skeleton, TrackedJoint};
use crate::weight::{AnimationState, WeightController};
use crate::Result;

/// Everything the controller reads from the host during one frame
pub struct FrameContext<'a> {
    /// Camera state for this frame
    pub camera: CameraView,
    /// Render-surface bounds provider
    pub viewport: &'a dyn ViewportSource,
    /// Animation state queries
    pub animation: &'a dyn AnimationState,
    /// Frame clock in milliseconds
    pub now_ms: f64,
}

/// Gaze/head cursor-tracking controller
pub struct CursorFollowController {
    eye: Channel,
    head: Channel,
    weight: WeightController,
    applier: BoneRotationApplier,
    solver: GazeSolver,
    scheduler: SolveScheduler,
    bounds_cache: BoundsCache,

    level: PerformanceLevel,
    profile: PerformanceProfile,
    enabled: bool,
    disposed: bool,
    restore_pending: bool,

    /// Probed lazily on the first frame after attach/reset
    forward_sign: Option<f32>,

    pointer: Option<PointerSample>,
    last_pointer_move_ms: f64,

    eye_gaze_target: Vec3,
    look_at_distance: f32,

    stats: TrackingStats,
}

fn build_channel(config: &ChannelConfig, filter: &crate::config::FilterConfig) -> Channel {
    Channel::new(
        config.smooth_speed,
        AngleLimits {
            max_yaw: config.max_yaw_deg.to_radians(),
            max_pitch_up: config.max_pitch_up_deg.to_radians(),
            max_pitch_down: config.max_pitch_down_deg.to_radians(),
            center_deadzone: config.deadzone_deg.to_radians(),
        },
        OneEuroPair::new(filter.min_cutoff, filter.beta, filter.d_cutoff),
    )
}

impl Default for CursorFollowController {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollowController {
    /// Create a controller with default configuration
    #[must_use]
    pub fn new() -> Self {
        // Defaults always validate
        Self::from_config(&TrackingConfig::with_defaults())
            .unwrap_or_else(|e| unreachable!("default config rejected: {e}"))
    }

    /// Create a controller from a validated configuration
    pub fn from_config(config: &TrackingConfig) -> Result<Self> {
        config.validate()?;
        let level = config.performance_level()?;

        info!("cursor-follow controller created (level {level:?})");

        Ok(Self {
            eye: build_channel(&config.eye, &config.filter),
            head: build_channel(&config.head, &config.filter),
            weight: WeightController::new(config.weight.transition_secs),
            applier: BoneRotationApplier::new(
                config.gaze.neck_contribution,
                config.gaze.head_contribution,
            ),
            solver: GazeSolver::new(config.gaze.sphere_radius),
            scheduler: SolveScheduler::new(),
            bounds_cache: BoundsCache::new(BOUNDS_REFRESH_MS),
            level,
            profile: level.profile(),
            enabled: true,
            disposed: false,
            restore_pending: false,
            forward_sign: None,
            pointer: None,
            last_pointer_move_ms: 0.0,
            eye_gaze_target: Vec3::ZERO,
            look_at_distance: config.gaze.look_at_distance,
            stats: TrackingStats::default(),
        })
    }

    /// Record the latest pointer sample. No computation happens here; the
    /// expensive solve is deferred to the next `update_target`.
    pub fn notify_pointer(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        if self.disposed {
            return;
        }
        let moved = match self.pointer {
            // Sub-pixel jitter does not count as movement, so it cannot
            // hold the scheduler in the active cadence
            Some(prev) => (x - prev.x).hypot(y - prev.y) >= POINTER_MOVE_THRESHOLD_PX,
            None => true,
        };
        if moved {
            self.last_pointer_move_ms = timestamp_ms;
        }
        self.pointer = Some(PointerSample { x, y, timestamp_ms });
    }

    /// Per-frame target update; call before the host's skeleton update.
    ///
    /// Runs scheduled gaze solves into the channel targets, advances both
    /// channels by `dt` seconds and rebuilds the eye gaze point.
    pub fn update_target(&mut self, dt: f32, ctx: &FrameContext<'_>, skeleton: &dyn Skeleton) {
        if self.disposed || !self.enabled || !self.profile.enabled {
            return;
        }

        let forward_sign = *self
            .forward_sign
            .get_or_insert_with(|| probe_forward_sign(skeleton));

        self.weight.update(dt, ctx.animation);

        // Anchor on the head joint, falling back to the neck on rigs
        // without a distinct head
        let anchor = skeleton
            .joint(TrackedJoint::Head)
            .or_else(|| skeleton.joint(TrackedJoint::Neck))
            .map(|j| j.world_position);
        let Some(head_position) = anchor else {
            return;
        };

        if let Some(pointer) = self.pointer {
            let solve_eye = self.scheduler.should_solve(
                SolveChannel::Eye,
                ctx.now_ms,
                self.last_pointer_move_ms,
                &self.profile,
            );
            let solve_head = self.scheduler.should_solve(
                SolveChannel::Head,
                ctx.now_ms,
                self.last_pointer_move_ms,
                &self.profile,
            );

            if solve_eye || solve_head {
                let bounds = self.bounds_cache.get(ctx.now_ms, ctx.viewport);
                let dir = self
                    .solver
                    .solve_direction(&ctx.camera, bounds, pointer, head_position);
                let t_secs = ctx.now_ms / 1000.0;

                if solve_eye {
                    let angles = GazeSolver::camera_relative_angles(&ctx.camera, dir);
                    self.eye.set_target(angles.yaw, angles.pitch, t_secs);
                    self.stats.solves += 1;
                }
                if solve_head {
                    let angles = GazeSolver::model_relative_angles(
                        skeleton.root_orientation(),
                        forward_sign,
                        dir,
                    );
                    self.head.set_target(angles.yaw, angles.pitch, t_secs);
                    self.stats.solves += 1;
                }
            } else {
                self.stats.skipped_solves += 1;
            }
        }

        // Smoothing runs every frame regardless of the solve cadence, so
        // the output moves continuously between throttled target updates
        self.eye.advance(dt);
        self.head.advance(dt);

        // Eye angles are measured against the camera's away axis, so the
        // fixation point is rebuilt with forward flipped toward the camera:
        // same lateral offsets, but on the side of the head the viewer sees
        let cam = Basis::from_orientation(ctx.camera.orientation);
        let look_basis = Basis {
            right: cam.right,
            up: cam.up,
            forward: -cam.forward,
        };
        self.eye_gaze_target = self
            .eye
            .world_point(head_position, &look_basis, self.look_at_distance);
    }

    /// Per-frame bone application; call after the host's skeleton update.
    ///
    /// Snapshots the base pose, then premultiplies the weighted head offset
    /// onto the neck and head joints. A pending disable-restore is executed
    /// first, even while disabled, so the rig snaps back within the same
    /// frame that `set_enabled(false)` was called.
    pub fn apply_head(&mut self, skeleton: &mut dyn Skeleton) {
        if self.disposed {
            return;
        }

        if self.restore_pending {
            self.stats.bone_writes += u64::from(self.applier.restore_default_pose(skeleton));
            self.restore_pending = false;
        }

        if !self.enabled || !self.profile.enabled {
            return;
        }

        self.applier.snapshot_base_pose(skeleton);

        // Negligible weight: leave the base pose untouched
        if self.weight.is_negligible() {
            return;
        }

        let writes = self.applier.apply(
            skeleton,
            self.head.current_yaw(),
            self.head.current_pitch(),
            self.weight.current(),
            self.forward_sign.unwrap_or(1.0),
        );
        self.stats.bone_writes += u64::from(writes);
    }

    /// The world point the eyes currently fixate, for the external look-at
    /// consumer. Always finite and within `look_at_distance` of the head.
    #[must_use]
    pub fn eye_gaze_target(&self) -> Vec3 {
        self.eye_gaze_target
    }

    /// Enable or disable tracking. Disabling snaps all channel state to
    /// neutral and restores the tracked joints to the captured default pose
    /// at the top of this frame's `apply_head`. Idempotent.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.disposed || enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            info!("tracking re-enabled");
            self.scheduler.reset();
        } else {
            info!("tracking disabled, restoring default pose");
            self.eye.reset();
            self.head.reset();
            self.weight.reset();
            self.scheduler.reset();
            self.restore_pending = true;
        }
    }

    /// Select a performance level. Idempotent.
    pub fn set_performance_level(&mut self, level: PerformanceLevel) {
        if self.disposed || level == self.level {
            return;
        }
        info!("performance level {:?} -> {:?}", self.level, level);
        self.level = level;
        self.profile = level.profile();
        self.scheduler.reset();
    }

    /// Reset all tracking state for a model/rig swap. Filters and channels
    /// are cleared in place and the forward-axis convention is re-probed on
    /// the next frame.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        debug!("tracking state reset");
        self.eye.reset();
        self.head.reset();
        self.weight.reset();
        self.scheduler.reset();
        self.applier.reset();
        self.bounds_cache.invalidate();
        self.forward_sign = None;
        self.pointer = None;
        self.restore_pending = false;
        self.eye_gaze_target = Vec3::ZERO;
    }

    /// Release all state. Terminal and idempotent: every entry point
    /// becomes a no-op afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        info!("cursor-follow controller disposed");
        self.disposed = true;
        self.enabled = false;
        self.pointer = None;
        self.applier.reset();
    }

    /// Whether tracking is currently enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.disposed
    }

    /// Current performance level
    #[must_use]
    pub fn performance_level(&self) -> PerformanceLevel {
        self.level
    }

    /// Instrumentation counters
    #[must_use]
    pub fn stats(&self) -> TrackingStats {
        self.stats
    }

    /// Head channel's current yaw/pitch in radians (diagnostics)
    #[must_use]
    pub fn head_angles(&self) -> (f32, f32) {
        (self.head.current_yaw(), self.head.current_pitch())
    }

    /// Eye channel's current target yaw/pitch in radians (diagnostics)
    #[must_use]
    pub fn eye_target_angles(&self) -> (f32, f32) {
        (self.eye.target_yaw(), self.eye.target_pitch())
    }
}
