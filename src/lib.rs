//! Cursor-follow: avatar gaze and head tracking toward the pointer.
//!
//! This library makes a rendered humanoid figure visually track a pointing
//! device: the eyes fixate a world-space point derived from the cursor
//! position, and the head/neck rotate toward the same point with slower,
//! weighted, bounded motion applied additively on top of the externally
//! animated skeleton.
//!
//! The pipeline per frame:
//! 1. The host records pointer samples via `notify_pointer` (no computation)
//! 2. `update_target` (before the skeleton update) runs rate-limited gaze
//!    solves into the channel targets and advances per-frame smoothing
//! 3. The host evaluates its base animation onto the skeleton
//! 4. `apply_head` (after the skeleton update) snapshots the base pose and
//!    premultiplies the weighted head offset onto the neck/head joints
//!
//! Raw solved angles pass through one-euro adaptive filters, so the figure
//! is steady while the pointer rests and responsive while it moves. A
//! four-tier performance level throttles only the solve cadence; smoothing
//! and bone application run every frame.
//!
//! # Examples
//!
//! ```no_run
//! use cursor_follow::controller::{CursorFollowController, FrameContext};
//! use cursor_follow::gaze_solver::{SurfaceBounds, ViewportSource};
//! use cursor_follow::math::CameraView;
//! use cursor_follow::rig::{JointPose, Skeleton, TrackedJoint};
//! use cursor_follow::weight::AnimationState;
//! use glam::{Quat, Vec3};
//!
//! struct Viewport;
//!
//! impl ViewportSource for Viewport {
//!     fn surface_bounds(&self) -> SurfaceBounds {
//!         SurfaceBounds { left: 0.0, top: 0.0, width: 800.0, height: 600.0 }
//!     }
//! }
//!
//! struct AnimState;
//!
//! impl AnimationState for AnimState {
//!     fn is_one_shot_action_playing(&self) -> bool { false }
//!     fn is_idle_cycle_playing(&self) -> bool { false }
//!     fn is_manual_drag_in_progress(&self) -> bool { false }
//! }
//!
//! struct Rig { head: Quat }
//!
//! impl Skeleton for Rig {
//!     fn joint(&self, joint: TrackedJoint) -> Option<JointPose> {
//!         match joint {
//!             TrackedJoint::Head => Some(JointPose {
//!                 world_position: Vec3::new(0.0, 1.5, 0.0),
//!                 world_orientation: self.head,
//!                 parent_orientation: Quat::IDENTITY,
//!                 local_rotation: self.head,
//!             }),
//!             TrackedJoint::Neck => None,
//!         }
//!     }
//!
//!     fn set_local_rotation(&mut self, joint: TrackedJoint, rotation: Quat) {
//!         if joint == TrackedJoint::Head {
//!             self.head = rotation;
//!         }
//!     }
//!
//!     fn root_orientation(&self) -> Quat {
//!         Quat::IDENTITY
//!     }
//! }
//!
//! let mut controller = CursorFollowController::new();
//! let mut rig = Rig { head: Quat::IDENTITY };
//! let camera = CameraView {
//!     position: Vec3::new(0.0, 1.5, 2.0),
//!     orientation: Quat::IDENTITY,
//!     fov_y: 50f32.to_radians(),
//!     aspect: 800.0 / 600.0,
//! };
//!
//! // Host render loop
//! for frame in 0u32..600 {
//!     let now_ms = f64::from(frame) * 16.0;
//!     controller.notify_pointer(600.0, 200.0, now_ms);
//!
//!     let ctx = FrameContext {
//!         camera,
//!         viewport: &Viewport,
//!         animation: &AnimState,
//!         now_ms,
//!     };
//!     controller.update_target(0.016, &ctx, &rig);
//!
//!     // ... host evaluates its base animation onto the rig here ...
//!
//!     controller.apply_head(&mut rig);
//!
//!     // Feed the external look-at system
//!     let _eye_point = controller.eye_gaze_target();
//! }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use cursor_follow::config::TrackingConfig;
//! use cursor_follow::controller::CursorFollowController;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrackingConfig::from_file("tracking.yaml")?;
//! let controller = CursorFollowController::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

/// Additive neck/head rotation application
pub mod bone_applier;

/// Per-target smoothed tracking channels
pub mod channel;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// The cursor-follow orchestrator
pub mod controller;

/// Error types and result handling
pub mod error;

/// Adaptive signal filtering
pub mod filters;

/// Gaze-target solving from pointer positions
pub mod gaze_solver;

/// Geometry helpers for gaze solving
pub mod math;

/// Performance levels and solve scheduling
pub mod performance;

/// Skeleton interface supplied by the host
pub mod rig;

/// Animation-state-aware tracking weight
pub mod weight;

pub use error::{Error, Result};
