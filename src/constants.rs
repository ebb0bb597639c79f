//! Constants used throughout the library

/// One-euro filter minimum cutoff frequency (Hz)
pub const DEFAULT_MIN_CUTOFF: f32 = 1.0;

/// One-euro filter speed coefficient
pub const DEFAULT_BETA: f32 = 0.3;

/// One-euro filter derivative cutoff frequency (Hz)
pub const DEFAULT_D_CUTOFF: f32 = 1.0;

/// Eye channel smoothing speed (1/s); eyes lead the head
pub const DEFAULT_EYE_SMOOTH_SPEED: f32 = 18.0;

/// Head channel smoothing speed (1/s)
pub const DEFAULT_HEAD_SMOOTH_SPEED: f32 = 6.0;

/// Eye channel angle limits (degrees)
pub const DEFAULT_EYE_MAX_YAW_DEG: f32 = 35.0;
pub const DEFAULT_EYE_MAX_PITCH_UP_DEG: f32 = 25.0;
pub const DEFAULT_EYE_MAX_PITCH_DOWN_DEG: f32 = 25.0;
pub const DEFAULT_EYE_DEADZONE_DEG: f32 = 1.5;

/// Head channel angle limits (degrees)
pub const DEFAULT_HEAD_MAX_YAW_DEG: f32 = 30.0;
pub const DEFAULT_HEAD_MAX_PITCH_UP_DEG: f32 = 15.0;
pub const DEFAULT_HEAD_MAX_PITCH_DOWN_DEG: f32 = 20.0;
pub const DEFAULT_HEAD_DEADZONE_DEG: f32 = 3.0;

/// Share of the head turn carried by the neck joint
pub const NECK_CONTRIBUTION: f32 = 0.6;

/// Share of the head turn carried by the head joint
pub const HEAD_CONTRIBUTION: f32 = 0.4;

/// Radius of the gaze sphere centered on the head (world units)
pub const DEFAULT_GAZE_SPHERE_RADIUS: f32 = 0.6;

/// Distance from the head at which the eye gaze point is reconstructed
pub const DEFAULT_LOOK_AT_DISTANCE: f32 = 0.6;

/// Tracking weight while a manual drag/orbit is in progress
pub const DRAG_WEIGHT: f32 = 0.15;

/// Tracking weight while a cyclic idle animation is playing
pub const IDLE_CYCLE_WEIGHT: f32 = 0.7;

/// Weight transition duration (seconds)
pub const DEFAULT_WEIGHT_TRANSITION_SECS: f32 = 0.2;

/// Weight below which bone application is skipped entirely
pub const WEIGHT_EPSILON: f32 = 1e-3;

/// Angle offset below which bone application is skipped (radians)
pub const ANGLE_EPSILON: f32 = 1e-4;

/// Pointer is considered idle after this much time without movement (ms)
pub const POINTER_IDLE_MS: f64 = 100.0;

/// Pointer movement below this distance does not count as movement (pixels)
pub const POINTER_MOVE_THRESHOLD_PX: f32 = 1.0;

/// Render-surface bounds cache refresh interval (ms)
pub const BOUNDS_REFRESH_MS: f64 = 500.0;

/// Numeric precision epsilon
pub const EPSILON: f32 = 1e-6;
