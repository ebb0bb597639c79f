//! Demo binary: runs the tracking controller against a synthetic rig and a
//! scripted pointer sweep, printing the resulting angles and counters.

use anyhow::Result;
use clap::Parser;
use cursor_follow::config::TrackingConfig;
use cursor_follow::controller::{CursorFollowController, FrameContext};
use cursor_follow::gaze_solver::{SurfaceBounds, ViewportSource};
use cursor_follow::math::CameraView;
use cursor_follow::performance::PerformanceLevel;
use cursor_follow::rig::{JointPose, Skeleton, TrackedJoint};
use cursor_follow::weight::AnimationState;
use glam::{Quat, Vec3};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Performance level (off, low, medium, high)
    #[arg(short, long, default_value = "high")]
    level: String,

    /// Number of frames to simulate
    #[arg(short = 'n', long, default_value = "600")]
    frames: u32,

    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Fixed 800x600 render surface
struct DemoViewport;

impl ViewportSource for DemoViewport {
    fn surface_bounds(&self) -> SurfaceBounds {
        SurfaceBounds {
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Static idle: full tracking weight
struct DemoAnimState;

impl AnimationState for DemoAnimState {
    fn is_one_shot_action_playing(&self) -> bool {
        false
    }

    fn is_idle_cycle_playing(&self) -> bool {
        false
    }

    fn is_manual_drag_in_progress(&self) -> bool {
        false
    }
}

/// Two-joint skeleton standing at the origin
struct DemoRig {
    neck: Quat,
    head: Quat,
}

impl DemoRig {
    fn new() -> Self {
        Self {
            neck: Quat::IDENTITY,
            head: Quat::IDENTITY,
        }
    }

    /// The host's animation pass: rewrite the base pose each frame
    fn evaluate_base_pose(&mut self) {
        self.neck = Quat::IDENTITY;
        self.head = Quat::IDENTITY;
    }
}

impl Skeleton for DemoRig {
    fn joint(&self, joint: TrackedJoint) -> Option<JointPose> {
        let (local, height) = match joint {
            TrackedJoint::Neck => (self.neck, 1.4),
            TrackedJoint::Head => (self.head, 1.5),
        };
        Some(JointPose {
            world_position: Vec3::new(0.0, height, 0.0),
            world_orientation: local,
            parent_orientation: Quat::IDENTITY,
            local_rotation: local,
        })
    }

    fn set_local_rotation(&mut self, joint: TrackedJoint, rotation: Quat) {
        match joint {
            TrackedJoint::Neck => self.neck = rotation,
            TrackedJoint::Head => self.head = rotation,
        }
    }

    fn root_orientation(&self) -> Quat {
        Quat::IDENTITY
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Cursor Follow - tracking demo");

    let config = if let Some(path) = &args.config {
        info!("Loading configuration from: {path}");
        match TrackingConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                TrackingConfig::with_defaults()
            }
        }
    } else {
        TrackingConfig::with_defaults()
    };

    let mut controller = CursorFollowController::from_config(&config)?;
    let level = match args.level.to_lowercase().as_str() {
        "off" => PerformanceLevel::Off,
        "low" => PerformanceLevel::Low,
        "medium" => PerformanceLevel::Medium,
        _ => PerformanceLevel::High,
    };
    controller.set_performance_level(level);

    let mut rig = DemoRig::new();
    let camera = CameraView {
        position: Vec3::new(0.0, 1.5, 2.0),
        orientation: Quat::IDENTITY,
        fov_y: 50f32.to_radians(),
        aspect: 800.0 / 600.0,
    };

    let dt = 1.0 / args.fps as f32;
    let frame_ms = 1000.0 / f64::from(args.fps);

    for frame in 0..args.frames {
        let now_ms = f64::from(frame) * frame_ms;

        // Scripted pointer: a slow figure-eight across the surface
        let t = now_ms / 1000.0;
        let px = 400.0 + 300.0 * (t * 0.8).sin() as f32;
        let py = 300.0 + 180.0 * (t * 1.6).sin() as f32;
        controller.notify_pointer(px, py, now_ms);

        let ctx = FrameContext {
            camera,
            viewport: &DemoViewport,
            animation: &DemoAnimState,
            now_ms,
        };
        controller.update_target(dt, &ctx, &rig);
        rig.evaluate_base_pose();
        controller.apply_head(&mut rig);

        if frame % args.fps.max(1) == 0 {
            let (yaw, pitch) = controller.head_angles();
            let eye = controller.eye_gaze_target();
            info!(
                "t={:5.1}s pointer=({px:5.0},{py:5.0}) head yaw={:6.2}deg pitch={:6.2}deg eye=({:.2}, {:.2}, {:.2})",
                t,
                yaw.to_degrees(),
                pitch.to_degrees(),
                eye.x,
                eye.y,
                eye.z
            );
        }
    }

    let stats = controller.stats();
    info!(
        "done: {} solves, {} bone writes, {} skipped solves over {} frames",
        stats.solves, stats.bone_writes, stats.skipped_solves, args.frames
    );

    Ok(())
}
