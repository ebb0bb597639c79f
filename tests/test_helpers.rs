//! Helper types shared by the integration tests

use cursor_follow::gaze_solver::{SurfaceBounds, ViewportSource};
use cursor_follow::math::CameraView;
use cursor_follow::rig::{JointPose, Skeleton, TrackedJoint};
use cursor_follow::weight::AnimationState;
use glam::{Quat, Vec3};

/// A two-joint skeleton with instrumented writes
pub struct MockSkeleton {
    pub neck: Option<Quat>,
    pub head: Option<Quat>,
    pub root: Quat,
    pub write_count: u32,
}

impl MockSkeleton {
    /// A rig with both neck and head joints at identity
    pub fn full() -> Self {
        Self {
            neck: Some(Quat::IDENTITY),
            head: Some(Quat::IDENTITY),
            root: Quat::IDENTITY,
            write_count: 0,
        }
    }

    /// A rig with a head but no neck
    pub fn without_neck() -> Self {
        Self {
            neck: None,
            ..Self::full()
        }
    }

    /// Rewrite the base pose, as the host's animation pass does each frame
    pub fn evaluate_base_pose(&mut self, neck: Quat, head: Quat) {
        if self.neck.is_some() {
            self.neck = Some(neck);
        }
        if self.head.is_some() {
            self.head = Some(head);
        }
    }
}

impl Skeleton for MockSkeleton {
    fn joint(&self, joint: TrackedJoint) -> Option<JointPose> {
        let (local, height) = match joint {
            TrackedJoint::Neck => (self.neck?, 1.4),
            TrackedJoint::Head => (self.head?, 1.5),
        };
        Some(JointPose {
            world_position: Vec3::new(0.0, height, 0.0),
            world_orientation: self.root * local,
            parent_orientation: self.root,
            local_rotation: local,
        })
    }

    fn set_local_rotation(&mut self, joint: TrackedJoint, rotation: Quat) {
        self.write_count += 1;
        match joint {
            TrackedJoint::Neck => {
                if self.neck.is_some() {
                    self.neck = Some(rotation);
                }
            }
            TrackedJoint::Head => {
                if self.head.is_some() {
                    self.head = Some(rotation);
                }
            }
        }
    }

    fn root_orientation(&self) -> Quat {
        self.root
    }
}

/// Fixed 800x600 viewport
pub struct TestViewport;

impl ViewportSource for TestViewport {
    fn surface_bounds(&self) -> SurfaceBounds {
        SurfaceBounds {
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Animation state with directly settable flags
#[derive(Default, Clone, Copy)]
pub struct TestAnimState {
    pub one_shot: bool,
    pub idle_cycle: bool,
    pub dragging: bool,
}

impl AnimationState for TestAnimState {
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

/// Camera two units in front of the mock skeleton's head, looking at it
pub fn test_camera() -> CameraView {
    CameraView {
        position: Vec3::new(0.0, 1.5, 2.0),
        orientation: Quat::IDENTITY,
        fov_y: 50f32.to_radians(),
        aspect: 800.0 / 600.0,
    }
}
