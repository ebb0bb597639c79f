//! Skeleton interface supplied by the host rendering/rig subsystem.
//!
//! The controller never owns the rig; the host passes a [`Skeleton`]
//! reference into each frame callback. Joints are looked up by role, and a
//! rig without a neck joint degrades gracefully to head-only (or, with no
//! head either, eye-only) tracking.

use glam::{Quat, Vec3};

/// Joints the controller may rotate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedJoint {
    /// Neck joint (optional on the rig)
    Neck,
    /// Head joint
    Head,
}

/// A snapshot of one joint's transforms, read once per frame
#[derive(Debug, Clone, Copy)]
pub struct JointPose {
    /// World-space joint position
    pub world_position: Vec3,
    /// World-space joint orientation
    pub world_orientation: Quat,
    /// World-space orientation of the joint's parent
    pub parent_orientation: Quat,
    /// Current local (parent-relative) rotation
    pub local_rotation: Quat,
}

/// Host-implemented access to the rig's named joints.
///
/// Reads reflect the pose as of the most recent skeleton/animation update.
/// Local-rotation writes must land on the same joints the reads came from.
pub trait Skeleton {
    /// Look up a tracked joint, `None` if the rig lacks it
    fn joint(&self, joint: TrackedJoint) -> Option<JointPose>;

    /// Overwrite a joint's local rotation; no-op for missing joints
    fn set_local_rotation(&mut self, joint: TrackedJoint, rotation: Quat);

    /// World orientation of the rig root
    fn root_orientation(&self) -> Quat;
}

/// Probe which sign convention the rig uses for its forward axis.
///
/// Rig authoring tools disagree on whether a humanoid faces local +Z or -Z;
/// the common -Z export carries a 180-degree root rotation about Y. The
/// probe rotates local +Z through the root orientation and keeps the sign
/// of its world-Z component. Cached at attach time and after `reset()`.
#[must_use]
pub fn probe_forward_sign(skeleton: &dyn Skeleton) -> f32 {
    let world_forward = skeleton.root_orientation() * Vec3::Z;
    if world_forward.z >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
