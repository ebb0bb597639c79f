//! Additive neck/head rotation on top of the animated base pose.
//!
//! Every frame, after the host's skeleton update, the base local rotations
//! of the tracked joints are snapshotted; the tracking offset is then
//! composed onto the snapshot rather than onto the live value, so repeated
//! application can never accumulate drift into the base pose.

use glam::Quat;
use log::{debug, info};

use crate::constants::{ANGLE_EPSILON, HEAD_CONTRIBUTION, NECK_CONTRIBUTION};
use crate::rig::{Skeleton, TrackedJoint};

/// Base local rotations captured once per frame
#[derive(Debug, Clone, Copy, Default)]
struct PoseSnapshot {
    neck: Option<Quat>,
    head: Option<Quat>,
}

/// Applies the head channel's angles to the rig's neck and head joints
pub struct BoneRotationApplier {
    neck_contribution: f32,
    head_contribution: f32,
    base: PoseSnapshot,
    default_pose: Option<PoseSnapshot>,
}

impl Default for BoneRotationApplier {
    fn default() -> Self {
        Self::new(NECK_CONTRIBUTION, HEAD_CONTRIBUTION)
    }
}

impl BoneRotationApplier {
    /// Create an applier with the given neck/head contribution split.
    ///
    /// A rig without a neck joint routes the full turn to the head.
    ///
    /// # Panics
    ///
    /// Panics if either contribution is negative
    #[must_use]
    pub fn new(neck_contribution: f32, head_contribution: f32) -> Self {
        assert!(neck_contribution >= 0.0, "Neck contribution must be non-negative");
        assert!(head_contribution >= 0.0, "Head contribution must be non-negative");
        Self {
            neck_contribution,
            head_contribution,
            base: PoseSnapshot::default(),
            default_pose: None,
        }
    }

    /// Capture this frame's base pose, immediately after the host's
    /// skeleton update. The first capture also becomes the default pose
    /// used to restore the rig when tracking is disabled.
    pub fn snapshot_base_pose(&mut self, skeleton: &dyn Skeleton) {
        self.base = PoseSnapshot {
            neck: skeleton.joint(TrackedJoint::Neck).map(|j| j.local_rotation),
            head: skeleton.joint(TrackedJoint::Head).map(|j| j.local_rotation),
        };

        if self.default_pose.is_none() {
            self.default_pose = Some(self.base);
            info!(
                "captured default pose (neck: {}, head: {})",
                self.base.neck.is_some(),
                self.base.head.is_some()
            );
        }
    }

    /// Apply the weighted tracking offset onto the snapshotted base pose.
    ///
    /// `yaw`/`pitch` are the head channel's current model-relative angles;
    /// `forward_sign` is the probed rig forward-axis convention. Returns
    /// the number of joint rotations written.
    pub fn apply(
        &self,
        skeleton: &mut dyn Skeleton,
        yaw: f32,
        pitch: f32,
        weight: f32,
        forward_sign: f32,
    ) -> u32 {
        let mut writes = 0;
        let head_share = if self.base.neck.is_some() {
            self.head_contribution
        } else {
            // No neck: the head carries the whole turn
            self.neck_contribution + self.head_contribution
        };

        if let Some(base) = self.base.neck {
            writes += Self::apply_joint(
                skeleton,
                TrackedJoint::Neck,
                base,
                yaw * self.neck_contribution * weight,
                pitch * self.neck_contribution * weight,
                forward_sign,
            );
        }
        if let Some(base) = self.base.head {
            writes += Self::apply_joint(
                skeleton,
                TrackedJoint::Head,
                base,
                yaw * head_share * weight,
                pitch * head_share * weight,
                forward_sign,
            );
        }
        writes
    }

    fn apply_joint(
        skeleton: &mut dyn Skeleton,
        joint: TrackedJoint,
        base_local: Quat,
        yaw: f32,
        pitch: f32,
        forward_sign: f32,
    ) -> u32 {
        // The skeleton update just wrote the base pose, so a sub-epsilon
        // offset needs no write at all
        if yaw.abs() < ANGLE_EPSILON && pitch.abs() < ANGLE_EPSILON {
            return 0;
        }

        let Some(pose) = skeleton.joint(joint) else {
            return 0;
        };

        // Model-space offset, yaw then pitch. Positive pitch looks up; the
        // X-axis rotation sign depends on the rig's forward convention.
        let offset_model =
            Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-forward_sign * pitch);

        // Model space -> world -> the joint's parent-local space
        let root = skeleton.root_orientation();
        let to_parent_local = pose.parent_orientation.inverse() * root;
        let offset_local = to_parent_local * offset_model * to_parent_local.inverse();

        skeleton.set_local_rotation(joint, (offset_local * base_local).normalize());
        1
    }

    /// Restore the tracked joints to the captured default pose.
    ///
    /// Returns the number of joints written; zero when no default pose has
    /// been captured yet.
    pub fn restore_default_pose(&self, skeleton: &mut dyn Skeleton) -> u32 {
        let Some(pose) = self.default_pose else {
            return 0;
        };
        let mut writes = 0;
        if let Some(rotation) = pose.neck {
            skeleton.set_local_rotation(TrackedJoint::Neck, rotation);
            writes += 1;
        }
        if let Some(rotation) = pose.head {
            skeleton.set_local_rotation(TrackedJoint::Head, rotation);
            writes += 1;
        }
        debug!("restored default pose ({writes} joints)");
        writes
    }

    /// Forget captured poses (model swap)
    pub fn reset(&mut self) {
        self.base = PoseSnapshot::default();
        self.default_pose = None;
    }
}
