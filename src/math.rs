//! Geometry helpers for gaze solving.
//!
//! Camera basis construction, pointer ray casting, ray/sphere intersection
//! and yaw/pitch angle composition in an arbitrary orthonormal basis.

use glam::{Quat, Vec3};

use crate::constants::EPSILON;

/// Camera state read once per solve
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    /// World-space camera position
    pub position: Vec3,
    /// World-space camera orientation
    pub orientation: Quat,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Width / height aspect ratio
    pub aspect: f32,
}

/// Orthonormal right/up/forward basis derived from an orientation
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Basis {
    /// Basis of a camera or rig orientation. Forward is -Z rotated by the
    /// orientation (right-handed, Y-up convention).
    #[must_use]
    pub fn from_orientation(orientation: Quat) -> Self {
        Self {
            right: orientation * Vec3::X,
            up: orientation * Vec3::Y,
            forward: orientation * Vec3::NEG_Z,
        }
    }

    /// Decompose a world direction into (yaw, pitch) in this basis.
    ///
    /// Yaw is `atan2(right component, forward component)`; pitch is the
    /// elevation above the right/forward plane. Directions pointing against
    /// `forward` read an obtuse yaw, which downstream clamping pins at the
    /// channel limits. A degenerate direction yields (0, 0).
    #[must_use]
    pub fn decompose(&self, dir: Vec3) -> (f32, f32) {
        let x = dir.dot(self.right);
        let y = dir.dot(self.up);
        let z = dir.dot(self.forward);

        let horizontal = x.hypot(z);
        if horizontal < EPSILON && y.abs() < EPSILON {
            return (0.0, 0.0);
        }

        (x.atan2(z), y.atan2(horizontal))
    }

    /// Reconstruct a unit direction from (yaw, pitch) in this basis
    #[must_use]
    pub fn compose(&self, yaw: f32, pitch: f32) -> Vec3 {
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        self.forward * (cp * cy) + self.right * (cp * sy) + self.up * sp
    }
}

/// A world-space ray with a normalized direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build the camera ray through a normalized device coordinate.
    ///
    /// `ndc` is (-1..1, -1..1) with +Y up.
    #[must_use]
    pub fn through_ndc(camera: &CameraView, ndc_x: f32, ndc_y: f32) -> Self {
        let basis = Basis::from_orientation(camera.orientation);
        let tan_half_fov = (camera.fov_y * 0.5).tan();

        let direction = (basis.forward
            + basis.right * (ndc_x * tan_half_fov * camera.aspect)
            + basis.up * (ndc_y * tan_half_fov))
            .normalize_or_zero();

        // A zero direction can only come from pathological camera input;
        // fall back to straight ahead so callers never see NaN.
        let direction = if direction.length_squared() < EPSILON {
            basis.forward
        } else {
            direction
        };

        Self {
            origin: camera.position,
            direction,
        }
    }

    /// Intersect with a sphere, preferring the farther root.
    ///
    /// Returns the intersection point, or `None` when the ray misses. The
    /// farther root keeps the apparent gaze angle from compressing when the
    /// ray grazes the near side of the sphere.
    #[must_use]
    pub fn intersect_sphere_far(&self, center: Vec3, radius: f32) -> Option<Vec3> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;

        if disc < 0.0 {
            return None;
        }

        let t = -b + disc.sqrt();
        if t < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * t)
    }

    /// Closest point on the ray to a world point, clamped to the ray start
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let t = (point - self.origin).dot(self.direction).max(0.0);
        self.origin + self.direction * t
    }
}

/// Convert a surface pixel position to normalized device coordinates
#[must_use]
pub fn pixel_to_ndc(px: f32, py: f32, left: f32, top: f32, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let nx = ((px - left) / width).mul_add(2.0, -1.0);
    let ny = 1.0 - ((py - top) / height) * 2.0;
    (nx, ny)
}
