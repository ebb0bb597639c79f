//! Gaze-target solving: pointer position to world-space gaze angles.
//!
//! The solver casts a ray from the camera through the pointer's normalized
//! screen position, intersects it with a fixed-radius sphere centered on the
//! head, and decomposes the resulting direction into yaw/pitch. The eye
//! channel consumes a camera-relative decomposition, the head channel a
//! model-relative one; that asymmetry matches the observed behavior of the
//! original system and is deliberately not unified.

use glam::{Quat, Vec3};
use log::debug;

use crate::constants::EPSILON;
use crate::math::{pixel_to_ndc, Basis, CameraView, Ray};

/// Render-surface bounds in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Host-supplied provider of the current render-surface bounds
pub trait ViewportSource {
    /// Current bounds of the render surface in screen pixels
    fn surface_bounds(&self) -> SurfaceBounds;
}

/// Timestamp-keyed memoization of the render-surface bounds.
///
/// Querying surface geometry can be costly on some hosts, so the bounds are
/// refetched only after a fixed refresh interval has elapsed.
pub struct BoundsCache {
    cached: Option<SurfaceBounds>,
    fetched_at_ms: f64,
    refresh_interval_ms: f64,
}

impl BoundsCache {
    /// Create a cache with the given refresh interval in milliseconds
    #[must_use]
    pub fn new(refresh_interval_ms: f64) -> Self {
        Self {
            cached: None,
            fetched_at_ms: 0.0,
            refresh_interval_ms,
        }
    }

    /// Bounds as of `now_ms`, refetching when the cache has gone stale
    pub fn get(&mut self, now_ms: f64, source: &dyn ViewportSource) -> SurfaceBounds {
        match self.cached {
            Some(bounds) if now_ms - self.fetched_at_ms < self.refresh_interval_ms => bounds,
            _ => {
                let bounds = source.surface_bounds();
                self.cached = Some(bounds);
                self.fetched_at_ms = now_ms;
                bounds
            }
        }
    }

    /// Force a refetch on the next `get`
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Latest pointer sample recorded by the host's input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Screen-space X in pixels
    pub x: f32,
    /// Screen-space Y in pixels
    pub y: f32,
    /// Sample timestamp in milliseconds
    pub timestamp_ms: f64,
}

/// Solved gaze angles in some basis, before clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// Converts pointer positions into gaze directions and angles
pub struct GazeSolver {
    sphere_radius: f32,
}

impl GazeSolver {
    /// Create a solver with the given gaze-sphere radius
    ///
    /// # Panics
    ///
    /// Panics if the radius is not positive
    #[must_use]
    pub fn new(sphere_radius: f32) -> Self {
        assert!(sphere_radius > 0.0, "Gaze sphere radius must be positive");
        Self { sphere_radius }
    }

    /// Solve the world-space gaze direction from the head toward the point
    /// the pointer indicates.
    ///
    /// The camera ray is intersected with a sphere of the configured radius
    /// around `head_position`, preferring the farther root; a miss falls
    /// back to the nearest point on the ray. A degenerate direction (the
    /// pointer exactly on the head's projection with the ray origin inside
    /// the sphere collapsing the difference) falls back to looking toward
    /// the camera rather than propagating NaN.
    #[must_use]
    pub fn solve_direction(
        &self,
        camera: &CameraView,
        bounds: SurfaceBounds,
        pointer: PointerSample,
        head_position: Vec3,
    ) -> Vec3 {
        let (ndc_x, ndc_y) = pixel_to_ndc(
            pointer.x,
            pointer.y,
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height,
        );
        let ray = Ray::through_ndc(camera, ndc_x, ndc_y);

        let target = ray
            .intersect_sphere_far(head_position, self.sphere_radius)
            .unwrap_or_else(|| {
                debug!("gaze ray missed sphere, using closest point fallback");
                ray.closest_point(head_position)
            });

        match (target - head_position).try_normalize() {
            Some(dir) => dir,
            None => (camera.position - head_position)
                .try_normalize()
                .unwrap_or(Vec3::Z),
        }
    }

    /// Decompose a world direction in the camera-relative basis (eye channel)
    #[must_use]
    pub fn camera_relative_angles(camera: &CameraView, dir: Vec3) -> GazeAngles {
        let basis = Basis::from_orientation(camera.orientation);
        let (yaw, pitch) = basis.decompose(dir);
        GazeAngles { yaw, pitch }
    }

    /// Decompose a world direction in the rig root's local frame (head
    /// channel), honoring the probed forward-axis sign.
    ///
    /// The solved direction points away from the camera on a sphere hit, so
    /// yaw is measured against the model's *backward* axis: for a figure
    /// facing the camera this reads as the gaze the viewer actually sees,
    /// and the pointer sitting on the head's projection reads as exactly
    /// zero. Fallback directions pointing toward the camera read an obtuse
    /// yaw that downstream clamping pins at the channel limits.
    #[must_use]
    pub fn model_relative_angles(root_orientation: Quat, forward_sign: f32, dir: Vec3) -> GazeAngles {
        let local = root_orientation.inverse() * dir;
        let x = forward_sign * local.x;
        let z = -forward_sign * local.z;

        let horizontal = x.hypot(z);
        if horizontal < EPSILON && local.y.abs() < EPSILON {
            return GazeAngles { yaw: 0.0, pitch: 0.0 };
        }

        GazeAngles {
            yaw: x.atan2(z),
            pitch: local.y.atan2(horizontal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedViewport(SurfaceBounds);

    impl ViewportSource for FixedViewport {
        fn surface_bounds(&self) -> SurfaceBounds {
            self.0
        }
    }

    fn bounds() -> SurfaceBounds {
        SurfaceBounds {
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    fn camera() -> CameraView {
        // Looking down -Z from two units out
        CameraView {
            position: Vec3::new(0.0, 1.5, 2.0),
            orientation: Quat::IDENTITY,
            fov_y: 50f32.to_radians(),
            aspect: 800.0 / 600.0,
        }
    }

    #[test]
    fn test_center_pointer_yields_near_zero_angles() {
        let solver = GazeSolver::new(0.6);
        // Head directly ahead of the camera at its screen center
        let head = Vec3::new(0.0, 1.5, 0.0);
        let pointer = PointerSample {
            x: 400.0,
            y: 300.0,
            timestamp_ms: 0.0,
        };

        let dir = solver.solve_direction(&camera(), bounds(), pointer, head);
        let angles = GazeSolver::camera_relative_angles(&camera(), dir);
        assert!(angles.yaw.abs() < 1e-4, "yaw {}", angles.yaw);
        assert!(angles.pitch.abs() < 1e-4, "pitch {}", angles.pitch);
    }

    #[test]
    fn test_direction_is_always_unit_length() {
        let solver = GazeSolver::new(0.6);
        let head = Vec3::new(0.0, 1.5, 0.0);
        for (x, y) in [(0.0, 0.0), (800.0, 600.0), (400.0, 300.0), (-500.0, 9000.0)] {
            let dir = solver.solve_direction(
                &camera(),
                bounds(),
                PointerSample {
                    x,
                    y,
                    timestamp_ms: 0.0,
                },
                head,
            );
            assert!((dir.length() - 1.0).abs() < 1e-4);
            assert!(dir.is_finite());
        }
    }

    #[test]
    fn test_degenerate_falls_back_toward_camera() {
        let solver = GazeSolver::new(0.6);
        // Head at the camera position makes every difference degenerate
        let head = camera().position;
        let dir = solver.solve_direction(
            &camera(),
            bounds(),
            PointerSample {
                x: 400.0,
                y: 300.0,
                timestamp_ms: 0.0,
            },
            head,
        );
        assert!(dir.is_finite());
        assert!((dir.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_model_relative_respects_forward_sign() {
        // Backward-and-right of a +Z-facing model
        let dir = Vec3::new(0.5, 0.0, -0.5).normalize();
        let plus = GazeSolver::model_relative_angles(Quat::IDENTITY, 1.0, dir);
        let minus = GazeSolver::model_relative_angles(Quat::IDENTITY, -1.0, dir);
        assert!((plus.yaw - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        // Opposite facing convention re-measures against the other axis
        assert!((minus.yaw.abs() - 3.0 * std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_model_relative_backward_axis_is_zero() {
        // The far-root direction for a centered pointer is the model's
        // backward axis, which must decompose to exactly zero
        let angles = GazeSolver::model_relative_angles(Quat::IDENTITY, 1.0, Vec3::NEG_Z);
        assert_eq!(angles.yaw, 0.0);
        assert_eq!(angles.pitch, 0.0);
    }

    #[test]
    fn test_bounds_cache_refreshes_after_interval() {
        let mut cache = BoundsCache::new(500.0);
        let viewport = FixedViewport(bounds());

        let first = cache.get(0.0, &viewport);
        assert_eq!(first, bounds());

        // Within the interval the cached value is reused even if the source
        // changed
        let moved = FixedViewport(SurfaceBounds {
            left: 100.0,
            ..bounds()
        });
        assert_eq!(cache.get(400.0, &moved), bounds());
        assert_eq!(cache.get(600.0, &moved).left, 100.0);
    }

    #[test]
    fn test_bounds_cache_invalidate() {
        let mut cache = BoundsCache::new(500.0);
        let viewport = FixedViewport(bounds());
        cache.get(0.0, &viewport);

        let moved = FixedViewport(SurfaceBounds {
            left: 50.0,
            ..bounds()
        });
        cache.invalidate();
        assert_eq!(cache.get(1.0, &moved).left, 50.0);
    }

    #[test]
    #[should_panic(expected = "Gaze sphere radius must be positive")]
    fn test_zero_radius_panics() {
        let _ = GazeSolver::new(0.0);
    }
}
