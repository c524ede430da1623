//! Pinhole camera with a yaw/pitch-driven orthonormal basis.

use glint_math::{Mat4, Mat4Ext, Vec3};

/// Camera snapshot used to generate primary rays.
///
/// `forward` is the only stored basis vector; right and up are derived from
/// it on every [`Camera::camera_to_world`] call, so the basis re-orthogonalizes
/// itself after any orientation change.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vec3,
    /// Vertical field of view in degrees
    pub fov_angle: f32,
    pub forward: Vec3,
    pub total_pitch: f32,
    pub total_yaw: f32,
}

impl Camera {
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        Self {
            origin,
            fov_angle,
            forward: Vec3::Z,
            total_pitch: 0.0,
            total_yaw: 0.0,
        }
    }

    /// Field-of-view scale applied to screen-space coordinates:
    /// `tan(half the fov angle in radians)`.
    pub fn fov_scale(&self) -> f32 {
        (self.fov_angle.to_radians() * 0.5).tan()
    }

    /// Rebuild `forward` from the accumulated pitch and yaw.
    ///
    /// Call after mutating `total_pitch`/`total_yaw`, before the frame's
    /// ray generation.
    pub fn update_orientation(&mut self) {
        let rotation = Mat4::from_rotation_y(self.total_yaw) * Mat4::from_rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector3(Vec3::Z).normalize();
    }

    /// Camera-to-world transform as an orthonormal basis matrix.
    ///
    /// Right and up are recomputed from `forward` via cross products; the
    /// world up axis only seeds the derivation.
    pub fn camera_to_world(&self) -> Mat4 {
        let right = Vec3::Y.cross(self.forward).normalize();
        let up = self.forward.cross(right).normalize();

        Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            self.forward.extend(0.0),
            self.origin.extend(1.0),
        )
    }
}
