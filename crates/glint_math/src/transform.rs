// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3() and inverse(); these
// extensions add the direction and bounding-box cases ray tracing needs.

use crate::Aabb;
use glam::{Mat4, Vec3};

/// Extension trait for Mat4 with ray-tracing transform helpers.
pub trait Mat4Ext {
    /// Transform a direction (w = 0): rotation and scale apply, translation
    /// does not.
    fn transform_vector3(&self, vector: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    ///
    /// The result bounds all 8 transformed corners, so it stays axis-aligned
    /// (and conservative) under rotation.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        let v4 = *self * vector.extend(0.0);
        v4.truncate()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let (lo, hi) = aabb.corners();

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        // Each corner picks min or max per axis from the 3-bit index
        for corner in 0..8u8 {
            let point = Vec3::new(
                if corner & 1 == 0 { lo.x } else { hi.x },
                if corner & 2 == 0 { lo.y } else { hi.y },
                if corner & 4 == 0 { lo.z } else { hi.z },
            );
            let transformed = self.transform_point3(point);
            min = min.min(transformed);
            max = max.max(transformed);
        }

        Aabb::from_points(min, max)
    }
}
