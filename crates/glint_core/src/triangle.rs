//! Triangle primitive and the shared Möller-Trumbore solve.

use crate::hit::{CullMode, HitRecord, HitTest};
use glint_math::{Ray, Vec3};

/// Determinants below this are treated as parallel/degenerate.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// A single triangle with a precomputed face normal.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Unit face normal, derived from the winding at construction
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material_index: usize,
}

impl Triangle {
    /// Create a triangle; the face normal follows the vertex winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material_index: usize) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: face_normal(v0, v1, v2),
            cull_mode,
            material_index,
        }
    }
}

/// Unit face normal of a winding; degenerate (zero-area) triangles fall back
/// to +Y so downstream math stays finite.
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).try_normalize().unwrap_or(Vec3::Y)
}

/// Möller-Trumbore intersection with culling.
///
/// The cull check runs against the face normal before the barycentric
/// solve: BackFace rejects rays that approach from behind the normal
/// (`dot(normal, dir) > 0`), FrontFace the opposite. Callers doing
/// occlusion-only queries pass a flipped mode.
pub(crate) fn intersect_triangle(
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    normal: Vec3,
    cull_mode: CullMode,
    ray: &Ray,
) -> Option<f32> {
    let facing = normal.dot(ray.direction);
    match cull_mode {
        CullMode::BackFace if facing > 0.0 => return None,
        CullMode::FrontFace if facing < 0.0 => return None,
        _ => {}
    }

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    ray.accepts(t).then_some(t)
}

impl HitTest for Triangle {
    fn hit_closest(&self, ray: &Ray, record: &mut HitRecord) -> bool {
        let Some(t) = intersect_triangle(self.v0, self.v1, self.v2, self.normal, self.cull_mode, ray)
        else {
            return false;
        };
        if t >= record.t {
            return false;
        }

        record.did_hit = true;
        record.t = t;
        record.point = ray.at(t);
        record.normal = self.normal;
        record.material_index = self.material_index;
        true
    }

    fn hit_any(&self, ray: &Ray) -> bool {
        intersect_triangle(
            self.v0,
            self.v1,
            self.v2,
            self.normal,
            self.cull_mode.flipped(),
            ray,
        )
        .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Triangle in the z = 1 plane, normal facing -Z (towards the origin)
    fn facing_triangle(cull_mode: CullMode) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            cull_mode,
            0,
        )
    }

    #[test]
    fn test_hit_and_barycentric_rejection() {
        let tri = facing_triangle(CullMode::None);

        let mut record = HitRecord::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(tri.hit_closest(&ray, &mut record));
        assert!((record.t - 1.0).abs() < 1e-5);

        // Inside the bounding box but outside the triangle
        let corner_ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::Z);
        assert!(!tri.hit_any(&corner_ray));
    }

    #[test]
    fn test_no_culling_accepts_both_windings() {
        let tri = facing_triangle(CullMode::None);

        let front = Ray::new(Vec3::ZERO, Vec3::Z);
        let back = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);

        let mut record = HitRecord::default();
        assert!(tri.hit_closest(&front, &mut record));
        let mut record = HitRecord::default();
        assert!(tri.hit_closest(&back, &mut record));
    }

    #[test]
    fn test_back_face_culling() {
        let tri = facing_triangle(CullMode::BackFace);

        // The normal points -Z: a ray travelling +Z sees the front face
        let front = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut record = HitRecord::default();
        assert!(tri.hit_closest(&front, &mut record));

        // Approaching from behind the normal is culled
        let back = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
        let mut record = HitRecord::default();
        assert!(!tri.hit_closest(&back, &mut record));
    }

    #[test]
    fn test_front_face_culling() {
        let tri = facing_triangle(CullMode::FrontFace);

        let front = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut record = HitRecord::default();
        assert!(!tri.hit_closest(&front, &mut record));

        let back = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
        let mut record = HitRecord::default();
        assert!(tri.hit_closest(&back, &mut record));
    }

    #[test]
    fn test_cull_inversion_law() {
        // hit_any with BackFaceCulling accepts exactly what hit_closest with
        // FrontFaceCulling accepts
        let back_culled = facing_triangle(CullMode::BackFace);
        let front_culled = facing_triangle(CullMode::FrontFace);

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::Z),
            Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z),
            Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Z),
        ];

        for ray in rays {
            let mut record = HitRecord::default();
            assert_eq!(
                back_culled.hit_any(&ray),
                front_culled.hit_closest(&ray, &mut record)
            );
        }
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        // Zero area: all vertices collinear
        let tri = Triangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            CullMode::None,
            0,
        );

        let ray = Ray::new(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert!(!tri.hit_any(&ray));
    }
}
