//! Sphere primitive.

use crate::hit::{HitRecord, HitTest};
use glint_math::{Ray, Vec3};

/// A sphere with its shading material referenced by index.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    pub material_index: usize,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(origin: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            origin,
            radius,
            material_index,
        }
    }

    /// Geometric ray/sphere solve.
    ///
    /// Projects the center onto the ray and rejects when the perpendicular
    /// offset exceeds the radius, then recovers the near intersection from
    /// the right triangle formed by the projection. Better conditioned at
    /// grazing angles than the quadratic discriminant form.
    fn near_intersection(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.origin - ray.origin;
        let projection = to_center.dot(ray.direction);
        let offset_sq = to_center.length_squared() - projection * projection;

        let radius_sq = self.radius * self.radius;
        if offset_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - offset_sq).sqrt();
        let t = projection - half_chord;

        ray.accepts(t).then_some(t)
    }
}

impl HitTest for Sphere {
    fn hit_closest(&self, ray: &Ray, record: &mut HitRecord) -> bool {
        let Some(t) = self.near_intersection(ray) else {
            return false;
        };
        if t >= record.t {
            return false;
        }

        let point = ray.at(t);
        record.did_hit = true;
        record.t = t;
        record.point = point;
        // Magnitude is the radius, so dividing normalizes
        record.normal = (point - self.origin) / self.radius;
        record.material_index = self.material_index;
        true
    }

    fn hit_any(&self, ray: &Ray) -> bool {
        self.near_intersection(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axial_hit_distance() {
        // Fired straight at the center from distance d, the hit is at d - r
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 50.0, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut record = HitRecord::default();
        assert!(sphere.hit_closest(&ray, &mut record));
        assert!(record.did_hit);
        assert!((record.t - 50.0).abs() < 1e-3);
        assert_eq!(record.material_index, 1);
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 50.0, 0);

        // Direction clears the sphere entirely
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut record = HitRecord::default();

        assert!(!sphere.hit_closest(&ray, &mut record));
        assert!(!record.did_hit);
        assert!(!sphere.hit_any(&ray));
    }

    #[test]
    fn test_sphere_behind_origin_rejected() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -100.0), 50.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(!sphere.hit_any(&ray));
    }

    #[test]
    fn test_normal_is_unit_and_outward() {
        let center = Vec3::new(2.0, -1.0, 30.0);
        let sphere = Sphere::new(center, 5.0, 0);
        let ray = Ray::new(Vec3::ZERO, (center - Vec3::ZERO).normalize());

        let mut record = HitRecord::default();
        assert!(sphere.hit_closest(&ray, &mut record));

        assert!((record.normal.length() - 1.0).abs() < 1e-5);
        assert!(record.normal.dot(record.point - center) > 0.0);
    }

    #[test]
    fn test_keep_closest_does_not_overwrite_nearer_hit() {
        let far_sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 10.0, 2);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut record = HitRecord::default();
        record.did_hit = true;
        record.t = 5.0;
        record.material_index = 7;

        assert!(!far_sphere.hit_closest(&ray, &mut record));
        assert_eq!(record.t, 5.0);
        assert_eq!(record.material_index, 7);
    }

    #[test]
    fn test_shadow_ray_bounds() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 10.0, 0);

        // Occluder sits past the light distance
        let ray = Ray::with_bounds(Vec3::ZERO, Vec3::Z, 1e-4, 50.0);
        assert!(!sphere.hit_any(&ray));

        let ray = Ray::with_bounds(Vec3::ZERO, Vec3::Z, 1e-4, 200.0);
        assert!(sphere.hit_any(&ray));
    }
}
