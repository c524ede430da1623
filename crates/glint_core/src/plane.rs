//! Infinite plane primitive.

use crate::hit::{HitRecord, HitTest};
use glint_math::{Ray, Vec3};

/// An infinite plane through `origin` with the given unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material_index: usize,
}

impl Plane {
    /// Create a new plane. The normal is normalized here, so callers may
    /// pass any non-zero vector along it.
    pub fn new(origin: Vec3, normal: Vec3, material_index: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
            material_index,
        }
    }

    /// Parametric solve for the intersection distance.
    ///
    /// A ray parallel to the plane divides by zero, giving ±infinity (or NaN
    /// when also coplanar); both fall outside the interval test, so no
    /// explicit parallel branch is needed.
    fn intersection(&self, ray: &Ray) -> Option<f32> {
        let t = (self.origin - ray.origin).dot(self.normal) / ray.direction.dot(self.normal);
        ray.accepts(t).then_some(t)
    }
}

impl HitTest for Plane {
    fn hit_closest(&self, ray: &Ray, record: &mut HitRecord) -> bool {
        let Some(t) = self.intersection(ray) else {
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
        self.intersection(ray).is_some()
    }
}
