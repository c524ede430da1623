//! Hit records, cull modes, and the intersection trait.

use glint_math::{Ray, Vec3};

/// Result of an intersection query.
///
/// The default record is the "no hit" state: `did_hit` false and `t` at
/// infinity, so any accepted intersection compares closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub did_hit: bool,
    /// Parametric distance along the ray
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit surface normal at the hit point
    pub normal: Vec3,
    /// Index into the scene's material list
    pub material_index: usize,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            did_hit: false,
            t: f32::INFINITY,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            material_index: 0,
        }
    }
}

/// Which triangle winding a ray may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    #[default]
    None,
    BackFace,
    FrontFace,
}

impl CullMode {
    /// The mode occlusion queries test with.
    ///
    /// Shadow rays travel hit-to-light, so the face a camera ray would cull
    /// is exactly the face that must still occlude. `hit_any` flips the mode
    /// before testing; `None` is unaffected.
    pub fn flipped(self) -> Self {
        match self {
            CullMode::None => CullMode::None,
            CullMode::BackFace => CullMode::FrontFace,
            CullMode::FrontFace => CullMode::BackFace,
        }
    }
}

/// Intersection tests every primitive category implements.
pub trait HitTest {
    /// Test for the closest hit.
    ///
    /// Writes `record` only when the intersection parameter lies strictly
    /// inside `(ray.t_min, ray.t_max)` and is closer than `record.t`
    /// (strict `<`, ties keep the earlier hit). Returns whether the record
    /// was updated.
    fn hit_closest(&self, ray: &Ray, record: &mut HitRecord) -> bool;

    /// Existence-only test, short-circuiting on the first accepted hit.
    ///
    /// Used for shadow/occlusion rays; culled primitives flip their cull
    /// mode first (see [`CullMode::flipped`]).
    fn hit_any(&self, ray: &Ray) -> bool;
}
