//! Indexed triangle mesh with an AABB rejection test.
//!
//! A mesh keeps its authored (local) buffers pristine and derives the
//! world-space buffers from an accumulated transform. The contract for
//! animation is two-step and strictly ordered: mutate the transform
//! (`translate` / `set_rotation_y` / `set_scale`), then call
//! [`TriangleMesh::update_transforms`] before the next intersection query.
//! `update_transforms` rebuilds the world position and normal buffers and
//! the world AABB together, so queries never see one without the other.

use crate::error::MeshError;
use crate::hit::{CullMode, HitRecord, HitTest};
use crate::triangle::{face_normal, intersect_triangle};
use glint_math::{Aabb, Mat4, Mat4Ext, Ray, Vec3};

/// A triangle mesh over flat position/index/normal buffers.
///
/// Triangles are reconstructed per query from the flat world buffers; they
/// are never stored as [`crate::Triangle`] values. All triangles share one
/// material and one cull mode.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Authored vertex positions (local space)
    pub positions: Vec<Vec3>,
    /// Vertex-index triples, one per triangle
    pub indices: Vec<u32>,
    /// Per-triangle unit face normals (local space)
    pub normals: Vec<Vec3>,

    pub cull_mode: CullMode,
    pub material_index: usize,

    /// Derived world-space vertex positions
    pub positions_world: Vec<Vec3>,
    /// Derived world-space per-triangle normals
    pub normals_world: Vec<Vec3>,
    /// Bounds of the local positions
    pub aabb: Aabb,
    /// Bounds after the transform; every query tests against this first
    pub aabb_world: Aabb,

    translation: Vec3,
    rotation_y: f32,
    scale: Vec3,
}

impl TriangleMesh {
    /// Build a mesh and validate its topology.
    ///
    /// The index count must be a multiple of 3 and every index must address
    /// a vertex. Face normals and both AABBs are computed here; the mesh is
    /// immediately queryable.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        cull_mode: CullMode,
        material_index: usize,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: positions.len(),
            });
        }

        let mut mesh = Self {
            positions,
            indices,
            normals: Vec::new(),
            cull_mode,
            material_index,
            positions_world: Vec::new(),
            normals_world: Vec::new(),
            aabb: Aabb::EMPTY,
            aabb_world: Aabb::EMPTY,
            translation: Vec3::ZERO,
            rotation_y: 0.0,
            scale: Vec3::ONE,
        };

        mesh.calculate_normals();
        mesh.update_aabb();
        mesh.update_transforms();
        Ok(mesh)
    }

    /// An empty mesh to be filled with [`TriangleMesh::append_triangle`].
    pub fn empty(cull_mode: CullMode, material_index: usize) -> Self {
        // No indices, so validation cannot fail
        Self::new(Vec::new(), Vec::new(), cull_mode, material_index)
            .expect("empty mesh is always valid")
    }

    /// Append one triangle during initialization.
    ///
    /// Grows the local buffers and bounds; call
    /// [`TriangleMesh::update_transforms`] once appending is done.
    pub fn append_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend([v0, v1, v2]);
        self.indices.extend([base, base + 1, base + 2]);
        self.normals.push(face_normal(v0, v1, v2));
        self.update_aabb();
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Accumulate a translation. Opposite translations cancel, restoring the
    /// previous world buffers on the next update.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Set the absolute yaw rotation in radians.
    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation_y = angle;
    }

    /// Set the absolute per-axis scale factors.
    pub fn set_scale(&mut self, factors: Vec3) {
        self.scale = factors;
    }

    /// Recompute the local AABB from the local positions.
    pub fn update_aabb(&mut self) {
        self.aabb = Aabb::from_point_set(&self.positions);
    }

    /// Apply the accumulated transform to the world buffers, then the world
    /// AABB, in that order. Must run before the next query after any
    /// transform mutation; must not run concurrently with queries.
    pub fn update_transforms(&mut self) {
        let matrix = Mat4::from_translation(self.translation)
            * Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_scale(self.scale);

        self.positions_world.clear();
        self.positions_world
            .extend(self.positions.iter().map(|&p| matrix.transform_point3(p)));

        self.normals_world.clear();
        self.normals_world.extend(self.normals.iter().map(|&n| {
            matrix
                .transform_vector3(n)
                .try_normalize()
                .unwrap_or(Vec3::Y)
        }));

        self.aabb_world = matrix.transform_aabb(&self.aabb);
    }

    /// Scan all triangles with the given cull mode, keeping the closest
    /// accepted parameter, or stopping at the first when `any` is set.
    fn scan(&self, ray: &Ray, cull_mode: CullMode, any: bool) -> Option<(f32, usize)> {
        let mut nearest: Option<(f32, usize)> = None;

        for (triangle_index, triple) in self.indices.chunks_exact(3).enumerate() {
            let v0 = self.positions_world[triple[0] as usize];
            let v1 = self.positions_world[triple[1] as usize];
            let v2 = self.positions_world[triple[2] as usize];
            let normal = self.normals_world[triangle_index];

            let Some(t) = intersect_triangle(v0, v1, v2, normal, cull_mode, ray) else {
                continue;
            };
            if any {
                return Some((t, triangle_index));
            }
            if nearest.is_none_or(|(best, _)| t < best) {
                nearest = Some((t, triangle_index));
            }
        }

        nearest
    }

    fn calculate_normals(&mut self) {
        self.normals.clear();
        self.normals.reserve(self.triangle_count());

        for triple in self.indices.chunks_exact(3) {
            let v0 = self.positions[triple[0] as usize];
            let v1 = self.positions[triple[1] as usize];
            let v2 = self.positions[triple[2] as usize];

            let cross = (v1 - v0).cross(v2 - v0);
            match cross.try_normalize() {
                Some(normal) => self.normals.push(normal),
                None => {
                    log::warn!(
                        "degenerate triangle [{}, {}, {}] has no face normal",
                        triple[0],
                        triple[1],
                        triple[2]
                    );
                    self.normals.push(Vec3::Y);
                }
            }
        }
    }
}

impl HitTest for TriangleMesh {
    fn hit_closest(&self, ray: &Ray, record: &mut HitRecord) -> bool {
        if !self.aabb_world.hit(ray) {
            return false;
        }

        let Some((t, triangle_index)) = self.scan(ray, self.cull_mode, false) else {
            return false;
        };
        if t >= record.t {
            return false;
        }

        record.did_hit = true;
        record.t = t;
        record.point = ray.at(t);
        record.normal = self.normals_world[triangle_index];
        record.material_index = self.material_index;
        true
    }

    fn hit_any(&self, ray: &Ray) -> bool {
        if !self.aabb_world.hit(ray) {
            return false;
        }

        self.scan(ray, self.cull_mode.flipped(), true).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two-triangle quad spanning [-1, 1]^2 in the z = 2 plane, normals -Z
    fn quad(cull_mode: CullMode) -> TriangleMesh {
        TriangleMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 2.0),
                Vec3::new(-1.0, 1.0, 2.0),
                Vec3::new(1.0, 1.0, 2.0),
                Vec3::new(1.0, -1.0, 2.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
            cull_mode,
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_topology() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];

        assert_eq!(
            TriangleMesh::new(positions.clone(), vec![0, 1], CullMode::None, 0).unwrap_err(),
            MeshError::IndexCountNotTriangles(2)
        );
        assert_eq!(
            TriangleMesh::new(positions, vec![0, 1, 9], CullMode::None, 0).unwrap_err(),
            MeshError::IndexOutOfBounds {
                index: 9,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_closest_hit_through_quad() {
        let mesh = quad(CullMode::None);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut record = HitRecord::default();
        assert!(mesh.hit_closest(&ray, &mut record));
        assert!((record.t - 2.0).abs() < 1e-5);
        assert_eq!(record.material_index, 4);
        assert!((record.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_slab_rejection_precedes_triangle_scan() {
        // Shrink the world AABB away from the geometry: the slab test must
        // reject before any triangle is scanned, even though a triangle
        // would match
        let mut mesh = quad(CullMode::None);
        mesh.aabb_world = Aabb::from_points(
            Vec3::new(100.0, 100.0, 100.0),
            Vec3::new(101.0, 101.0, 101.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut record = HitRecord::default();
        assert!(!mesh.hit_closest(&ray, &mut record));
        assert!(!mesh.hit_any(&ray));

        // Restoring the AABB restores the hit
        mesh.update_transforms();
        assert!(mesh.hit_closest(&ray, &mut record));
    }

    #[test]
    fn test_cull_inversion_for_occlusion() {
        // Normals face -Z; a +Z shadow ray sees the front face, which
        // BackFace culling would keep and FrontFace culling would drop.
        // hit_any flips the mode, so the FrontFace mesh still occludes.
        let mesh = quad(CullMode::FrontFace);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut record = HitRecord::default();
        assert!(!mesh.hit_closest(&ray, &mut record));
        assert!(mesh.hit_any(&ray));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut mesh = quad(CullMode::None);
        let original_positions = mesh.positions_world.clone();
        let original_aabb = mesh.aabb_world;

        let offset = Vec3::new(3.0, -2.0, 7.5);
        mesh.translate(offset);
        mesh.update_transforms();
        assert!((mesh.positions_world[0] - (original_positions[0] + offset)).length() < 1e-5);

        mesh.translate(-offset);
        mesh.update_transforms();

        for (restored, original) in mesh.positions_world.iter().zip(&original_positions) {
            assert!((*restored - *original).length() < 1e-5);
        }
        let (lo, hi) = mesh.aabb_world.corners();
        let (orig_lo, orig_hi) = original_aabb.corners();
        assert!((lo - orig_lo).length() < 1e-4);
        assert!((hi - orig_hi).length() < 1e-4);
    }

    #[test]
    fn test_rotation_moves_world_aabb() {
        let mut mesh = quad(CullMode::None);
        mesh.set_rotation_y(std::f32::consts::FRAC_PI_2);
        mesh.update_transforms();

        // The quad rotates out of the z = 2 plane into x = 2
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut record = HitRecord::default();
        assert!(!mesh.hit_closest(&ray, &mut record));

        let side_ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(mesh.hit_closest(&side_ray, &mut record));
        assert!((record.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_append_triangle() {
        let mut mesh = TriangleMesh::empty(CullMode::None, 1);
        mesh.append_triangle(
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
        );
        mesh.update_transforms();

        assert_eq!(mesh.triangle_count(), 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut record = HitRecord::default();
        assert!(mesh.hit_closest(&ray, &mut record));
        assert!((record.t - 3.0).abs() < 1e-5);
    }
}
