//! Scene facade: geometry, lights, materials, camera, and the two ray
//! queries every frame is built from.

use crate::camera::Camera;
use crate::hit::{HitRecord, HitTest};
use crate::light::Light;
use crate::material::Material;
use crate::mesh::TriangleMesh;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use glint_math::{Ray, Vec3};

/// Owner of everything a ray can interact with.
///
/// Built once through the `add_*` methods, then read-mostly while rendering:
/// mesh transforms and the camera may change between frames, topology and
/// material assignments may not.
///
/// Material slot 0 is reserved for a solid red fallback, so geometry added
/// without an explicit material renders loudly rather than invisibly.
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub triangles: Vec<Triangle>,
    pub meshes: Vec<TriangleMesh>,
    pub lights: Vec<Light>,
    pub materials: Vec<Material>,
    pub camera: Camera,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            materials: vec![Material::SolidColor {
                color: Vec3::new(1.0, 0.0, 0.0),
            }],
            camera: Camera::new(Vec3::ZERO, 90.0),
        }
    }

    /// Register a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Look up a material by index.
    ///
    /// An out-of-range index is a corrupt scene (geometry referencing a
    /// material that was never added) and panics.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn add_sphere(&mut self, origin: Vec3, radius: f32, material_index: usize) -> usize {
        self.spheres.push(Sphere::new(origin, radius, material_index));
        self.spheres.len() - 1
    }

    pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material_index: usize) -> usize {
        self.planes.push(Plane::new(origin, normal, material_index));
        self.planes.len() - 1
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> usize {
        self.triangles.push(triangle);
        self.triangles.len() - 1
    }

    /// Take ownership of a mesh and return its index; mutate it later
    /// through [`Scene::mesh_mut`] (transform + `update_transforms` between
    /// frames).
    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn mesh_mut(&mut self, index: usize) -> &mut TriangleMesh {
        &mut self.meshes[index]
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Vec3) -> usize {
        self.lights.push(Light::point(origin, intensity, color));
        self.lights.len() - 1
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Vec3) -> usize {
        self.lights.push(Light::directional(direction, intensity, color));
        self.lights.len() - 1
    }

    /// Closest intersection across every geometry collection.
    ///
    /// Categories are queried in a fixed order (spheres, planes, triangles,
    /// meshes) with a strict keep-closest comparison, so exactly coincident
    /// surfaces resolve to the earlier category deterministically.
    pub fn get_closest_hit(&self, ray: &Ray) -> HitRecord {
        let mut record = HitRecord::default();

        for sphere in &self.spheres {
            sphere.hit_closest(ray, &mut record);
        }
        for plane in &self.planes {
            plane.hit_closest(ray, &mut record);
        }
        for triangle in &self.triangles {
            triangle.hit_closest(ray, &mut record);
        }
        for mesh in &self.meshes {
            mesh.hit_closest(ray, &mut record);
        }

        record
    }

    /// Existence-only occlusion query, short-circuiting on the first
    /// occluder in the same category order. Which occluder fired is not
    /// observable, only that one exists.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        self.spheres.iter().any(|sphere| sphere.hit_any(ray))
            || self.planes.iter().any(|plane| plane.hit_any(ray))
            || self.triangles.iter().any(|triangle| triangle.hit_any(ray))
            || self.meshes.iter().any(|mesh| mesh.hit_any(ray))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::CullMode;

    #[test]
    fn test_default_material_is_reserved_fallback() {
        let scene = Scene::new();

        assert_eq!(scene.materials.len(), 1);
        assert_eq!(
            *scene.material(0),
            Material::SolidColor {
                color: Vec3::new(1.0, 0.0, 0.0)
            }
        );

        let index = Scene::new().add_material(Material::Lambert {
            diffuse_color: Vec3::ONE,
            diffuse_reflectance: 1.0,
        });
        assert_eq!(index, 1);
    }

    #[test]
    fn test_closest_hit_picks_nearest_across_categories() {
        let mut scene = Scene::new();
        let red = 0;
        scene.add_sphere(Vec3::new(0.0, 0.0, 30.0), 5.0, red);
        // Plane in front of the sphere
        scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, red);

        let record = scene.get_closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));

        assert!(record.did_hit);
        assert!((record.t - 10.0).abs() < 1e-4);
        assert_eq!(record.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_no_hit_record_defaults() {
        let scene = Scene::new();
        let record = scene.get_closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));

        assert!(!record.did_hit);
        assert_eq!(record.t, f32::INFINITY);
    }

    #[test]
    fn test_does_hit_finds_any_category() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 30.0), 5.0, 0);

        assert!(scene.does_hit(&Ray::new(Vec3::ZERO, Vec3::Z)));
        assert!(!scene.does_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)));
    }

    #[test]
    fn test_mesh_participates_in_queries() {
        let mut scene = Scene::new();
        let mesh = TriangleMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 5.0),
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(1.0, -1.0, 5.0),
            ],
            vec![0, 1, 2],
            CullMode::None,
            0,
        )
        .unwrap();
        scene.add_mesh(mesh);

        let record = scene.get_closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(record.did_hit);
        assert!((record.t - 5.0).abs() < 1e-4);
    }
}
