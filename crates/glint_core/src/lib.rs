//! Scene model and ray intersection for the glint CPU ray tracer.
//!
//! Everything a frame needs to resolve a ray lives here: analytic
//! primitives (sphere, plane, triangle), indexed triangle meshes with an
//! AABB rejection test, materials with their reflectance models, lights,
//! the camera, and the [`Scene`] facade that answers closest-hit and
//! occlusion queries.

pub mod brdf;
mod camera;
mod error;
mod hit;
mod light;
mod material;
mod mesh;
mod plane;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use error::MeshError;
pub use hit::{CullMode, HitRecord, HitTest};
pub use light::Light;
pub use material::{Material, ERROR_COLOR};
pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used across the public API.
pub use glint_math::{Aabb, Interval, Mat4Ext, Ray, Vec3};
