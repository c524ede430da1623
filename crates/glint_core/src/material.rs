//! Material models.
//!
//! Materials are a closed set of immutable reflectance models dispatched
//! through [`Material::shade`]. Geometry references them by index into the
//! scene's material list; many primitives may share one entry.

use crate::brdf;
use crate::hit::HitRecord;
use glint_math::Vec3;

/// Sentinel color for locally-degenerate shading input (e.g. a roughness of
/// zero). Keeps the failure visible on screen without aborting the frame.
pub const ERROR_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// A surface reflectance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Constant color, ignores geometry and lighting. Placeholder/debug.
    SolidColor { color: Vec3 },

    /// Pure diffuse reflector.
    Lambert {
        diffuse_color: Vec3,
        diffuse_reflectance: f32,
    },

    /// Diffuse base with a Phong specular lobe.
    LambertPhong {
        diffuse_color: Vec3,
        diffuse_reflectance: f32,
        specular_reflectance: f32,
        phong_exponent: f32,
    },

    /// Cook-Torrance microfacet model.
    ///
    /// `metalness` in [0, 1] selects the dielectric or metallic base
    /// reflectance; `roughness` in (0, 1] spreads the specular lobe.
    CookTorrance {
        albedo: Vec3,
        metalness: f32,
        roughness: f32,
    },
}

impl Material {
    /// Evaluate the reflectance for one light.
    ///
    /// `light_dir` points from the hit towards the light, `view_dir` is the
    /// camera ray direction (towards the hit); both unit length. The caller
    /// multiplies in the light's radiance and the cosine term.
    pub fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Vec3 {
        match *self {
            Material::SolidColor { color } => color,

            Material::Lambert {
                diffuse_color,
                diffuse_reflectance,
            } => brdf::lambert(diffuse_reflectance, diffuse_color),

            Material::LambertPhong {
                diffuse_color,
                diffuse_reflectance,
                specular_reflectance,
                phong_exponent,
            } => {
                let specular = brdf::phong(
                    specular_reflectance,
                    phong_exponent,
                    light_dir,
                    -view_dir,
                    hit.normal,
                );
                brdf::lambert(diffuse_reflectance, diffuse_color) + Vec3::splat(specular)
            }

            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => shade_cook_torrance(hit.normal, light_dir, -view_dir, albedo, metalness, roughness),
        }
    }
}

/// Microfacet specular plus energy-conserving diffuse.
///
/// `v` points towards the viewer here (already flipped from the camera-ray
/// direction).
fn shade_cook_torrance(
    n: Vec3,
    l: Vec3,
    v: Vec3,
    albedo: Vec3,
    metalness: f32,
    roughness: f32,
) -> Vec3 {
    if roughness <= 0.0 {
        return ERROR_COLOR;
    }
    let alpha = roughness * roughness;

    // Base reflectance: dielectrics reflect ~4%, metals tint by albedo
    let f0 = Vec3::splat(0.04).lerp(albedo, metalness);

    let half = (v + l).normalize();
    let n_dot_v = n.dot(v).max(0.0);
    let n_dot_l = n.dot(l).max(0.0);

    let fresnel = brdf::fresnel_schlick(half.dot(v).max(0.0), f0);
    let distribution = brdf::ggx_distribution(n.dot(half).max(0.0), alpha);
    let geometry = brdf::smith_geometry(n_dot_v, n_dot_l, alpha);

    let denominator = (4.0 * n_dot_v * n_dot_l).max(1e-4);
    let specular = fresnel * (distribution * geometry / denominator);

    // Metals have no diffuse lobe
    let diffuse_energy = if metalness > 0.0 {
        Vec3::ZERO
    } else {
        Vec3::ONE - fresnel
    };
    let diffuse = brdf::lambert_rgb(diffuse_energy, albedo);

    diffuse + specular
}
