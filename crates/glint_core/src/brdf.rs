//! Reflectance building blocks shared by the material models.
//!
//! Conventions: `n` is the unit surface normal, `l` the unit direction from
//! the hit point towards the light, `v` the unit direction from the hit
//! point towards the viewer. Callers flip the camera-ray direction before
//! passing it here.

use glint_math::Vec3;
use std::f32::consts::{FRAC_1_PI, PI};

/// Lambertian diffuse term with a scalar reflectance: `kd * cd / pi`.
pub fn lambert(reflectance: f32, diffuse_color: Vec3) -> Vec3 {
    diffuse_color * reflectance * FRAC_1_PI
}

/// Lambertian diffuse term with a per-channel reflectance (the `1 - F`
/// energy split of the microfacet model).
pub fn lambert_rgb(reflectance: Vec3, diffuse_color: Vec3) -> Vec3 {
    diffuse_color * reflectance * FRAC_1_PI
}

/// Phong specular lobe.
///
/// Mirrors the light direction about the normal and raises its alignment
/// with the view direction to the given exponent.
pub fn phong(specular: f32, exponent: f32, l: Vec3, v: Vec3, n: Vec3) -> f32 {
    let reflected = 2.0 * n.dot(l) * n - l;
    let alignment = reflected.dot(v).max(0.0);
    specular * alignment.powf(exponent)
}

/// Schlick approximation of the Fresnel reflectance.
///
/// `cos_theta` is the angle between the half vector and the view direction;
/// `f0` the base reflectance at normal incidence.
pub fn fresnel_schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta).powi(5)
}

/// GGX/Trowbridge-Reitz normal distribution.
///
/// `alpha` is the squared roughness. Concentrates towards a mirror lobe as
/// alpha approaches zero.
pub fn ggx_distribution(n_dot_h: f32, alpha: f32) -> f32 {
    let alpha_sq = alpha * alpha;
    let denom = n_dot_h * n_dot_h * (alpha_sq - 1.0) + 1.0;
    alpha_sq / (PI * denom * denom)
}

/// Smith joint shadow-masking term, one Schlick-GGX factor per direction.
pub fn smith_geometry(n_dot_v: f32, n_dot_l: f32, alpha: f32) -> f32 {
    schlick_ggx(n_dot_v, alpha) * schlick_ggx(n_dot_l, alpha)
}

/// Remapped for direct lighting: k = (alpha + 1)^2 / 8.
fn schlick_ggx(n_dot_x: f32, alpha: f32) -> f32 {
    let k = (alpha + 1.0) * (alpha + 1.0) / 8.0;
    n_dot_x / (n_dot_x * (1.0 - k) + k)
}
