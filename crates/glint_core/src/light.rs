//! Point and directional lights.

use glint_math::Vec3;

/// A light source.
///
/// Intensity is a non-negative scalar; color channels are non-negative and
/// not pre-clamped, so bright lights can push shaded values past 1 before
/// the tonemap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point {
        origin: Vec3,
        intensity: f32,
        color: Vec3,
    },
    Directional {
        direction: Vec3,
        intensity: f32,
        color: Vec3,
    },
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Vec3) -> Self {
        Self::Point {
            origin,
            intensity,
            color,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32, color: Vec3) -> Self {
        Self::Directional {
            direction,
            intensity,
            color,
        }
    }

    /// Unnormalized vector from `target` towards the light.
    ///
    /// For point lights this is the difference of positions, so its length
    /// is the distance used to bound shadow rays. Directional lights return
    /// their fixed vector; its length bounds their shadow range too.
    pub fn direction_to(&self, target: Vec3) -> Vec3 {
        match *self {
            Light::Point { origin, .. } => origin - target,
            Light::Directional { direction, .. } => direction,
        }
    }

    /// Incident radiance arriving at `target`.
    ///
    /// Point lights fall off with the squared distance; directional lights
    /// deliver constant radiance.
    pub fn radiance(&self, target: Vec3) -> Vec3 {
        match *self {
            Light::Point {
                origin,
                intensity,
                color,
            } => color * (intensity / (origin - target).length_squared()),
            Light::Directional {
                intensity, color, ..
            } => color * intensity,
        }
    }
}
