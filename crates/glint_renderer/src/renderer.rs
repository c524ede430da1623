//! The per-pixel kernel and the parallel frame pass.

use crate::framebuffer::{tonemap, Framebuffer};
use crate::settings::{LightingMode, RenderSettings};
use glint_core::Scene;
use glint_math::{Mat4, Mat4Ext, Ray, Vec3};
use rayon::prelude::*;
use std::time::Instant;

/// Offset applied along the surface normal before casting a shadow ray,
/// and the shadow ray's own `t_min`. Keeps a surface from shadowing itself
/// through rounding ("shadow acne").
pub const SHADOW_BIAS: f32 = 1e-4;

/// Everything the kernel reads, captured once per frame.
///
/// Camera and scene mutation must be finished before this snapshot is
/// taken; the parallel pass only ever reads it.
struct FrameContext<'a> {
    scene: &'a Scene,
    settings: RenderSettings,
    width: f32,
    height: f32,
    aspect_ratio: f32,
    fov_scale: f32,
    camera_origin: Vec3,
    camera_to_world: Mat4,
}

impl<'a> FrameContext<'a> {
    fn new(scene: &'a Scene, settings: RenderSettings, width: u32, height: u32) -> Self {
        let width = width as f32;
        let height = height as f32;
        Self {
            scene,
            settings,
            width,
            height,
            aspect_ratio: width / height,
            fov_scale: scene.camera.fov_scale(),
            camera_origin: scene.camera.origin,
            camera_to_world: scene.camera.camera_to_world(),
        }
    }

    /// Primary ray through the center of pixel (px, py).
    fn camera_ray(&self, px: u32, py: u32) -> Ray {
        let rx = px as f32 + 0.5;
        let ry = py as f32 + 0.5;

        let cx = (2.0 * rx / self.width - 1.0) * self.aspect_ratio * self.fov_scale;
        let cy = (1.0 - 2.0 * ry / self.height) * self.fov_scale;

        let local = Vec3::new(cx, cy, 1.0).normalize();
        let direction = self.camera_to_world.transform_vector3(local);

        Ray::new(self.camera_origin, direction)
    }

    /// Resolve one pixel to a linear color.
    fn pixel_color(&self, px: u32, py: u32) -> Vec3 {
        let view_ray = self.camera_ray(px, py);

        let hit = self.scene.get_closest_hit(&view_ray);
        if !hit.did_hit {
            // Background
            return Vec3::ZERO;
        }

        let material = self.scene.material(hit.material_index);
        let mut color = Vec3::ZERO;

        for light in &self.scene.lights {
            let to_light = light.direction_to(hit.point);
            let distance = to_light.length();
            let light_dir = to_light / distance;

            // Backlit: zero contribution regardless of shadowing, so skip
            // before spending an occlusion query
            let observed_area = hit.normal.dot(light_dir);
            if observed_area < 0.0 {
                continue;
            }

            if self.settings.shadows_enabled {
                let shadow_ray = Ray::with_bounds(
                    hit.point + hit.normal * SHADOW_BIAS,
                    light_dir,
                    SHADOW_BIAS,
                    distance,
                );
                if self.scene.does_hit(&shadow_ray) {
                    continue;
                }
            }

            color += match self.settings.lighting_mode {
                LightingMode::ObservedArea => Vec3::splat(observed_area),
                LightingMode::Radiance => light.radiance(hit.point),
                LightingMode::Brdf => material.shade(&hit, light_dir, view_ray.direction),
                LightingMode::Combined => {
                    light.radiance(hit.point)
                        * material.shade(&hit, light_dir, view_ray.direction)
                        * observed_area
                }
            };
        }

        color
    }
}

/// Resolve a single pixel against the scene. Exposed for tests and
/// incremental redraws; [`render`] amortizes the per-frame setup instead of
/// paying it per pixel.
pub fn render_pixel(
    scene: &Scene,
    settings: &RenderSettings,
    width: u32,
    height: u32,
    px: u32,
    py: u32,
) -> Vec3 {
    FrameContext::new(scene, *settings, width, height).pixel_color(px, py)
}

/// Render a full frame into the framebuffer.
///
/// The camera snapshot is taken once, then every pixel slot is filled by a
/// rayon parallel-for. Slots never alias and the scene is read-only for the
/// duration, so workers need no synchronization. The frame is complete when
/// this returns.
pub fn render(scene: &Scene, settings: &RenderSettings, frame: &mut Framebuffer) {
    let width = frame.width();
    let height = frame.height();
    let context = FrameContext::new(scene, *settings, width, height);

    let start = Instant::now();

    frame
        .data_mut()
        .par_chunks_exact_mut(3)
        .enumerate()
        .for_each(|(pixel_index, slot)| {
            let px = pixel_index as u32 % width;
            let py = pixel_index as u32 / width;
            slot.copy_from_slice(&tonemap(context.pixel_color(px, py)));
        });

    log::debug!(
        "rendered {}x{} frame in {:.1?}",
        width,
        height,
        start.elapsed()
    );
}
