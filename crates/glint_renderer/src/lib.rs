//! Per-pixel render kernel for the glint CPU ray tracer.
//!
//! Turns pixel coordinates into camera rays, resolves them against a
//! [`glint_core::Scene`], accumulates light with hard shadows, and writes
//! clamped 8-bit RGB into a flat framebuffer. Pixels are independent, so
//! the frame pass runs as a rayon parallel-for with no synchronization.

mod framebuffer;
mod renderer;
mod settings;

pub use framebuffer::{tonemap, Framebuffer};
pub use renderer::{render, render_pixel, SHADOW_BIAS};
pub use settings::{LightingMode, RenderSettings};
