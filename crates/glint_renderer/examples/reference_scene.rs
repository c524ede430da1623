//! Reference scene example.
//!
//! Builds the Cook-Torrance material grid (six spheres over metal/plastic x
//! rough/medium/smooth), a gray-blue room of planes, three one-triangle
//! meshes showing each cull mode, and three tinted point lights, then
//! renders one frame per lighting mode to PNG.

use anyhow::Context;
use glint_core::{CullMode, Material, Scene, TriangleMesh, Vec3};
use glint_renderer::{render, Framebuffer, LightingMode, RenderSettings};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let modes = [
        (LightingMode::ObservedArea, "observed_area"),
        (LightingMode::Radiance, "radiance"),
        (LightingMode::Brdf, "brdf"),
        (LightingMode::Combined, "combined"),
    ];

    for (lighting_mode, name) in modes {
        let settings = RenderSettings {
            lighting_mode,
            shadows_enabled: true,
        };

        let mut frame = Framebuffer::new(WIDTH, HEIGHT);
        let start = std::time::Instant::now();
        render(&scene, &settings, &mut frame);
        println!("Rendered {name} in {:?}", start.elapsed());

        let filename = format!("reference_{name}.png");
        image::save_buffer(
            &filename,
            frame.data(),
            WIDTH,
            HEIGHT,
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("saving {filename}"))?;
        println!("Saved {filename}");
    }

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 3.0, -9.0);
    scene.camera.fov_angle = 45.0;

    let gray_metal = Vec3::new(0.972, 0.960, 0.915);
    let gray_plastic = Vec3::new(0.75, 0.75, 0.75);

    let ct_rough_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal,
        metalness: 1.0,
        roughness: 1.0,
    });
    let ct_medium_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal,
        metalness: 1.0,
        roughness: 0.6,
    });
    let ct_smooth_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal,
        metalness: 1.0,
        roughness: 0.1,
    });
    let ct_rough_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic,
        metalness: 0.0,
        roughness: 1.0,
    });
    let ct_medium_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic,
        metalness: 0.0,
        roughness: 0.6,
    });
    let ct_smooth_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic,
        metalness: 0.0,
        roughness: 0.1,
    });

    let lambert_gray_blue = scene.add_material(Material::Lambert {
        diffuse_color: Vec3::new(0.49, 0.57, 0.57),
        diffuse_reflectance: 1.0,
    });
    let lambert_white = scene.add_material(Material::Lambert {
        diffuse_color: Vec3::ONE,
        diffuse_reflectance: 1.0,
    });

    // Room
    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), lambert_gray_blue);
    scene.add_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), lambert_gray_blue);
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), lambert_gray_blue);
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), lambert_gray_blue);
    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), lambert_gray_blue);

    // Material grid: metals below, plastics above, rough to smooth
    scene.add_sphere(Vec3::new(-1.75, 1.0, 0.0), 0.75, ct_rough_metal);
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.75, ct_medium_metal);
    scene.add_sphere(Vec3::new(1.75, 1.0, 0.0), 0.75, ct_smooth_metal);
    scene.add_sphere(Vec3::new(-1.75, 3.0, 0.0), 0.75, ct_rough_plastic);
    scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.75, ct_medium_plastic);
    scene.add_sphere(Vec3::new(1.75, 3.0, 0.0), 0.75, ct_smooth_plastic);

    // One triangle per cull mode
    let base = [
        Vec3::new(-0.75, 1.5, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(-0.75, 0.0, 0.0),
    ];
    let placements = [
        (CullMode::BackFace, Vec3::new(-1.75, 4.5, 0.0)),
        (CullMode::FrontFace, Vec3::new(0.0, 4.5, 0.0)),
        (CullMode::None, Vec3::new(1.75, 4.5, 0.0)),
    ];
    for (cull_mode, offset) in placements {
        let mut mesh = TriangleMesh::new(base.to_vec(), vec![0, 1, 2], cull_mode, lambert_white)?;
        mesh.translate(offset);
        mesh.update_transforms();
        scene.add_mesh(mesh);
    }

    // Lights
    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Vec3::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Vec3::new(1.0, 0.8, 0.45));
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Vec3::new(0.34, 0.47, 0.68));

    Ok(scene)
}
