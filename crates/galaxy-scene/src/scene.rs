//! Background, lights, camera and starfield

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use galaxy_core::Rgb;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::*;

/// Ambient brightness (cd/m²) for an intensity of 1.0
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 400.0;
/// Directional illuminance (lux) for an intensity of 1.0
const ILLUMINANCE_PER_UNIT: f32 = 5000.0;

pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene.run_if(session_active));
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::srgb(r, g, b)
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    galaxy: Res<Galaxy>,
) {
    let scene = &galaxy.config().scene;
    let preset = *galaxy.preset();
    let orbit = galaxy.orbit();

    commands.insert_resource(ClearColor(to_color(scene.background)));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: preset.fov_degrees.to_radians(),
            near: 0.1,
            // Stars sit anywhere in the cube, corners included
            far: scene.star_spread.max(1.0) * 1.5,
            ..default()
        }),
        Transform::from_translation(to_vec3(orbit.eye())).looking_at(to_vec3(orbit.target), Vec3::Y),
        AmbientLight {
            color: to_color(scene.ambient_color),
            brightness: scene.ambient_intensity * AMBIENT_BRIGHTNESS_PER_UNIT,
            ..default()
        },
        MainCamera,
        GalaxyEntity,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: scene.light_intensity * ILLUMINANCE_PER_UNIT,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(scene.light_position)).looking_at(Vec3::ZERO, Vec3::Y),
        GalaxyEntity,
    ));

    let positions = generate_star_positions(scene.star_count, scene.star_spread, scene.star_seed);
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    let star_mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals);

    let star_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, scene.star_opacity.clamp(0.0, 1.0)),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(star_mesh)),
        MeshMaterial3d(star_material),
        Transform::default(),
        Starfield,
        GalaxyEntity,
    ));

    tracing::debug!(stars = scene.star_count, "Scene setup complete");
}

/// Uniform random points in an axis-aligned cube of edge `spread` centered on the origin.
///
/// The same seed always yields the same sky.
pub fn generate_star_positions(count: usize, spread: f32, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // NaN and infinite spreads collapse to the origin
    let half = if spread.is_finite() { spread.abs() / 2.0 } else { 0.0 };
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_positions_stay_in_cube() {
        let stars = generate_star_positions(1500, 2000.0, 42);
        assert_eq!(stars.len(), 1500);
        for star in &stars {
            for axis in star {
                assert!((-1000.0..=1000.0).contains(axis));
            }
        }
    }

    #[test]
    fn test_star_positions_are_seeded() {
        assert_eq!(
            generate_star_positions(64, 2000.0, 7),
            generate_star_positions(64, 2000.0, 7)
        );
        assert_ne!(
            generate_star_positions(64, 2000.0, 7),
            generate_star_positions(64, 2000.0, 8)
        );
    }

    #[test]
    fn test_degenerate_spread_collapses_to_origin() {
        for spread in [0.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let stars = generate_star_positions(3, spread, 1);
            assert!(stars.iter().all(|s| *s == [0.0, 0.0, 0.0]));
        }
        assert!(generate_star_positions(0, 2000.0, 1).is_empty());
    }

    #[test]
    fn test_background_color() {
        let color = to_color(Rgb::new(0x00, 0x08, 0x14)).to_srgba();
        assert_eq!(color.red, 0.0);
        assert!((color.green - 8.0 / 255.0).abs() < 1e-6);
        assert!((color.blue - 20.0 / 255.0).abs() < 1e-6);
    }
}
