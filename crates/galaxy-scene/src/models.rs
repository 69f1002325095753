//! Skill planets and their accent rings

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use galaxy_core::accent::ease_toward;
use galaxy_core::Skill;

use crate::scene::to_color;
use crate::types::*;

/// Ring radii relative to the planet radius
pub const RING_INNER: f32 = 1.2;
pub const RING_OUTER: f32 = 1.4;

/// Rate (1/s) at which ring opacity approaches its target
const RING_EASE_RATE: f32 = 10.0;
/// Rings fading out stay drawn until they fall below this
const RING_MIN_VISIBLE_OPACITY: f32 = 0.01;

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_planets.run_if(session_active))
            .add_systems(
                Update,
                (apply_layout, update_ring_accents).in_set(GalaxySet::Apply),
            );
    }
}

fn planet_material(skill: &Skill, emissive_factor: f32) -> StandardMaterial {
    let [r, g, b] = skill.color.scaled(emissive_factor);
    StandardMaterial {
        base_color: to_color(skill.color),
        emissive: Color::srgb(r, g, b).to_linear(),
        perceptual_roughness: 0.6,
        ..default()
    }
}

fn ring_material(skill: &Skill, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: to_color(skill.color).with_alpha(opacity),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn spawn_planets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    galaxy: Res<Galaxy>,
) {
    let planet_mesh = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));
    let ring_mesh = meshes.add(Annulus::new(RING_INNER, RING_OUTER));
    let emissive_factor = galaxy.config().scene.emissive_factor;

    for skill in galaxy.catalog().iter() {
        let accent = galaxy.ring_accent(skill.id);
        let visibility = if accent.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        commands
            .spawn((
                Mesh3d(planet_mesh.clone()),
                MeshMaterial3d(materials.add(planet_material(skill, emissive_factor))),
                Transform::from_translation(to_vec3(skill.position)).with_scale(Vec3::splat(skill.size)),
                SkillPlanet { id: skill.id },
                GalaxyEntity,
            ))
            .with_children(|parent| {
                // Annulus lies in XY; tip it into the orbital plane
                parent.spawn((
                    Mesh3d(ring_mesh.clone()),
                    MeshMaterial3d(materials.add(ring_material(skill, accent.opacity))),
                    Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                    visibility,
                    AccentRing {
                        id: skill.id,
                        opacity: accent.opacity,
                    },
                ));
            });
    }

    commands.insert_resource(GalaxyAssets {
        planet_mesh,
        ring_mesh,
    });
    tracing::debug!(planets = galaxy.catalog().len(), "Spawned skill planets");
}

/// Move planets after the session re-ran the layout
fn apply_layout(
    galaxy: Res<Galaxy>,
    frame: Res<LastFrame>,
    mut planets: Query<(&SkillPlanet, &mut Transform)>,
) {
    if !frame.0.resize.is_some_and(|resize| resize.relayout) {
        return;
    }
    for (planet, mut transform) in &mut planets {
        if let Some(skill) = galaxy.catalog().get(planet.id) {
            transform.translation = to_vec3(skill.position);
        }
    }
}

/// Ease each ring toward the opacity its hover/selection state calls for
fn update_ring_accents(
    galaxy: Res<Galaxy>,
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rings: Query<(&mut AccentRing, &mut Visibility, &MeshMaterial3d<StandardMaterial>)>,
) {
    let dt = time.delta_secs();
    for (mut ring, mut visibility, material) in &mut rings {
        let target = galaxy.ring_accent(ring.id);
        let opacity = ease_toward(ring.opacity, target.opacity, RING_EASE_RATE, dt);

        if (opacity - ring.opacity).abs() > 1e-4 {
            ring.opacity = opacity;
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color.set_alpha(opacity);
            }
        }

        let shown = target.visible || ring.opacity > RING_MIN_VISIBLE_OPACITY;
        visibility.set_if_neq(if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::{GalaxyConfig, SkillCatalog};

    fn angular() -> Skill {
        let config = GalaxyConfig::embedded().unwrap();
        let catalog: SkillCatalog = config.catalog().unwrap();
        catalog.find("Angular").unwrap().clone()
    }

    #[test]
    fn test_planet_material_has_emissive_tint() {
        let skill = angular();
        let material = planet_material(&skill, 0.2);
        let emissive = material.emissive;
        let expected = Color::srgb(0xDD as f32 / 255.0 * 0.2, 0.0, 0x31 as f32 / 255.0 * 0.2).to_linear();
        assert!((emissive.red - expected.red).abs() < 1e-6);
        assert!((emissive.blue - expected.blue).abs() < 1e-6);
        assert_eq!(emissive.green, 0.0);
    }

    #[test]
    fn test_ring_material_is_translucent() {
        let material = ring_material(&angular(), 0.4);
        assert!((material.base_color.alpha() - 0.4).abs() < 1e-6);
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!(material.unlit);
    }
}
