//! Camera controls and orbit navigation

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::types::*;

/// Browsers report wheel deltas in pixels; this many make one wheel step
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                orbit_input.in_set(GalaxySet::Input),
                apply_camera.in_set(GalaxySet::Apply),
            ),
        );
    }
}

/// Feed mouse drag, wheel and touch gestures into the orbit controls
fn orbit_input(
    mut galaxy: ResMut<Galaxy>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    captured: Res<PointerCaptured>,
) {
    let motion: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = mouse_wheel
        .read()
        .map(|wheel| match wheel.unit {
            MouseScrollUnit::Line => wheel.y,
            MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_WHEEL_STEP,
        })
        .sum();

    let surface_height = galaxy.surface().height;
    let orbit = galaxy.orbit_mut();

    // UI has the pointer: consume input, but never orbit underneath it
    if captured.0 {
        orbit.set_dragging(false);
        return;
    }

    let touch_count = touches.iter().count();
    let mouse_drag = mouse_button.pressed(MouseButton::Left);
    orbit.set_dragging(mouse_drag || touch_count > 0);

    if mouse_drag {
        orbit.rotate(to_core(motion), surface_height);
    }
    orbit.zoom(scroll);

    match touch_count {
        1 => {
            for touch in touches.iter() {
                orbit.rotate(to_core(touch.delta()), surface_height);
            }
        }
        2 => {
            let fingers: Vec<_> = touches.iter().collect();
            if let [a, b] = fingers.as_slice() {
                let current = a.position().distance(b.position());
                let previous = (a.position() - a.delta()).distance(b.position() - b.delta());
                if current > 1.0 {
                    orbit.pinch(previous / current);
                }
            }
        }
        _ => {}
    }
}

/// Place the camera where the orbit controls put it this frame
fn apply_camera(
    galaxy: Res<Galaxy>,
    frame: Res<LastFrame>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut projection)) = cameras.single_mut() else {
        return;
    };

    transform.translation = to_vec3(frame.0.eye);
    transform.look_at(to_vec3(galaxy.orbit().target), Vec3::Y);

    if frame.0.resize.is_some_and(|resize| resize.relayout) {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = galaxy.preset().fov_degrees.to_radians();
        }
    }
}

fn to_core(v: Vec2) -> galaxy_core::glam::Vec2 {
    galaxy_core::glam::Vec2::from_array(v.to_array())
}
