//! Pointer, touch and keyboard picking
//!
//! Mouse and touch positions are ray-cast against the rendered meshes with
//! `bevy_picking`'s mesh ray cast. The nearest hit is walked up its `ChildOf`
//! chain to the planet that carries the skill identity, then handed to the
//! session as an `InteractionEvent`.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use galaxy_core::{nearest_hit, resolve_owner, Hit, InteractionEvent, SkillId, Surface};

use crate::types::*;

/// A press that travels further than this (in logical pixels) is a drag, not a click
const CLICK_SLOP_PX: f32 = 10.0;

pub struct SkillPickingPlugin;

impl Plugin for SkillPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerTracker>().add_systems(
            Update,
            (handle_escape, handle_pointer)
                .chain()
                .in_set(GalaxySet::Input),
        );
    }
}

/// Track the mouse between frames for hover and click detection
#[derive(Resource, Default)]
pub struct PointerTracker {
    /// Last cursor position seen over the window
    last_cursor: Option<Vec2>,
    /// Position where the left button went down
    press_position: Option<Vec2>,
    /// Whether this press has moved significantly (is a drag, not a click)
    is_dragging: bool,
}

impl PointerTracker {
    fn press(&mut self, position: Option<Vec2>) {
        self.press_position = position;
        self.is_dragging = false;
    }

    fn drag_to(&mut self, position: Option<Vec2>) {
        if let (Some(start), Some(position)) = (self.press_position, position) {
            if position.distance(start) > CLICK_SLOP_PX {
                self.is_dragging = true;
            }
        }
    }

    /// Ends the press. Returns where it started unless it turned into a drag.
    fn release(&mut self) -> Option<Vec2> {
        let start = self.press_position.take();
        let dragged = std::mem::take(&mut self.is_dragging);
        start.filter(|_| !dragged)
    }

    /// Records the cursor, true when it differs from the previous frame
    fn move_to(&mut self, cursor: Option<Vec2>) -> bool {
        if self.last_cursor == cursor {
            return false;
        }
        self.last_cursor = cursor;
        true
    }

    /// Forget everything, so the next cursor position is picked afresh
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Skill owning the nearest mesh hit along `ray`
///
/// Every mesh on the ray is tested so the nearest one wins even when bounding
/// boxes overlap. The hit entity is walked up its `ChildOf` chain to the first
/// `SkillPlanet`, so a ring hit resolves to its planet.
pub fn cast_skill(
    ray_cast: &mut MeshRayCast,
    ray: Ray3d,
    visibility: RayCastVisibility,
    planets: &Query<&SkillPlanet>,
    parents: &Query<&ChildOf>,
) -> Option<SkillId> {
    let settings = MeshRayCastSettings::default()
        .with_visibility(visibility)
        .never_early_exit();
    let nearest = nearest_hit(ray_cast.cast_ray(ray, &settings).iter().map(|(entity, hit)| Hit {
        node: *entity,
        distance: hit.distance,
    }))?;
    resolve_owner(
        nearest.node,
        |entity| planets.get(entity).ok().map(|planet| planet.id),
        |entity| parents.get(entity).ok().map(|child_of| child_of.parent()),
    )
}

fn handle_escape(keyboard: Res<ButtonInput<KeyCode>>, mut galaxy: ResMut<Galaxy>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        galaxy.handle(InteractionEvent::Escape);
    }
}

fn clear_hover(galaxy: &mut Galaxy, touch_active: bool) {
    if galaxy.hovered().is_some() {
        galaxy.handle(InteractionEvent::PointerMove {
            hit: None,
            touch_active,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_pointer(
    mut galaxy: ResMut<Galaxy>,
    mut tracker: ResMut<PointerTracker>,
    captured: Res<PointerCaptured>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    planets: Query<&SkillPlanet>,
    parents: Query<&ChildOf>,
    mut ray_cast: MeshRayCast,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();
    let touch_active = touches.iter().next().is_some();

    // Pointer is over the overlay: drop any hover and re-pick once it leaves
    if captured.0 {
        tracker.reset();
        clear_hover(&mut galaxy, false);
        return;
    }

    // Pointer left the window
    if cursor.is_none() {
        tracker.move_to(None);
        clear_hover(&mut galaxy, touch_active);
    }

    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let surface = Surface::new(window.width(), window.height());

    let mut pick = |position: Vec2| -> Option<SkillId> {
        surface.to_ndc(galaxy_core::glam::Vec2::new(position.x, position.y))?;
        let ray = camera.viewport_to_world(camera_transform, position).ok()?;
        cast_skill(&mut ray_cast, ray, RayCastVisibility::VisibleInView, &planets, &parents)
    };

    for touch in touches.iter_just_pressed() {
        let hit = pick(touch.position());
        galaxy.handle(InteractionEvent::TouchStart { hit });
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        tracker.press(cursor);
    }
    tracker.drag_to(cursor);
    if mouse_button.just_released(MouseButton::Left) {
        if let Some(start) = tracker.release() {
            let hit = pick(start);
            galaxy.handle(InteractionEvent::Click { hit });
        }
    }

    if let Some(position) = cursor {
        if tracker.move_to(cursor) {
            let hit = pick(position);
            galaxy.handle(InteractionEvent::PointerMove { hit, touch_active });
        }
    }
}
