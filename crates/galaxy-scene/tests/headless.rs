//! Session lifecycle under a headless Bevy app

use std::time::Duration;

use bevy::camera::primitives::Aabb;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, RayCastVisibility};
use galaxy_core::{CursorAffordance, GalaxyConfig, InteractionEvent, SkillId, ViewportClass};
use galaxy_scene::picking::{cast_skill, SkillPickingPlugin};
use galaxy_scene::{
    CloseDetail, Galaxy, GalaxyEntity, GalaxySettings, GalaxyView, PointerCaptured, SessionPlugin,
    SkillPlanet, TeardownRequest,
};

/// 100 ms per update, no window, startup already run
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(GalaxySettings(GalaxyConfig::embedded().unwrap()))
        .add_message::<WindowResized>()
        .add_plugins(SessionPlugin);
    app.update();
    app
}

fn resize(app: &mut App, width: f32, height: f32) {
    app.world_mut().write_message(WindowResized {
        window: Entity::PLACEHOLDER,
        width,
        height,
    });
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

#[test]
fn test_startup_without_window() {
    let app = headless_app();
    let galaxy = app.world().resource::<Galaxy>();
    assert!(galaxy.is_active());
    assert_eq!(galaxy.class(), ViewportClass::Desktop);
    assert_eq!(galaxy.catalog().len(), 6);

    let view = app.world().resource::<GalaxyView>();
    assert!(view.active);
    assert!(view.hint_visible);
    assert_eq!(view.selected, None);
}

#[test]
fn test_invalid_configuration_exits_without_session() {
    let mut config = GalaxyConfig::embedded().unwrap();
    config.scene.star_spread = f32::INFINITY;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(GalaxySettings(config))
        .add_message::<WindowResized>()
        .add_plugins(SessionPlugin);
    app.update();

    assert!(app.world().get_resource::<Galaxy>().is_none());
    assert!(!app.world().resource::<GalaxyView>().active);
    assert_eq!(app.should_exit(), Some(AppExit::error()));
}

#[test]
fn test_resize_relayouts_only_across_breakpoint() {
    let mut app = headless_app();

    resize(&mut app, 1280.0, 720.0);
    run(&mut app, 3);
    resize(&mut app, 1024.0, 720.0);
    run(&mut app, 3);
    assert_eq!(app.world().resource::<Galaxy>().layout_passes(), 1);

    resize(&mut app, 500.0, 800.0);
    run(&mut app, 3);
    let galaxy = app.world().resource::<Galaxy>();
    assert_eq!(galaxy.class(), ViewportClass::Mobile);
    assert_eq!(galaxy.layout_passes(), 2);
    for skill in galaxy.catalog().iter() {
        assert!((skill.position.length() - 6.0).abs() < 1e-4);
    }
    assert_eq!(app.world().resource::<GalaxyView>().class, ViewportClass::Mobile);
}

#[test]
fn test_hint_hides_after_timeout() {
    let mut app = headless_app();
    run(&mut app, 10);
    assert!(app.world().resource::<GalaxyView>().hint_visible);

    run(&mut app, 50);
    assert!(!app.world().resource::<GalaxyView>().hint_visible);
}

#[test]
fn test_close_detail_clears_selection() {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<Galaxy>()
        .handle(InteractionEvent::Click { hit: Some(SkillId(1)) });
    app.update();

    let view = *app.world().resource::<GalaxyView>();
    assert_eq!(view.selected, Some(SkillId(1)));
    assert!(!view.hint_visible);

    app.world_mut().write_message(CloseDetail);
    app.update();
    assert_eq!(app.world().resource::<GalaxyView>().selected, None);
}

#[test]
fn test_teardown_is_idempotent() {
    let mut app = headless_app();
    let owned = app.world_mut().spawn(GalaxyEntity).id();
    let foreign = app.world_mut().spawn_empty().id();

    app.world_mut().write_message(TeardownRequest);
    app.update();

    assert!(app.world().get_entity(owned).is_err());
    assert!(app.world().get_entity(foreign).is_ok());
    assert!(!app.world().resource::<Galaxy>().is_active());
    assert!(!app.world().resource::<GalaxyView>().active);
    assert_eq!(app.should_exit(), Some(AppExit::Success));

    // Second request and later resizes do nothing
    app.world_mut().write_message(TeardownRequest);
    resize(&mut app, 400.0, 800.0);
    run(&mut app, 5);
    let galaxy = app.world().resource::<Galaxy>();
    assert!(!galaxy.is_active());
    assert_eq!(galaxy.layout_passes(), 1);
    assert_eq!(galaxy.class(), ViewportClass::Desktop);
}

/// Headless app with picking input resources and a primary window
fn picking_app() -> App {
    let mut app = headless_app();
    app.init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Touches>()
        .init_resource::<Assets<Mesh>>()
        .add_plugins(SkillPickingPlugin);
    app.world_mut().spawn((Window::default(), PrimaryWindow));
    app
}

fn hover(app: &mut App, id: SkillId) {
    app.world_mut()
        .resource_mut::<Galaxy>()
        .handle(InteractionEvent::PointerMove {
            hit: Some(id),
            touch_active: false,
        });
    assert_eq!(app.world().resource::<Galaxy>().hovered(), Some(id));
}

/// Mesh entity the ray cast can see without a renderer
fn spawn_mesh(world: &mut World, mesh: Handle<Mesh>, translation: Vec3, half_extents: Vec3) -> Entity {
    let transform = Transform::from_translation(translation);
    world
        .spawn((
            Mesh3d(mesh),
            transform,
            GlobalTransform::from(transform),
            Aabb::from_min_max(-half_extents, half_extents),
            InheritedVisibility::VISIBLE,
            ViewVisibility::default(),
        ))
        .id()
}

fn cast(app: &mut App, origin: Vec3) -> Option<SkillId> {
    let ray = Ray3d::new(origin, Dir3::NEG_Z);
    app.world_mut()
        .run_system_once(
            move |mut ray_cast: MeshRayCast, planets: Query<&SkillPlanet>, parents: Query<&ChildOf>| {
                cast_skill(&mut ray_cast, ray, RayCastVisibility::Any, &planets, &parents)
            },
        )
        .unwrap()
}

#[test]
fn test_cursor_leaving_window_clears_hover() {
    let mut app = picking_app();
    hover(&mut app, SkillId(2));

    // The window has no cursor position: the pointer is outside the canvas
    app.update();
    let view = *app.world().resource::<GalaxyView>();
    assert_eq!(view.hovered, None);
    assert_eq!(view.cursor, CursorAffordance::Default);
}

#[test]
fn test_overlay_capture_clears_hover() {
    let mut app = picking_app();
    hover(&mut app, SkillId(0));

    app.insert_resource(PointerCaptured(true));
    app.update();
    assert_eq!(app.world().resource::<GalaxyView>().hovered, None);
}

#[test]
fn test_mesh_cast_resolves_ring_to_planet() {
    let mut app = picking_app();
    let (sphere, plate) = {
        let mut meshes = app.world_mut().resource_mut::<Assets<Mesh>>();
        (
            meshes.add(Sphere::new(1.0).mesh().uv(32, 18)),
            meshes.add(Cuboid::new(1.0, 1.0, 0.1)),
        )
    };

    let world = app.world_mut();
    let angular = spawn_mesh(world, sphere.clone(), Vec3::ZERO, Vec3::ONE);
    world.entity_mut(angular).insert(SkillPlanet { id: SkillId(0) });
    // Flat accent in front of the planet, closer to the ray origin than the sphere
    let ring = spawn_mesh(world, plate.clone(), Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.5, 0.5, 0.05));
    world.entity_mut(ring).insert(ChildOf(angular));

    let react = spawn_mesh(world, sphere, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
    world.entity_mut(react).insert(SkillPlanet { id: SkillId(1) });

    // Mesh with no skill identity anywhere up its chain
    spawn_mesh(world, plate, Vec3::new(-5.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.05));

    assert_eq!(cast(&mut app, Vec3::new(0.0, 0.0, 10.0)), Some(SkillId(0)));
    assert_eq!(cast(&mut app, Vec3::new(5.0, 0.0, 10.0)), Some(SkillId(1)));
    assert_eq!(cast(&mut app, Vec3::new(-5.0, 0.0, 10.0)), None);
    assert_eq!(cast(&mut app, Vec3::new(0.0, 10.0, 10.0)), None);
}

#[test]
fn test_missed_click_keeps_selection() {
    let mut app = picking_app();
    let sphere = app
        .world_mut()
        .resource_mut::<Assets<Mesh>>()
        .add(Sphere::new(1.0).mesh().uv(32, 18));
    let planet = spawn_mesh(app.world_mut(), sphere, Vec3::ZERO, Vec3::ONE);
    app.world_mut().entity_mut(planet).insert(SkillPlanet { id: SkillId(3) });

    let hit = cast(&mut app, Vec3::new(0.0, 0.0, 10.0));
    app.world_mut().resource_mut::<Galaxy>().handle(InteractionEvent::Click { hit });
    let miss = cast(&mut app, Vec3::new(4.0, 4.0, 10.0));
    assert_eq!(miss, None);
    app.world_mut().resource_mut::<Galaxy>().handle(InteractionEvent::Click { hit: miss });
    app.update();

    assert_eq!(app.world().resource::<GalaxyView>().selected, Some(SkillId(3)));
}
