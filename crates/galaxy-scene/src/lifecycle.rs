//! Session lifecycle: startup, resize, per-frame tick, view publishing and teardown

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use galaxy_core::{CursorAffordance, GalaxySession, Surface};

use crate::types::*;

/// Owns the `Galaxy` resource and drives it from Bevy's clock.
///
/// Needs no render plugins, so it also runs under `MinimalPlugins`.
/// Expects `GalaxySettings` to be inserted and `WindowResized` to be registered.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LastFrame>()
            .init_resource::<GalaxyView>()
            .init_resource::<PointerCaptured>()
            .add_message::<CloseDetail>()
            .add_message::<TeardownRequest>()
            .configure_sets(
                Update,
                (GalaxySet::Input, GalaxySet::Tick, GalaxySet::Apply)
                    .chain()
                    .run_if(session_active),
            )
            .add_systems(PreStartup, init_session)
            .add_systems(
                Update,
                (
                    (handle_resize, handle_close).in_set(GalaxySet::Input),
                    tick_session.in_set(GalaxySet::Tick),
                    publish_view.in_set(GalaxySet::Apply),
                    teardown.after(GalaxySet::Apply),
                ),
            );
    }
}

/// Read the surface size and build the session
fn init_session(
    mut commands: Commands,
    settings: Res<GalaxySettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut exit: MessageWriter<AppExit>,
) {
    // No window yet (or headless): start with an empty surface, the first resize fixes it
    let surface = windows
        .single()
        .map(|window| Surface::new(window.width(), window.height()))
        .unwrap_or_default();

    match GalaxySession::new(settings.0.clone(), surface, time.elapsed()) {
        Ok(session) => {
            commands.insert_resource(GalaxyView {
                hint_visible: session.hint_visible(),
                class: session.class(),
                active: true,
                ..default()
            });
            commands.insert_resource(Galaxy(session));
        }
        Err(e) => {
            tracing::error!("Invalid galaxy configuration: {}", e);
            exit.write(AppExit::error());
        }
    }
}

fn handle_resize(
    mut resized: MessageReader<WindowResized>,
    mut galaxy: ResMut<Galaxy>,
    time: Res<Time>,
) {
    for event in resized.read() {
        galaxy.resize(Surface::new(event.width, event.height), time.elapsed());
    }
}

fn handle_close(mut close: MessageReader<CloseDetail>, mut galaxy: ResMut<Galaxy>) {
    if close.read().last().is_some() {
        galaxy.close();
    }
}

fn tick_session(mut galaxy: ResMut<Galaxy>, mut frame: ResMut<LastFrame>, time: Res<Time>) {
    frame.0 = galaxy.tick(time.elapsed(), time.delta_secs());
}

/// Copy hover, selection and hint state out for the overlay and the host page
fn publish_view(galaxy: Res<Galaxy>, mut view: ResMut<GalaxyView>) {
    let cursor = if galaxy.hovered().is_some() {
        CursorAffordance::Pointer
    } else {
        CursorAffordance::Default
    };
    view.set_if_neq(GalaxyView {
        hovered: galaxy.hovered(),
        selected: galaxy.selected(),
        hint_visible: galaxy.hint_visible(),
        cursor,
        class: galaxy.class(),
        active: true,
    });
}

/// Dispose the session, despawn the scene and stop the app. Repeated requests are ignored.
fn teardown(
    mut commands: Commands,
    mut requests: MessageReader<TeardownRequest>,
    galaxy: Option<ResMut<Galaxy>>,
    entities: Query<Entity, With<GalaxyEntity>>,
    mut view: ResMut<GalaxyView>,
    mut exit: MessageWriter<AppExit>,
) {
    if requests.read().last().is_none() {
        return;
    }
    let Some(mut galaxy) = galaxy else {
        return;
    };
    if !galaxy.dispose() {
        tracing::debug!("Teardown requested after dispose, ignoring");
        return;
    }

    let mut despawned = 0;
    for entity in &entities {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    commands.remove_resource::<GalaxyAssets>();
    *view = GalaxyView {
        class: galaxy.class(),
        ..default()
    };

    tracing::info!(entities = despawned, "Skill galaxy torn down");
    exit.write(AppExit::Success);
}
