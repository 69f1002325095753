//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};
use galaxy_core::GalaxyConfig;
use galaxy_scene::GalaxyScenePlugin;

use crate::bridge::BridgePlugin;
use crate::ui::OverlayPlugin;

/// Host canvas the widget renders into
pub const CANVAS_SELECTOR: &str = "#galaxy-canvas";

/// Run the Bevy application until teardown or window close
pub fn run(config: GalaxyConfig) -> AppExit {
    App::new()
        .insert_resource(render_loop_settings())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skill Galaxy".to_string(),
                canvas: Some(CANVAS_SELECTOR.to_string()),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(GalaxyScenePlugin { config })
        .add_plugins(OverlayPlugin)
        .add_plugins(BridgePlugin)
        .run()
}

/// Redraw every display refresh on every viewport class, so auto-rotation,
/// damping and ring easing never wait for input
pub fn render_loop_settings() -> WinitSettings {
    WinitSettings::game()
}
