//! Galaxy Scene - Bevy rendering and UI components for the skill galaxy
//!
//! This crate turns a `GalaxySession` into a live scene: background, lights,
//! starfield, one planet per skill with its accent ring, an orbiting camera
//! and mesh picking. The egui widgets in `ui` are drawn by the host app.

pub mod camera;
pub mod lifecycle;
pub mod models;
pub mod picking;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;
use galaxy_core::GalaxyConfig;

/// Plugin that sets up the whole galaxy scene from a configuration
pub struct GalaxyScenePlugin {
    pub config: GalaxyConfig,
}

impl Plugin for GalaxyScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxySettings(self.config.clone()))
            .add_plugins(lifecycle::SessionPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(picking::SkillPickingPlugin);
    }
}

// Re-export commonly used types
pub use lifecycle::SessionPlugin;
pub use types::*;
