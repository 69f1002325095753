//! Resources, components and messages shared by the galaxy systems

use bevy::prelude::*;
use galaxy_core::{CursorAffordance, FrameUpdate, GalaxyConfig, GalaxySession, SkillId, ViewportClass};

/// Configuration the widget was started with
#[derive(Debug, Clone, Resource, Deref)]
pub struct GalaxySettings(pub GalaxyConfig);

/// The live widget session. Absent until startup has read the surface size.
#[derive(Debug, Resource, Deref, DerefMut)]
pub struct Galaxy(pub GalaxySession);

/// Result of this frame's `GalaxySession::tick`, read by the apply systems
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct LastFrame(pub FrameUpdate);

/// State the surrounding view renders from. Only marked changed when a field changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Resource)]
pub struct GalaxyView {
    pub hovered: Option<SkillId>,
    pub selected: Option<SkillId>,
    pub hint_visible: bool,
    pub cursor: CursorAffordance,
    pub class: ViewportClass,
    pub active: bool,
}

/// Set by the overlay when the pointer is over UI, so picking and orbit ignore it
#[derive(Debug, Clone, Copy, PartialEq, Default, Resource)]
pub struct PointerCaptured(pub bool);

/// Marker for everything the widget spawns; teardown despawns these
#[derive(Component)]
pub struct GalaxyEntity;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Planet mesh carrying skill identity
#[derive(Component, Debug, Clone, Copy)]
pub struct SkillPlanet {
    pub id: SkillId,
}

/// Accent ring child of a planet
#[derive(Component, Debug, Clone, Copy)]
pub struct AccentRing {
    pub id: SkillId,
    pub opacity: f32,
}

/// Background point cloud
#[derive(Component)]
pub struct Starfield;

/// Meshes shared by every planet. Removed on teardown together with the entities.
#[derive(Resource, Debug, Clone)]
pub struct GalaxyAssets {
    /// Unit sphere, scaled per planet by skill size
    pub planet_mesh: Handle<Mesh>,
    /// Unit annulus for the accent ring
    pub ring_mesh: Handle<Mesh>,
}

/// Clear the current selection (close button on the detail card)
#[derive(Message, Debug, Clone, Copy)]
pub struct CloseDetail;

/// Stop the widget and release its resources
#[derive(Message, Debug, Clone, Copy)]
pub struct TeardownRequest;

/// Ordering of the per-frame work
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalaxySet {
    /// Pointer, touch, keyboard and resize input into the session
    Input,
    /// Timers, debounce and camera damping
    Tick,
    /// Push session state onto entities and the view
    Apply,
}

/// Convert a core vector into a Bevy one
pub fn to_vec3(v: galaxy_core::glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

/// Run condition: a session exists and has not been disposed
pub fn session_active(galaxy: Option<Res<Galaxy>>) -> bool {
    galaxy.is_some_and(|g| g.is_active())
}
