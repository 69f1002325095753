//! Galaxy Core - Renderer-independent logic for the skill galaxy
//!
//! This crate provides everything the 3D widget decides without touching a GPU:
//! - Skill catalog types and validation
//! - Fibonacci sphere layout and viewport classes
//! - Ray picking and the hover/selection state machine
//! - Orbit camera controls, debounce and hint timers
//! - The owned widget session tying it all together
//! - TOML configuration with compiled-in defaults

pub mod accent;
pub mod config;
pub mod interaction;
pub mod layout;
pub mod orbit;
pub mod picking;
pub mod session;
pub mod skill;
pub mod timing;
pub mod viewport;

pub use glam;

pub use accent::{ring_accent, RingAccent};
pub use config::{load_config, ConfigError, GalaxyConfig, InteractionConfig, RingPolicy, SceneConfig};
pub use interaction::{CursorAffordance, InteractionEvent, InteractionState, Transition};
pub use layout::{distribute, fibonacci_point, ClassPreset, LayoutPresets};
pub use orbit::{OrbitControls, OrbitSettings};
pub use picking::{nearest_hit, pick_skill, resolve_owner, Hit, Ray};
pub use session::{FrameUpdate, GalaxySession, ResizeOutcome};
pub use skill::{CatalogError, ColorError, Rgb, Skill, SkillCatalog, SkillEntry, SkillId};
pub use timing::{Debouncer, HintTimer};
pub use viewport::{Surface, ViewportClass};
