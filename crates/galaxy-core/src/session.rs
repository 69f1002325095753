//! Owned widget state and its lifecycle
//!
//! A `GalaxySession` holds everything the widget mutates: skill positions,
//! hover/selection, the orbit camera, the resize debouncer and the hint timer.
//! The renderer feeds it input and surface sizes, calls `tick` once per frame
//! and applies whatever the returned `FrameUpdate` asks for.

use glam::Vec3;
use std::time::Duration;
use tracing::{debug, info};

use crate::accent::{ring_accent, RingAccent};
use crate::config::{ConfigError, GalaxyConfig};
use crate::interaction::{InteractionEvent, InteractionState, Transition};
use crate::layout::ClassPreset;
use crate::orbit::OrbitControls;
use crate::skill::{Skill, SkillCatalog, SkillId};
use crate::timing::{Debouncer, HintTimer};
use crate::viewport::{Surface, ViewportClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Running,
    Disposed,
}

/// Result of a settled resize burst
///
/// Carries no aspect ratio: the renderer derives the projection aspect from
/// its render target. An empty `surface` leaves class and layout untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub surface: Surface,
    pub class: ViewportClass,
    /// The breakpoint was crossed and skill positions were recomputed
    pub relayout: bool,
}

/// Work the renderer must do for this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUpdate {
    /// Camera eye position after damping and auto-rotation
    pub eye: Vec3,
    pub resize: Option<ResizeOutcome>,
    /// The hint was hidden on this frame (timeout or first pick)
    pub hint_dismissed: bool,
}

#[derive(Debug, Clone)]
pub struct GalaxySession {
    config: GalaxyConfig,
    catalog: SkillCatalog,
    interaction: InteractionState,
    orbit: OrbitControls,
    hint: HintTimer,
    hint_dismissed_pending: bool,
    resize: Debouncer<Surface>,
    surface: Surface,
    class: ViewportClass,
    layout_passes: u32,
    lifecycle: Lifecycle,
}

impl GalaxySession {
    /// Validate the configuration, build the catalog, lay it out for the
    /// surface's class and show the hint.
    ///
    /// A surface with no area is accepted; the class defaults to desktop and the
    /// breakpoint check is deferred until a valid size arrives through `resize`.
    pub fn new(config: GalaxyConfig, surface: Surface, now: Duration) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut catalog = config.catalog()?;

        let class = if surface.is_valid() {
            config.layout.classify(surface.width)
        } else {
            ViewportClass::default()
        };
        let preset = *config.layout.preset(class);
        catalog.layout(preset.radius);

        let orbit = OrbitControls::new(config.controls, preset.camera_distance);
        let mut hint = HintTimer::default();
        hint.start(now, config.interaction.hint_delay());
        let resize = Debouncer::new(config.interaction.resize_debounce());

        info!(skills = catalog.len(), class = ?class, radius = preset.radius, "Skill galaxy initialized");

        Ok(Self {
            config,
            catalog,
            interaction: InteractionState::default(),
            orbit,
            hint,
            hint_dismissed_pending: false,
            resize,
            surface,
            class,
            layout_passes: 1,
            lifecycle: Lifecycle::Running,
        })
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn class(&self) -> ViewportClass {
        self.class
    }

    pub fn preset(&self) -> &ClassPreset {
        self.config.layout.preset(self.class)
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Number of layout passes so far, including the initial one
    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    pub fn hovered(&self) -> Option<SkillId> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<SkillId> {
        self.interaction.selected()
    }

    pub fn hovered_skill(&self) -> Option<&Skill> {
        self.hovered().and_then(|id| self.catalog.get(id))
    }

    pub fn selected_skill(&self) -> Option<&Skill> {
        self.selected().and_then(|id| self.catalog.get(id))
    }

    pub fn hint_visible(&self) -> bool {
        self.hint.is_visible()
    }

    /// Ring look for one planet given current hover and selection
    pub fn ring_accent(&self, id: SkillId) -> RingAccent {
        let eligible = self
            .catalog
            .get(id)
            .map(|skill| self.config.scene.rings.is_eligible(&skill.name))
            .unwrap_or(false);
        ring_accent(eligible, self.interaction.is_hovered(id), self.interaction.is_selected(id))
    }

    /// Apply a pointer, touch or keyboard event. No-op after dispose.
    pub fn handle(&mut self, event: InteractionEvent) -> Transition {
        if !self.is_active() {
            return Transition::default();
        }

        let transition = self.interaction.apply(event);
        if transition.picked && self.hint.dismiss() {
            self.hint_dismissed_pending = true;
        }
        if transition.selection_changed {
            match self.selected_skill() {
                Some(skill) => info!(skill = %skill.name, "Skill selected"),
                None => debug!("Selection cleared"),
            }
        }
        transition
    }

    /// Explicit close control on the detail overlay
    pub fn close(&mut self) -> Transition {
        self.handle(InteractionEvent::Close)
    }

    /// Record a surface size; applied once the resize burst goes quiet
    pub fn resize(&mut self, surface: Surface, now: Duration) {
        if self.is_active() {
            self.resize.push(surface, now);
        }
    }

    /// Advance timers and camera. Returns an empty update after dispose.
    pub fn tick(&mut self, now: Duration, dt: f32) -> FrameUpdate {
        if !self.is_active() {
            return FrameUpdate::default();
        }

        let resize = self.resize.poll(now).map(|surface| self.apply_resize(surface));

        let timed_out = self.hint.poll(now);
        let hint_dismissed = timed_out || std::mem::take(&mut self.hint_dismissed_pending);

        FrameUpdate {
            eye: self.orbit.update(dt),
            resize,
            hint_dismissed,
        }
    }

    fn apply_resize(&mut self, surface: Surface) -> ResizeOutcome {
        if !surface.is_valid() {
            debug!(width = surface.width, height = surface.height, "Ignoring resize to empty surface");
            return ResizeOutcome {
                surface,
                class: self.class,
                relayout: false,
            };
        }

        self.surface = surface;
        let class = self.config.layout.classify(surface.width);
        let relayout = class != self.class;
        if relayout {
            self.class = class;
            let preset = *self.config.layout.preset(class);
            self.catalog.layout(preset.radius);
            self.orbit.set_target_distance(preset.camera_distance);
            self.layout_passes += 1;
            info!(class = ?class, radius = preset.radius, "Viewport crossed breakpoint, galaxy re-laid out");
        }

        ResizeOutcome {
            surface,
            class,
            relayout,
        }
    }

    /// Stop the widget: cancel timers, clear interaction state. Safe to call repeatedly.
    ///
    /// Returns true only on the call that actually disposed the session.
    pub fn dispose(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.lifecycle = Lifecycle::Disposed;
        self.resize.cancel();
        self.hint.dismiss();
        self.hint_dismissed_pending = false;
        self.interaction.clear();
        info!("Skill galaxy disposed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::{pick_skill, Ray};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(width: f32) -> GalaxySession {
        let config = GalaxyConfig::embedded().unwrap();
        GalaxySession::new(config, Surface::new(width, 600.0), ms(0)).unwrap()
    }

    /// Push a resize and let the debounce settle
    fn settle_resize(session: &mut GalaxySession, width: f32, at: u64) -> Option<ResizeOutcome> {
        session.resize(Surface::new(width, 600.0), ms(at));
        session.tick(ms(at + 100), 1.0 / 60.0).resize
    }

    #[test]
    fn test_initial_layout_uses_class_radius() {
        let desktop = session(1280.0);
        assert_eq!(desktop.class(), ViewportClass::Desktop);
        for skill in desktop.catalog().iter() {
            assert!((skill.position.length() - 8.0).abs() < 1e-4);
        }

        let mobile = session(375.0);
        assert_eq!(mobile.class(), ViewportClass::Mobile);
        for skill in mobile.catalog().iter() {
            assert!((skill.position.length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_crossing_breakpoint_relayouts_once() {
        let mut s = session(1280.0);
        assert_eq!(s.layout_passes(), 1);

        let outcome = settle_resize(&mut s, 500.0, 1000).unwrap();
        assert!(outcome.relayout);
        assert_eq!(outcome.class, ViewportClass::Mobile);
        assert_eq!(s.layout_passes(), 2);
        for skill in s.catalog().iter() {
            assert!((skill.position.length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_resizing_within_class_does_not_relayout() {
        let mut s = session(1280.0);
        let before: Vec<_> = s.catalog().iter().map(|sk| sk.position).collect();

        for (i, width) in [1200.0, 1000.0, 900.0, 1920.0].into_iter().enumerate() {
            let outcome = settle_resize(&mut s, width, 1000 * (i as u64 + 1)).unwrap();
            assert!(!outcome.relayout);
            assert_eq!(outcome.surface, Surface::new(width, 600.0));
        }

        assert_eq!(s.layout_passes(), 1);
        let after: Vec<_> = s.catalog().iter().map(|sk| sk.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_burst_is_debounced() {
        let mut s = session(1280.0);
        s.resize(Surface::new(700.0, 600.0), ms(1000));
        assert!(s.tick(ms(1050), 0.0).resize.is_none());
        s.resize(Surface::new(600.0, 600.0), ms(1060));
        s.resize(Surface::new(1300.0, 600.0), ms(1080));
        assert!(s.tick(ms(1150), 0.0).resize.is_none());

        // Only the last size of the burst applies, and it stays desktop
        let outcome = s.tick(ms(1180), 0.0).resize.unwrap();
        assert_eq!(outcome.surface.width, 1300.0);
        assert!(!outcome.relayout);
        assert_eq!(s.layout_passes(), 1);
    }

    #[test]
    fn test_zero_size_surface_is_deferred() {
        let config = GalaxyConfig::embedded().unwrap();
        let mut s = GalaxySession::new(config, Surface::new(0.0, 0.0), ms(0)).unwrap();
        assert_eq!(s.class(), ViewportClass::Desktop);

        let outcome = settle_resize(&mut s, 0.0, 10).unwrap();
        assert!(!outcome.surface.is_valid());
        assert!(!outcome.relayout);

        let outcome = settle_resize(&mut s, 400.0, 500).unwrap();
        assert_eq!(outcome.surface, Surface::new(400.0, 600.0));
        assert!(outcome.relayout);
    }

    #[test]
    fn test_hint_times_out() {
        let mut s = session(1280.0);
        assert!(s.hint_visible());
        assert!(!s.tick(ms(4999), 0.0).hint_dismissed);
        assert!(s.hint_visible());
        assert!(s.tick(ms(5000), 0.0).hint_dismissed);
        assert!(!s.hint_visible());
    }

    #[test]
    fn test_first_pick_hides_hint_immediately() {
        let mut s = session(1280.0);
        let t = s.handle(InteractionEvent::Click { hit: Some(SkillId(2)) });
        assert!(t.picked);
        assert!(!s.hint_visible());
        assert_eq!(s.selected_skill().unwrap().name, "SASS");
        assert!(s.tick(ms(10), 0.0).hint_dismissed);
        assert!(!s.tick(ms(6000), 0.0).hint_dismissed);
    }

    #[test]
    fn test_rejects_inverted_distance_limits() {
        let mut config = GalaxyConfig::embedded().unwrap();
        config.controls.min_distance = 30.0;
        config.controls.max_distance = 10.0;
        assert!(matches!(
            GalaxySession::new(config, Surface::new(1280.0, 600.0), ms(0)),
            Err(ConfigError::Invalid { field: "controls.max_distance", .. })
        ));
    }

    #[test]
    fn test_missed_click_keeps_hint_and_selection() {
        let mut s = session(1280.0);
        s.handle(InteractionEvent::Click { hit: None });
        assert!(s.hint_visible());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_pick_through_session() {
        let mut s = session(1280.0);
        let target = s.catalog().find("React").unwrap().position;
        let eye = target.normalize() * 25.0;
        let ray = Ray::new(eye, target - eye).unwrap();
        let hit = pick_skill(&ray, s.catalog().as_slice());
        assert_eq!(hit, Some(SkillId(1)));

        s.handle(InteractionEvent::PointerMove { hit, touch_active: false });
        assert_eq!(s.hovered_skill().unwrap().name, "React");

        let away = Ray::new(Vec3::new(0.0, 0.0, 25.0), Vec3::Z).unwrap();
        let miss = pick_skill(&away, s.catalog().as_slice());
        s.handle(InteractionEvent::Click { hit: Some(SkillId(0)) });
        s.handle(InteractionEvent::PointerMove { hit: miss, touch_active: false });
        s.handle(InteractionEvent::Click { hit: miss });
        assert_eq!(s.hovered(), None);
        assert_eq!(s.selected(), Some(SkillId(0)));
    }

    #[test]
    fn test_ring_accent_follows_policy_and_state() {
        let mut s = session(1280.0);
        let angular = s.catalog().find("Angular").unwrap().id;
        let sass = s.catalog().find("SASS").unwrap().id;
        assert!(s.ring_accent(angular).visible);
        assert!(!s.ring_accent(sass).visible);

        s.handle(InteractionEvent::PointerMove { hit: Some(sass), touch_active: false });
        assert!(s.ring_accent(sass).visible);
    }

    #[test]
    fn test_dispose_is_idempotent_and_silences_work() {
        let mut s = session(1280.0);
        s.handle(InteractionEvent::Click { hit: Some(SkillId(0)) });
        s.resize(Surface::new(400.0, 600.0), ms(100));

        assert!(s.dispose());
        assert!(!s.dispose());
        assert!(!s.is_active());
        assert_eq!(s.selected(), None);

        // No resize, hint or camera work after dispose
        let update = s.tick(ms(10_000), 1.0);
        assert_eq!(update, FrameUpdate::default());
        s.resize(Surface::new(300.0, 600.0), ms(20_000));
        assert_eq!(s.tick(ms(30_000), 1.0), FrameUpdate::default());
        assert_eq!(s.layout_passes(), 1);

        let t = s.handle(InteractionEvent::Click { hit: Some(SkillId(1)) });
        assert_eq!(t, Transition::default());
        assert_eq!(s.selected(), None);
    }
}
