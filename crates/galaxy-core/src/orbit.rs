//! Damped orbit camera controls with auto-rotation
//!
//! Spherical coordinates around a target, Y up. `azimuth` is measured around
//! Y from +Z, `polar` from +Y. Input accumulates into pending deltas which
//! drain by `damping_factor` per 60 Hz frame, so motion glides to a stop.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Keeps the camera off the poles where look-at loses its up vector
const POLAR_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSettings {
    #[serde(default = "default_damping")]
    pub damping_factor: f32,
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
    /// Revolutions per minute
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping_factor: default_damping(),
            rotate_speed: default_rotate_speed(),
            zoom_speed: default_zoom_speed(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            auto_rotate: true,
            auto_rotate_speed: default_auto_rotate_speed(),
        }
    }
}

fn default_damping() -> f32 {
    0.05
}

fn default_rotate_speed() -> f32 {
    0.5
}

fn default_zoom_speed() -> f32 {
    0.8
}

fn default_min_distance() -> f32 {
    10.0
}

fn default_max_distance() -> f32 {
    30.0
}

fn default_true() -> bool {
    true
}

fn default_auto_rotate_speed() -> f32 {
    0.5
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    pub target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    target_distance: f32,
    azimuth_delta: f32,
    polar_delta: f32,
    dragging: bool,
}

impl OrbitControls {
    /// Camera on +Z looking at the origin from `distance`
    pub fn new(settings: OrbitSettings, distance: f32) -> Self {
        let distance = distance.clamp(settings.min_distance, settings.max_distance);
        Self {
            settings,
            target: Vec3::ZERO,
            azimuth: 0.0,
            polar: PI / 2.0,
            distance,
            target_distance: distance,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            dragging: false,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Auto-rotation pauses while the user holds the pointer down
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Pointer drag in pixels over a surface `surface_height` pixels tall
    pub fn rotate(&mut self, drag: Vec2, surface_height: f32) {
        if surface_height <= 0.0 || !drag.is_finite() {
            return;
        }
        let scale = TAU * self.settings.rotate_speed / surface_height;
        self.azimuth_delta -= drag.x * scale;
        self.polar_delta -= drag.y * scale;
    }

    /// Wheel steps; positive scrolls in
    pub fn zoom(&mut self, steps: f32) {
        if steps == 0.0 || !steps.is_finite() {
            return;
        }
        let factor = 0.95f32.powf(self.settings.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.target_distance *= factor;
        } else {
            self.target_distance /= factor;
        }
        self.clamp_target_distance();
    }

    /// Two-finger pinch; `ratio` is previous over current finger spread
    pub fn pinch(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.target_distance *= ratio;
            self.clamp_target_distance();
        }
    }

    /// Jump the zoom goal, e.g. when the viewport class changes
    pub fn set_target_distance(&mut self, distance: f32) {
        self.target_distance = distance;
        self.clamp_target_distance();
    }

    fn clamp_target_distance(&mut self) {
        self.target_distance = self
            .target_distance
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    /// Advance damping and auto-rotation by `dt` seconds and return the eye position
    pub fn update(&mut self, dt: f32) -> Vec3 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let frames = dt * 60.0;

        if self.settings.auto_rotate && !self.dragging {
            self.azimuth_delta -= TAU / 60.0 * self.settings.auto_rotate_speed * dt;
        }

        let keep = (1.0 - self.settings.damping_factor).clamp(0.0, 1.0).powf(frames);
        let applied = 1.0 - keep;

        self.azimuth = (self.azimuth + self.azimuth_delta * applied).rem_euclid(TAU);
        self.polar = (self.polar + self.polar_delta * applied).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.azimuth_delta *= keep;
        self.polar_delta *= keep;

        self.distance += (self.target_distance - self.distance) * applied;

        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.distance * sin_polar * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * sin_polar * self.azimuth.cos(),
            )
    }
}
