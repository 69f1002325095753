//! Fibonacci sphere layout and per-viewport presets

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::skill::Skill;
use crate::viewport::ViewportClass;

/// (1 + √5) / 2
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Position of point `index` out of `count` on a Fibonacci sphere of `radius`.
///
/// `theta = 2π·i/g`, `phi = acos(1 - 2·(i + 0.5)/count)`. Computed in f64 so that
/// repeated layouts never drift.
pub fn fibonacci_point(index: usize, count: usize, radius: f32) -> Vec3 {
    if count == 0 {
        return Vec3::ZERO;
    }

    let i = index as f64;
    let n = count as f64;
    let r = radius as f64;

    let theta = std::f64::consts::TAU * i / GOLDEN_RATIO;
    let phi = (1.0 - 2.0 * (i + 0.5) / n).clamp(-1.0, 1.0).acos();

    Vec3::new(
        (r * theta.cos() * phi.sin()) as f32,
        (r * theta.sin() * phi.sin()) as f32,
        (r * phi.cos()) as f32,
    )
}

/// Place every skill on a sphere of `radius`, overwriting previous positions
pub fn distribute(skills: &mut [Skill], radius: f32) {
    let count = skills.len();
    for (index, skill) in skills.iter_mut().enumerate() {
        skill.position = fibonacci_point(index, count, radius);
    }
}

/// Layout and camera values for one viewport class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassPreset {
    /// Galaxy sphere radius
    pub radius: f32,
    /// Vertical field of view of the camera
    pub fov_degrees: f32,
    /// Initial camera distance from the galaxy center
    pub camera_distance: f32,
}

/// Mobile/desktop presets split at a width breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPresets {
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: f32,
    #[serde(default = "default_mobile")]
    pub mobile: ClassPreset,
    #[serde(default = "default_desktop")]
    pub desktop: ClassPreset,
}

impl Default for LayoutPresets {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint(),
            mobile: default_mobile(),
            desktop: default_desktop(),
        }
    }
}

impl LayoutPresets {
    pub fn classify(&self, width: f32) -> ViewportClass {
        ViewportClass::from_width(width, self.breakpoint_px)
    }

    pub fn preset(&self, class: ViewportClass) -> &ClassPreset {
        match class {
            ViewportClass::Mobile => &self.mobile,
            ViewportClass::Desktop => &self.desktop,
        }
    }
}

fn default_breakpoint() -> f32 {
    768.0
}

fn default_mobile() -> ClassPreset {
    ClassPreset {
        radius: 6.0,
        fov_degrees: 60.0,
        camera_distance: 18.0,
    }
}

fn default_desktop() -> ClassPreset {
    ClassPreset {
        radius: 8.0,
        fov_degrees: 45.0,
        camera_distance: 20.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{Rgb, SkillCatalog, SkillEntry};

    fn skills(count: usize) -> Vec<Skill> {
        let entries: Vec<_> = (0..count)
            .map(|i| SkillEntry {
                name: format!("skill-{}", i),
                icon: String::new(),
                size: 1.0,
                color: Rgb::new(255, 255, 255),
                experience: String::new(),
            })
            .collect();
        SkillCatalog::from_entries(&entries).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_two_skill_layout() {
        let mut s = skills(2);
        distribute(&mut s, 8.0);

        // index 0: theta = 0, phi = 60°
        let a = s[0].position;
        assert!((a.x - 6.928_203).abs() < 1e-4);
        assert!(a.y.abs() < 1e-4);
        assert!((a.z - 4.0).abs() < 1e-4);

        // index 1: theta = 2π/g, phi = 120°
        let theta = std::f32::consts::TAU / GOLDEN_RATIO as f32;
        let sin_phi = 120f32.to_radians().sin();
        let b = s[1].position;
        assert!((b.x - 8.0 * theta.cos() * sin_phi).abs() < 1e-4);
        assert!((b.y - 8.0 * theta.sin() * sin_phi).abs() < 1e-4);
        assert!((b.z + 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_points_lie_on_sphere_and_are_distinct() {
        for count in 1..=40 {
            let mut s = skills(count);
            distribute(&mut s, 8.0);

            for skill in &s {
                assert!((skill.position.length() - 8.0).abs() < 1e-4, "count={}", count);
            }
            for i in 0..count {
                for j in (i + 1)..count {
                    assert!(s[i].position.distance(s[j].position) > 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_distribute_is_idempotent() {
        let mut once = skills(6);
        distribute(&mut once, 6.0);
        let mut twice = once.clone();
        distribute(&mut twice, 6.0);
        assert_eq!(once, twice);

        // Switching radius and back leaves no drift
        distribute(&mut twice, 8.0);
        distribute(&mut twice, 6.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_single_skill_sits_on_equator() {
        let p = fibonacci_point(0, 1, 5.0);
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn test_empty_layout_is_noop() {
        let mut empty: Vec<Skill> = Vec::new();
        distribute(&mut empty, 8.0);
        assert_eq!(fibonacci_point(0, 0, 8.0), Vec3::ZERO);
    }

    #[test]
    fn test_presets_by_class() {
        let presets = LayoutPresets::default();
        assert_eq!(presets.classify(375.0), ViewportClass::Mobile);
        assert_eq!(presets.classify(768.0), ViewportClass::Desktop);
        assert_eq!(presets.preset(ViewportClass::Desktop).radius, 8.0);
        assert_eq!(presets.preset(ViewportClass::Mobile).radius, 6.0);
    }
}
