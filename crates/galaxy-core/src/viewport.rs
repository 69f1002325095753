//! Drawable surface size and viewport classes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Mobile or desktop layout, decided by surface width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportClass {
    /// Widths strictly below `breakpoint` are mobile
    pub fn from_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Pixel size of the host drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface is usable once both sides are positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a pixel position (origin top-left) to normalized device coordinates.
    ///
    /// Returns `None` for positions outside the surface or while the surface is
    /// invalid, so callers can skip the ray cast.
    pub fn to_ndc(&self, position: Vec2) -> Option<Vec2> {
        if !self.is_valid() || !position.is_finite() {
            return None;
        }
        if position.x < 0.0 || position.y < 0.0 || position.x > self.width || position.y > self.height {
            return None;
        }
        Some(Vec2::new(
            position.x / self.width * 2.0 - 1.0,
            -(position.y / self.height) * 2.0 + 1.0,
        ))
    }
}
