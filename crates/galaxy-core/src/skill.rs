//! Skill types and catalog validation

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::layout;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("color must have 6 hex digits: {0}")]
    InvalidLength(String),
    #[error("invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("skill catalog is empty")]
    Empty,
    #[error("duplicate skill name: {0}")]
    DuplicateName(String),
    #[error("skill {name} has invalid size {size}")]
    InvalidSize { name: String, size: f32 },
}

/// Index of a skill within its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub usize);

impl SkillId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// 8-bit sRGB color, written as `#RRGGBB` in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string (case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidLength(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidDigit(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as 0.0-1.0 sRGB floats
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Channels multiplied by `factor`, used for the emissive tint
    pub fn scaled(self, factor: f32) -> [f32; 3] {
        let [r, g, b] = self.to_f32();
        [r * factor, g * factor, b * factor]
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// A skill as written in the catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    /// Static image resource for the skill logo
    pub icon: String,
    /// Sphere radius in scene units
    pub size: f32,
    pub color: Rgb,
    /// Free-text experience label shown in the detail card
    pub experience: String,
}

/// A skill placed in the galaxy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub icon: String,
    pub size: f32,
    pub color: Rgb,
    pub experience: String,
    /// Computed by the layout engine, never read from configuration
    pub position: Vec3,
}

impl Skill {
    pub fn from_entry(id: SkillId, entry: &SkillEntry) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            icon: entry.icon.clone(),
            size: entry.size,
            color: entry.color,
            experience: entry.experience.clone(),
            position: Vec3::ZERO,
        }
    }
}

/// Fixed, validated list of skills. Skills cannot be added or removed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
}

impl SkillCatalog {
    pub fn from_entries(entries: &[SkillEntry]) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
            if !entry.size.is_finite() || entry.size <= 0.0 {
                return Err(CatalogError::InvalidSize {
                    name: entry.name.clone(),
                    size: entry.size,
                });
            }
        }

        let skills = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Skill::from_entry(SkillId(i), entry))
            .collect();
        Ok(Self { skills })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn as_slice(&self) -> &[Skill] {
        &self.skills
    }

    /// Place every skill on a sphere of `radius`
    pub fn layout(&mut self, radius: f32) {
        layout::distribute(&mut self.skills, radius);
    }
}
