//! Ray casting against skill spheres and hit resolution
//!
//! The renderer performs exact mesh ray casts; the functions here carry the
//! rules that decide which skill a hit belongs to, plus an analytic sphere
//! picker that needs no scene at all.

use glam::Vec3;

use crate::skill::{Skill, SkillId};

/// Guard against cycles in a broken parent chain
const MAX_ANCESTOR_DEPTH: usize = 64;

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` when `direction` has no length
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Smallest non-negative ray parameter where the ray meets the sphere
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere
        Some(far)
    } else {
        None
    }
}

/// One intersection reported by a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<N> {
    pub node: N,
    pub distance: f32,
}

/// Nearest hit wins. Non-finite or negative distances are discarded.
pub fn nearest_hit<N>(hits: impl IntoIterator<Item = Hit<N>>) -> Option<Hit<N>> {
    hits.into_iter()
        .filter(|hit| hit.distance.is_finite() && hit.distance >= 0.0)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Walk from `start` up through its parents until a node carries skill identity.
///
/// Decorative children (rings, labels) resolve to the planet that owns them.
/// Reaching the root without finding an owner is a miss.
pub fn resolve_owner<N: Copy>(
    start: N,
    identity: impl Fn(N) -> Option<SkillId>,
    parent: impl Fn(N) -> Option<N>,
) -> Option<SkillId> {
    let mut node = start;
    for _ in 0..MAX_ANCESTOR_DEPTH {
        if let Some(id) = identity(node) {
            return Some(id);
        }
        node = parent(node)?;
    }
    None
}

/// Analytic pick against skill spheres (radius = skill size)
///
/// Needs no scene, so headless callers and tests can pick from laid-out
/// positions alone. The renderer casts against its meshes instead and only
/// shares `nearest_hit` and `resolve_owner` with this path.
pub fn pick_skill(ray: &Ray, skills: &[Skill]) -> Option<SkillId> {
    nearest_hit(skills.iter().filter_map(|skill| {
        ray_sphere(ray, skill.position, skill.size).map(|distance| Hit {
            node: skill.id,
            distance,
        })
    }))
    .map(|hit| hit.node)
}
