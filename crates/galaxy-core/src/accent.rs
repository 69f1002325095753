//! Accent ring visibility derived from hover and selection

/// Opacity of a ring on an eligible planet with no interaction
pub const RING_IDLE_OPACITY: f32 = 0.4;
pub const RING_HOVER_OPACITY: f32 = 0.7;
pub const RING_SELECTED_OPACITY: f32 = 0.9;

/// Target look for one planet's ring this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAccent {
    pub visible: bool,
    pub opacity: f32,
}

/// Selection outranks hover; rings on non-eligible planets only show while interacted with
pub fn ring_accent(eligible: bool, hovered: bool, selected: bool) -> RingAccent {
    let opacity = if selected {
        RING_SELECTED_OPACITY
    } else if hovered {
        RING_HOVER_OPACITY
    } else if eligible {
        RING_IDLE_OPACITY
    } else {
        0.0
    };
    RingAccent {
        visible: opacity > 0.0,
        opacity,
    }
}

/// Exponential approach of `current` toward `target`, frame-rate independent
pub fn ease_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return current;
    }
    let blend = 1.0 - (-rate * dt).exp();
    current + (target - current) * blend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_priority() {
        assert_eq!(ring_accent(true, false, false).opacity, RING_IDLE_OPACITY);
        assert_eq!(ring_accent(true, true, false).opacity, RING_HOVER_OPACITY);
        assert_eq!(ring_accent(false, true, true).opacity, RING_SELECTED_OPACITY);
        assert!(ring_accent(false, true, false).visible);
    }

    #[test]
    fn test_ineligible_idle_ring_hidden() {
        let accent = ring_accent(false, false, false);
        assert!(!accent.visible);
        assert_eq!(accent.opacity, 0.0);
    }

    #[test]
    fn test_ease_converges() {
        let mut value = 0.0;
        for _ in 0..120 {
            value = ease_toward(value, 1.0, 10.0, 1.0 / 60.0);
        }
        assert!((value - 1.0).abs() < 1e-3);
        assert_eq!(ease_toward(0.5, 1.0, 10.0, 0.0), 0.5);
    }
}
