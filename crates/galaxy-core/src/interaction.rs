//! Hover and selection state machine
//!
//! Hover and selection are independent: a selection survives hover changes
//! and only Escape or the close control clears it. A click that misses every
//! planet leaves the selection as it was.

use serde::{Deserialize, Serialize};

use crate::skill::SkillId;

/// Input delivered by the host, already resolved to a skill (or a miss)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerMove {
        hit: Option<SkillId>,
        /// A finger is down; pointer moves are synthesized and ignored
        touch_active: bool,
    },
    Click {
        hit: Option<SkillId>,
    },
    TouchStart {
        hit: Option<SkillId>,
    },
    Escape,
    Close,
}

/// Cursor shape the host should show over the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorAffordance {
    #[default]
    Default,
    Pointer,
}

/// What changed when an event was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub hover_changed: bool,
    pub selection_changed: bool,
    /// New cursor, if the event touched hover state
    pub cursor: Option<CursorAffordance>,
    /// A click or tap landed on a skill
    pub picked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    hovered: Option<SkillId>,
    selected: Option<SkillId>,
}

impl InteractionState {
    pub fn hovered(&self) -> Option<SkillId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<SkillId> {
        self.selected
    }

    pub fn is_hovered(&self, id: SkillId) -> bool {
        self.hovered == Some(id)
    }

    pub fn is_selected(&self, id: SkillId) -> bool {
        self.selected == Some(id)
    }

    pub fn apply(&mut self, event: InteractionEvent) -> Transition {
        match event {
            InteractionEvent::PointerMove { touch_active: true, .. } => Transition::default(),
            InteractionEvent::PointerMove { hit, .. } => {
                let hover_changed = self.hovered != hit;
                self.hovered = hit;
                Transition {
                    hover_changed,
                    cursor: Some(if hit.is_some() {
                        CursorAffordance::Pointer
                    } else {
                        CursorAffordance::Default
                    }),
                    ..Default::default()
                }
            }
            InteractionEvent::Click { hit } | InteractionEvent::TouchStart { hit } => match hit {
                Some(id) => {
                    let selection_changed = self.selected != Some(id);
                    self.selected = Some(id);
                    Transition {
                        selection_changed,
                        picked: true,
                        ..Default::default()
                    }
                }
                None => Transition::default(),
            },
            InteractionEvent::Escape | InteractionEvent::Close => {
                let selection_changed = self.selected.take().is_some();
                Transition {
                    selection_changed,
                    ..Default::default()
                }
            }
        }
    }

    /// Drop both hover and selection
    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}
