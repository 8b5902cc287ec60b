//! Hover highlight bookkeeping.
//!
//! The controller is the only writer of emissive fields. Whatever object it
//! tracks has its pre-highlight emissive saved here and restored before the
//! tracked handle changes or is cleared.

use crate::scene::{Color, ObjectId, Scene};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HighlightState {
    Idle,
    Highlighting {
        id: ObjectId,
        saved_emissive: Color,
        saved_intensity: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightChange {
    Unchanged,
    Entered(ObjectId),
    Switched { from: ObjectId, to: ObjectId },
    Cleared(ObjectId),
}

#[derive(Clone, Debug)]
pub struct HoverHighlight {
    state: HighlightState,
    intensity: f32,
}

impl HoverHighlight {
    pub fn new(intensity: f32) -> Self {
        Self {
            state: HighlightState::Idle,
            intensity,
        }
    }

    #[inline]
    pub fn state(&self) -> HighlightState {
        self.state
    }

    #[inline]
    pub fn current(&self) -> Option<ObjectId> {
        match self.state {
            HighlightState::Idle => None,
            HighlightState::Highlighting { id, .. } => Some(id),
        }
    }

    #[inline]
    pub fn saved_emissive(&self) -> Option<Color> {
        match self.state {
            HighlightState::Idle => None,
            HighlightState::Highlighting { saved_emissive, .. } => Some(saved_emissive),
        }
    }

    /// Feeds this frame's pick result through the state machine.
    pub fn update(&mut self, hit: Option<ObjectId>, scene: &mut Scene) -> HighlightChange {
        let current = self.current();
        if current == hit {
            return HighlightChange::Unchanged;
        }

        if let Some(prev) = current {
            self.restore(scene);
            log::trace!("[highlight] restored {}", prev);
        }

        let entered = match hit {
            Some(id) => self.enter(id, scene),
            None => false,
        };

        match (current, hit, entered) {
            (Some(from), Some(to), true) => HighlightChange::Switched { from, to },
            (None, Some(to), true) => HighlightChange::Entered(to),
            (Some(from), _, _) => HighlightChange::Cleared(from),
            (None, _, _) => HighlightChange::Unchanged,
        }
    }

    /// Restores the tracked object (if it still exists) and returns to Idle.
    pub fn clear(&mut self, scene: &mut Scene) -> Option<ObjectId> {
        let prev = self.current();
        self.restore(scene);
        prev
    }

    fn enter(&mut self, id: ObjectId, scene: &mut Scene) -> bool {
        let Some(obj) = scene.get_mut(id) else {
            log::debug!("[highlight] {} vanished before highlight; staying idle", id);
            return false;
        };
        let material = &mut obj.material;
        self.state = HighlightState::Highlighting {
            id,
            saved_emissive: material.emissive,
            saved_intensity: material.emissive_intensity,
        };
        material.emissive = material.base_color;
        material.emissive_intensity = self.intensity;
        true
    }

    fn restore(&mut self, scene: &mut Scene) {
        if let HighlightState::Highlighting {
            id,
            saved_emissive,
            saved_intensity,
        } = self.state
        {
            if let Some(obj) = scene.get_mut(id) {
                obj.material.emissive = saved_emissive;
                obj.material.emissive_intensity = saved_intensity;
            }
        }
        self.state = HighlightState::Idle;
    }
}
