//! The demo session: everything play/reset operates on.
//!
//! One explicit object owning the mutable scene state and the timeline,
//! passed as the shared flow state so the UI handlers and the per-frame
//! update see the same data. No globals.

use crate::{
    scene::{SceneState, choreography},
    timeline::Timeline,
};

pub struct Session {
    pub scene: SceneState,
    pub timeline: Timeline,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            scene: SceneState::new(),
            timeline: Timeline::new(choreography::vector_add_steps()),
        }
    }
}
