//! Streaming gate for the feed refresh loop.
//!
//! The fixed-update timer keeps firing while paused; generator systems
//! check the gate and early-return, so no in-flight work ever needs to be
//! cancelled. The UI toggle button flips this resource.

use bevy::prelude::*;

/// Whether timer ticks are allowed to regenerate the feed.
#[derive(Resource, Debug, Clone)]
pub struct StreamControl {
    streaming: bool,
}

impl Default for StreamControl {
    fn default() -> Self {
        Self { streaming: true }
    }
}

impl StreamControl {
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Flip the gate, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.streaming = !self.streaming;
        self.streaming
    }

    pub fn set_streaming(&mut self, on: bool) {
        self.streaming = on;
    }
}

pub struct StreamControlPlugin;

impl Plugin for StreamControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StreamControl>();
    }
}
