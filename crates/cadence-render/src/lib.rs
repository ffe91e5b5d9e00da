//! Cadence Render - render-phase systems
//!
//! The loop only knows these through the `GameSystem` and `RenderSurface`
//! contracts. Actual GPU batching lives behind [`SpriteBatch`].

mod sprite;
mod surface;

pub use sprite::{
    RecordingBatch, SpriteBatch, SpriteDraw, SpriteRenderSystem, SpriteStats, PLACEMENT_GHOST_TAG,
};
pub use surface::RecordingSurface;
