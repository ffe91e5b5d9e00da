//! Components understood by the built-in systems

use cadence_core::Vec2;
use serde::{Deserialize, Serialize};

/// World-space position of an entity's center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Units per second, integrated by logic systems using the fixed delta
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// A drawable sprite region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Atlas region name
    pub region: String,
    pub width: f32,
    pub height: f32,
    /// Whether a placement ghost may be placed at its current position
    pub placement_valid: bool,
}

impl Sprite {
    pub fn new(region: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            region: region.into(),
            width,
            height,
            placement_valid: false,
        }
    }
}

/// Where an item currently lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    /// Placed in the world like any other entity
    InWorld,
    /// Dropped on the ground, waiting to be picked up
    DroppedInWorld,
    /// Held in an inventory; never drawn in the world
    InInventory,
}

/// Free-form marker used to single out special entities
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}
