//! Cadence ECS - hecs world with named entities and deferred changes
//!
//! Systems queue structural changes (spawn, insert, despawn) while they run;
//! the game loop applies them between systems through
//! [`GameWorld::update_entity_states`].

mod component;
mod world;

pub use component::{ItemState, Position, Sprite, Tag, Velocity};
pub use world::{EntityChanges, GameWorld};
