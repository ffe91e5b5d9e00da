//! Cadence Core - Foundational types for the Cadence game loop
//!
//! This crate provides the types that all other Cadence crates depend on:
//! - `LoopConfig` - Tick rate, mode, and frame clamp settings
//! - `Color`, `Vec2` - Small value types shared by the world and renderer
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::LoopConfig;
pub use error::{CadenceError, Result};
pub use types::{Color, Vec2};
