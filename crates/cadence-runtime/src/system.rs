//! Game system and world contracts

use cadence_core::Result;
use cadence_ecs::GameWorld;

/// Which part of the frame a system runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemPhase {
    /// Runs zero or more times per frame, once per fixed tick
    Logic,
    /// Runs exactly once per frame, after all logic ticks
    Render,
}

/// A system that can be scheduled by the game loop
///
/// Systems run in registration order within their phase. Returning an error
/// aborts the rest of the frame; the loop does not isolate or retry failing
/// systems.
pub trait GameSystem<W> {
    /// Human-readable name, unique within a loop. Profilers are keyed by it.
    fn name(&self) -> &str;

    /// Render systems override this to return [`SystemPhase::Render`]
    fn phase(&self) -> SystemPhase {
        SystemPhase::Logic
    }

    /// Do one unit of work against the world
    fn process(&mut self, world: &mut W) -> Result<()>;
}

/// What the loop needs from the world it drives
pub trait SimulationWorld {
    /// Publish the fixed per-tick delta, in seconds
    fn set_delta(&mut self, delta_secs: f32);

    /// Post-system hook, called after every single `process()`.
    ///
    /// Must not fail; the loop has no way to report an error from here.
    fn update_entity_states(&mut self);
}

impl SimulationWorld for GameWorld {
    fn set_delta(&mut self, delta_secs: f32) {
        GameWorld::set_delta(self, delta_secs);
    }

    fn update_entity_states(&mut self) {
        let changes = GameWorld::update_entity_states(self);
        if !changes.is_empty() {
            log::trace!(
                "Applied entity changes: {} spawned, {} despawned",
                changes.spawned,
                changes.despawned
            );
        }
    }
}
