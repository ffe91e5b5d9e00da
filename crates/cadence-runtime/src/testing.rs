//! Recording fakes shared by the unit tests

use crate::mode::RenderSurface;
use crate::system::{GameSystem, SimulationWorld, SystemPhase};
use cadence_core::{CadenceError, Color, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Logs every process call and hook invocation in order
#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub events: Vec<String>,
    pub delta: f32,
    /// Delta seen by each logic process call
    pub observed_deltas: Vec<f32>,
    pub hooks: usize,
}

impl SimulationWorld for RecordingWorld {
    fn set_delta(&mut self, delta_secs: f32) {
        self.delta = delta_secs;
    }

    fn update_entity_states(&mut self) {
        self.hooks += 1;
        self.events.push("hook".into());
    }
}

/// Pushes its name into the world's event log
pub struct Probe {
    name: String,
    phase: SystemPhase,
}

impl Probe {
    pub fn logic(name: &str) -> Self {
        Self {
            name: name.into(),
            phase: SystemPhase::Logic,
        }
    }

    pub fn render(name: &str) -> Self {
        Self {
            name: name.into(),
            phase: SystemPhase::Render,
        }
    }
}

impl GameSystem<RecordingWorld> for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> SystemPhase {
        self.phase
    }

    fn process(&mut self, world: &mut RecordingWorld) -> Result<()> {
        if self.phase == SystemPhase::Logic {
            world.observed_deltas.push(world.delta);
        }
        world.events.push(self.name.clone());
        Ok(())
    }
}

/// Always fails
pub struct FailingSystem {
    name: String,
}

impl FailingSystem {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

impl GameSystem<RecordingWorld> for FailingSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, _world: &mut RecordingWorld) -> Result<()> {
        Err(CadenceError::system(&self.name, "deliberate failure"))
    }
}

pub fn boxed<S>(system: S) -> Box<dyn GameSystem<RecordingWorld>>
where
    S: GameSystem<RecordingWorld> + 'static,
{
    Box::new(system)
}

/// Surface whose clears can be inspected through a shared handle
#[derive(Debug, Clone, Default)]
pub struct SharedSurface {
    pub clears: Rc<RefCell<Vec<Color>>>,
}

impl RenderSurface for SharedSurface {
    fn clear(&mut self, color: Color) {
        self.clears.borrow_mut().push(color);
    }
}
