//! Classification of registered systems into logic and render sequences

use crate::profiler::{ProfilerHandle, ProfilerRegistry};
use crate::system::{GameSystem, SimulationWorld, SystemPhase};
use cadence_core::Result;

/// A classified system and the profiler that brackets it, if any
pub struct SystemEntry<W> {
    system: Box<dyn GameSystem<W>>,
    profiler: Option<ProfilerHandle>,
}

impl<W> SystemEntry<W> {
    pub fn name(&self) -> &str {
        self.system.name()
    }

    pub fn profiler(&self) -> Option<ProfilerHandle> {
        self.profiler
    }
}

impl<W: SimulationWorld> SystemEntry<W> {
    /// Process the system once, bracketed by its profiler, then run the
    /// world's post-system hook.
    fn run(&mut self, world: &mut W, mut profilers: Option<&mut ProfilerRegistry>) -> Result<()> {
        if let (Some(handle), Some(registry)) = (self.profiler, profilers.as_deref_mut()) {
            registry.start(handle);
        }

        let result = self.system.process(world);

        if let (Some(handle), Some(registry)) = (self.profiler, profilers.as_deref_mut()) {
            registry.stop(handle);
        }

        if let Err(err) = result {
            log::debug!("System '{}' failed, aborting frame: {}", self.system.name(), err);
            return Err(err);
        }

        world.update_entity_states();
        Ok(())
    }
}

/// Registered systems split by phase, each in registration order
pub struct Schedule<W> {
    logic: Vec<SystemEntry<W>>,
    render: Vec<SystemEntry<W>>,
}

impl<W> Schedule<W> {
    /// Partition `systems` by phase, preserving relative order.
    ///
    /// With a profiler registry (rendering mode) every system gets the
    /// profiler registered under its name, created if missing. Without one
    /// (headless mode) no system is profiled.
    pub fn classify(
        systems: Vec<Box<dyn GameSystem<W>>>,
        mut profilers: Option<&mut ProfilerRegistry>,
    ) -> Self {
        let mut logic = Vec::new();
        let mut render = Vec::new();

        for system in systems {
            let profiler = profilers
                .as_deref_mut()
                .map(|registry| registry.get_or_create(system.name()));
            let entry = SystemEntry { system, profiler };

            match entry.system.phase() {
                SystemPhase::Logic => logic.push(entry),
                SystemPhase::Render => render.push(entry),
            }
        }

        log::debug!(
            "Classified {} logic and {} render systems",
            logic.len(),
            render.len()
        );

        Self { logic, render }
    }

    pub fn logic(&self) -> &[SystemEntry<W>] {
        &self.logic
    }

    pub fn render(&self) -> &[SystemEntry<W>] {
        &self.render
    }

    pub fn logic_names(&self) -> Vec<&str> {
        self.logic.iter().map(|e| e.name()).collect()
    }

    pub fn render_names(&self) -> Vec<&str> {
        self.render.iter().map(|e| e.name()).collect()
    }
}

impl<W: SimulationWorld> Schedule<W> {
    /// Run every logic system once, in order. Stops at the first error.
    pub fn run_logic(
        &mut self,
        world: &mut W,
        mut profilers: Option<&mut ProfilerRegistry>,
    ) -> Result<()> {
        for entry in self.logic.iter_mut() {
            entry.run(world, profilers.as_deref_mut())?;
        }
        Ok(())
    }

    /// Run every render system once, in order. Stops at the first error.
    pub fn run_render(
        &mut self,
        world: &mut W,
        mut profilers: Option<&mut ProfilerRegistry>,
    ) -> Result<()> {
        for entry in self.render.iter_mut() {
            entry.run(world, profilers.as_deref_mut())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{boxed, FailingSystem, Probe, RecordingWorld};

    fn three_systems() -> Vec<Box<dyn GameSystem<RecordingWorld>>> {
        vec![
            boxed(Probe::logic("input")),
            boxed(Probe::render("sprites")),
            boxed(Probe::logic("movement")),
        ]
    }

    #[test]
    fn test_classify_preserves_order() {
        let schedule = Schedule::classify(three_systems(), None);
        assert_eq!(schedule.logic_names(), vec!["input", "movement"]);
        assert_eq!(schedule.render_names(), vec!["sprites"]);
    }

    #[test]
    fn test_headless_has_no_profilers() {
        let schedule = Schedule::classify(three_systems(), None);
        assert!(schedule.logic().iter().all(|e| e.profiler().is_none()));
        assert!(schedule.render().iter().all(|e| e.profiler().is_none()));
    }

    #[test]
    fn test_profilers_looked_up_before_created() {
        let mut registry = ProfilerRegistry::new(8);
        let existing = registry.create_for("movement");

        let schedule = Schedule::classify(three_systems(), Some(&mut registry));

        assert_eq!(registry.len(), 3);
        assert_eq!(schedule.logic()[1].profiler(), Some(existing));
        assert!(schedule.render()[0].profiler().is_some());
    }

    #[test]
    fn test_hook_runs_after_each_system() {
        let mut schedule = Schedule::classify(three_systems(), None);
        let mut world = RecordingWorld::default();

        schedule.run_logic(&mut world, None).unwrap();
        schedule.run_render(&mut world, None).unwrap();

        assert_eq!(
            world.events,
            vec!["input", "hook", "movement", "hook", "sprites", "hook"]
        );
    }

    #[test]
    fn test_profiled_run_records_samples() {
        let mut registry = ProfilerRegistry::new(8);
        let mut schedule = Schedule::classify(three_systems(), Some(&mut registry));
        let mut world = RecordingWorld::default();

        schedule.run_logic(&mut world, Some(&mut registry)).unwrap();
        schedule.run_logic(&mut world, Some(&mut registry)).unwrap();

        assert_eq!(registry.by_name("input").unwrap().calls(), 2);
        assert_eq!(registry.by_name("sprites").unwrap().calls(), 0);
    }

    #[test]
    fn test_error_aborts_remaining_systems() {
        let systems = vec![
            boxed(Probe::logic("first")),
            boxed(FailingSystem::new("broken")),
            boxed(Probe::logic("never")),
        ];
        let mut registry = ProfilerRegistry::new(8);
        let mut schedule = Schedule::classify(systems, Some(&mut registry));
        let mut world = RecordingWorld::default();

        let err = schedule.run_logic(&mut world, Some(&mut registry)).unwrap_err();

        assert!(err.to_string().contains("broken"));
        assert_eq!(world.events, vec!["first", "hook"]);
        assert!(!registry.by_name("broken").unwrap().is_running());
    }
}
