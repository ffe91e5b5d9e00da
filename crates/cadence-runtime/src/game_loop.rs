//! The per-frame driver: fixed logic ticks, then one render pass

use crate::clock::FixedClock;
use crate::mode::{Mode, RenderBackend, RenderSurface, FRAME_PROFILER};
use crate::profiler::ProfilerRegistry;
use crate::schedule::Schedule;
use crate::system::{GameSystem, SimulationWorld};
use crate::time::{MonotonicTime, TimeSource};
use cadence_core::{CadenceError, LoopConfig, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// What happened during one [`GameLoop::run_frame`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Elapsed time fed to the accumulator, after clamping
    pub frame_time: Duration,
    /// Whether the elapsed time hit the spiral-of-death clamp
    pub clamped: bool,
    /// Logic ticks run this frame
    pub ticks: u32,
    /// Render systems run this frame
    pub render_systems: usize,
    /// Leftover simulated time carried into the next frame
    pub accumulator: Duration,
}

/// Running totals across all frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    pub frames: u64,
    pub ticks: u64,
    pub clamped_frames: u64,
}

/// Collects systems and collaborators, then closes registration with
/// [`build`](GameLoopBuilder::build).
pub struct GameLoopBuilder<W> {
    config: LoopConfig,
    tick: Option<Duration>,
    systems: Vec<Box<dyn GameSystem<W>>>,
    surface: Option<Box<dyn RenderSurface>>,
    profilers: Option<ProfilerRegistry>,
    time: Option<Box<dyn TimeSource>>,
}

impl<W: SimulationWorld> GameLoopBuilder<W> {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            tick: None,
            systems: Vec::new(),
            surface: None,
            profilers: None,
            time: None,
        }
    }

    /// Register a system. Systems run in registration order within their phase.
    pub fn with_system<S>(mut self, system: S) -> Self
    where
        S: GameSystem<W> + 'static,
    {
        self.systems.push(Box::new(system));
        self
    }

    pub fn with_boxed_system(mut self, system: Box<dyn GameSystem<W>>) -> Self {
        self.systems.push(system);
        self
    }

    /// Surface cleared each frame. Required unless the config is headless.
    pub fn with_surface<S>(mut self, surface: S) -> Self
    where
        S: RenderSurface + 'static,
    {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Reuse profilers created elsewhere instead of starting from an empty registry
    pub fn with_profilers(mut self, profilers: ProfilerRegistry) -> Self {
        self.profilers = Some(profilers);
        self
    }

    pub fn with_time_source<T>(mut self, time: T) -> Self
    where
        T: TimeSource + 'static,
    {
        self.time = Some(Box::new(time));
        self
    }

    /// Override the config's whole-millisecond tick with an exact duration
    pub fn with_tick_duration(mut self, tick: Duration) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Close registration, classify the systems, and create the loop.
    ///
    /// Fails if the config is invalid, two systems share a name, or a
    /// rendering loop has no surface.
    pub fn build(self) -> Result<GameLoop<W>> {
        self.config.validate()?;

        let tick = self.tick.unwrap_or_else(|| self.config.tick_duration());
        if tick.is_zero() {
            return Err(CadenceError::InvalidConfig(
                "tick duration must be greater than 0".into(),
            ));
        }

        let mut seen = HashSet::new();
        for system in &self.systems {
            let name = system.name();
            if name == FRAME_PROFILER || !seen.insert(name) {
                return Err(CadenceError::DuplicateSystemName(name.to_string()));
            }
        }

        let mut mode = if self.config.headless {
            if self.surface.is_some() {
                log::warn!("Headless loop ignores the supplied render surface");
            }
            Mode::Headless
        } else {
            let surface = self.surface.ok_or(CadenceError::MissingRenderSurface)?;
            let profilers = self
                .profilers
                .unwrap_or_else(|| ProfilerRegistry::new(self.config.profiler_samples));
            Mode::Rendering(RenderBackend::new(surface, profilers))
        };

        let schedule = Schedule::classify(self.systems, mode.profilers_mut());

        let mut time = self
            .time
            .unwrap_or_else(|| Box::new(MonotonicTime) as Box<dyn TimeSource>);
        let clock = FixedClock::new(tick, self.config.max_frame_time(), time.now());

        log::info!(
            "Game loop ready: {:?} per tick, {} mode",
            tick,
            if mode.is_headless() { "headless" } else { "rendering" }
        );

        Ok(GameLoop {
            config: self.config,
            clock,
            schedule,
            mode,
            time,
            stats: LoopStats::default(),
        })
    }
}

/// Fixed-timestep scheduler for a world of type `W`
///
/// Each [`run_frame`](GameLoop::run_frame) call measures the time since the
/// previous frame, runs as many fixed logic ticks as the accumulator allows,
/// and then runs every render system once. The loop never sleeps; pacing is
/// up to the caller.
pub struct GameLoop<W> {
    config: LoopConfig,
    clock: FixedClock,
    schedule: Schedule<W>,
    mode: Mode,
    time: Box<dyn TimeSource>,
    stats: LoopStats,
}

impl<W: SimulationWorld> GameLoop<W> {
    pub fn builder(config: LoopConfig) -> GameLoopBuilder<W> {
        GameLoopBuilder::new(config)
    }

    /// Run one frame.
    ///
    /// An error from any system is returned immediately and the rest of the
    /// frame is skipped.
    pub fn run_frame(&mut self, world: &mut W) -> Result<FrameReport> {
        if let Mode::Rendering(backend) = &mut self.mode {
            backend.begin_frame();
        }

        let frame = self.clock.advance(self.time.now());
        if frame.clamped {
            log::debug!(
                "Frame time clamped to {:?} to avoid a catch-up spiral",
                frame.elapsed
            );
        }

        world.set_delta(self.clock.fixed_delta_secs());

        let result = self.run_systems(world);

        if let Mode::Rendering(backend) = &mut self.mode {
            backend.end_frame();
        }

        let ticks = result?;

        self.stats.frames += 1;
        self.stats.ticks += u64::from(ticks);
        if frame.clamped {
            self.stats.clamped_frames += 1;
        }

        Ok(FrameReport {
            frame_time: frame.elapsed,
            clamped: frame.clamped,
            ticks,
            render_systems: self.schedule.render().len(),
            accumulator: self.clock.accumulator(),
        })
    }

    /// Logic ticks, the clear, then render systems. Returns the ticks run.
    fn run_systems(&mut self, world: &mut W) -> Result<u32> {
        let mut ticks = 0;
        while self.clock.should_step() {
            log::trace!("Logic tick {}", self.clock.steps() + 1);
            self.schedule.run_logic(world, self.mode.profilers_mut())?;
            self.clock.consume_step();
            ticks += 1;
        }

        if let Mode::Rendering(backend) = &mut self.mode {
            backend.clear(self.config.clear_color);
        }

        self.schedule.run_render(world, self.mode.profilers_mut())?;
        Ok(ticks)
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn schedule(&self) -> &Schedule<W> {
        &self.schedule
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn is_headless(&self) -> bool {
        self.mode.is_headless()
    }

    /// Profilers of a rendering loop; `None` when headless
    pub fn profilers(&self) -> Option<&ProfilerRegistry> {
        self.mode.profilers()
    }

    pub fn tick_duration(&self) -> Duration {
        self.clock.tick()
    }

    pub fn accumulator(&self) -> Duration {
        self.clock.accumulator()
    }

    /// Fraction of a tick waiting in the accumulator
    pub fn interpolation_alpha(&self) -> f64 {
        self.clock.interpolation_alpha()
    }
}
