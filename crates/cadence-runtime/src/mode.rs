//! Headless versus rendering operation

use crate::profiler::{ProfilerHandle, ProfilerRegistry};
use cadence_core::Color;

/// Name of the profiler that brackets whole frames
pub const FRAME_PROFILER: &str = "Frame Profiler";

/// The graphics context a rendering loop clears before drawing
pub trait RenderSurface {
    /// Clear the color buffer. Called once per frame, before render systems.
    fn clear(&mut self, color: Color);
}

/// Everything a rendering loop owns that a headless one never touches
pub struct RenderBackend {
    surface: Box<dyn RenderSurface>,
    profilers: ProfilerRegistry,
    frame_profiler: ProfilerHandle,
}

impl RenderBackend {
    pub fn new(surface: Box<dyn RenderSurface>, mut profilers: ProfilerRegistry) -> Self {
        let frame_profiler = profilers.get_or_create(FRAME_PROFILER);
        if let Some(profiler) = profilers.get_mut(frame_profiler) {
            profiler.set_color(Color::WHITE);
        }

        Self {
            surface,
            profilers,
            frame_profiler,
        }
    }

    pub fn frame_profiler(&self) -> ProfilerHandle {
        self.frame_profiler
    }

    pub fn profilers(&self) -> &ProfilerRegistry {
        &self.profilers
    }

    pub(crate) fn begin_frame(&mut self) {
        self.profilers.start(self.frame_profiler);
    }

    pub(crate) fn clear(&mut self, color: Color) {
        log::trace!("Clearing render surface");
        self.surface.clear(color);
    }

    pub(crate) fn end_frame(&mut self) {
        self.profilers.stop(self.frame_profiler);
    }
}

/// How the loop runs: a server simulation or a rendering client
pub enum Mode {
    /// No render surface, no profilers
    Headless,
    /// Clears a surface every frame and profiles every system
    Rendering(RenderBackend),
}

impl Mode {
    pub fn is_headless(&self) -> bool {
        matches!(self, Mode::Headless)
    }

    pub fn profilers(&self) -> Option<&ProfilerRegistry> {
        match self {
            Mode::Headless => None,
            Mode::Rendering(backend) => Some(&backend.profilers),
        }
    }

    pub fn profilers_mut(&mut self) -> Option<&mut ProfilerRegistry> {
        match self {
            Mode::Headless => None,
            Mode::Rendering(backend) => Some(&mut backend.profilers),
        }
    }
}
