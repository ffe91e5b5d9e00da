//! Cadence Runtime - Fixed-timestep game loop
//!
//! Provides the scheduling building blocks:
//! - `GameLoop` / `GameLoopBuilder` - per-frame driver with explicit registration close
//! - `FixedClock` - integer-nanosecond accumulator with a spiral-of-death clamp
//! - `GameSystem` / `SimulationWorld` - contracts for systems and the world they drive
//! - `ProfilerRegistry` / `SystemProfiler` - per-system timing in rendering mode
//! - `TimeSource` - where frames read "now" from

mod clock;
mod game_loop;
mod mode;
mod profiler;
mod schedule;
mod system;
mod time;

#[cfg(test)]
mod testing;

pub use clock::{FixedClock, FrameTime};
pub use game_loop::{FrameReport, GameLoop, GameLoopBuilder, LoopStats};
pub use mode::{Mode, RenderBackend, RenderSurface, FRAME_PROFILER};
pub use profiler::{ProfilerHandle, ProfilerRegistry, ProfilerSnapshot, SystemProfiler};
pub use schedule::{Schedule, SystemEntry};
pub use system::{GameSystem, SimulationWorld, SystemPhase};
pub use time::{ManualTime, MonotonicTime, TimeSource};
