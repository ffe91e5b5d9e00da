//! Fixed-timestep accumulator clock

use std::time::{Duration, Instant};

/// Elapsed wall-clock time of one frame, after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Time fed into the accumulator
    pub elapsed: Duration,
    /// Whether the raw elapsed time exceeded the clamp
    pub clamped: bool,
}

/// Converts variable frame times into a whole number of fixed steps.
///
/// All bookkeeping is integer nanoseconds (`Duration`), so the accumulator
/// never drifts. Frame time above `max_frame_time` is clamped before it is
/// accumulated, which bounds how many steps a single stalled frame can
/// trigger.
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// Simulated time consumed by one step
    tick: Duration,
    /// Spiral-of-death clamp
    max_frame_time: Duration,
    /// Unconsumed simulated time
    accumulator: Duration,
    /// Instant sampled by the previous frame
    last_instant: Instant,
    /// Sum of all clamped frame times
    total_time: Duration,
    /// Steps consumed since creation
    steps: u64,
}

impl FixedClock {
    /// Create a clock whose first frame is measured from `start`
    pub fn new(tick: Duration, max_frame_time: Duration, start: Instant) -> Self {
        Self {
            tick,
            max_frame_time,
            accumulator: Duration::ZERO,
            last_instant: start,
            total_time: Duration::ZERO,
            steps: 0,
        }
    }

    /// Advance to `now`. Call once per frame.
    pub fn advance(&mut self, now: Instant) -> FrameTime {
        let elapsed = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;
        self.accumulate(elapsed)
    }

    /// Feed an already measured frame time into the accumulator
    pub fn accumulate(&mut self, elapsed: Duration) -> FrameTime {
        let clamped = elapsed > self.max_frame_time;
        let elapsed = elapsed.min(self.max_frame_time);

        self.accumulator += elapsed;
        self.total_time += elapsed;

        FrameTime { elapsed, clamped }
    }

    /// Returns true if there's enough accumulated time for a fixed step
    pub fn should_step(&self) -> bool {
        self.accumulator >= self.tick
    }

    /// Consume one fixed step from the accumulator
    pub fn consume_step(&mut self) {
        self.accumulator -= self.tick;
        self.steps += 1;
    }

    /// Fixed step length in seconds. Identical for every step.
    pub fn fixed_delta_secs(&self) -> f32 {
        self.tick.as_secs_f32()
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.tick.as_secs_f64()
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn max_frame_time(&self) -> Duration {
        self.max_frame_time
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
