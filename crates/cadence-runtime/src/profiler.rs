//! Per-system timing samplers

use cadence_core::Color;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Colors handed out to new profilers, in order, for graph overlays
const PALETTE: [Color; 6] = [
    Color::new(0.9, 0.3, 0.3, 1.0),
    Color::new(0.3, 0.9, 0.3, 1.0),
    Color::new(0.3, 0.5, 0.9, 1.0),
    Color::new(0.9, 0.8, 0.2, 1.0),
    Color::new(0.8, 0.3, 0.9, 1.0),
    Color::new(0.2, 0.9, 0.9, 1.0),
];

/// Index of a profiler inside its [`ProfilerRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfilerHandle(usize);

/// Samples how long a named scope takes, bracketed by `start`/`stop`
#[derive(Debug, Clone)]
pub struct SystemProfiler {
    name: String,
    color: Color,
    /// Most recent samples, oldest first
    samples: VecDeque<Duration>,
    capacity: usize,
    started: Option<Instant>,
    calls: u64,
    max: Duration,
}

impl SystemProfiler {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            started: None,
            calls: 0,
            max: Duration::ZERO,
        }
    }

    /// Begin a sample. Restarting a running profiler drops the open sample.
    pub fn start(&mut self) {
        if self.started.is_some() {
            log::warn!("Profiler '{}' started while already running", self.name);
        }
        self.started = Some(Instant::now());
    }

    /// Record the time since `start`. Ignored if the profiler isn't running.
    pub fn stop(&mut self) {
        match self.started.take() {
            Some(started) => self.record(started.elapsed()),
            None => log::warn!("Profiler '{}' stopped without being started", self.name),
        }
    }

    /// Add a sample directly, evicting the oldest once full
    pub fn record(&mut self, sample: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.calls += 1;
        self.max = self.max.max(sample);
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Completed start/stop pairs over the profiler's lifetime
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn last(&self) -> Option<Duration> {
        self.samples.back().copied()
    }

    /// Mean of the retained samples
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    /// Longest sample ever recorded
    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn snapshot(&self) -> ProfilerSnapshot {
        ProfilerSnapshot {
            name: self.name.clone(),
            calls: self.calls,
            last_us: self.last().map(|d| d.as_secs_f64() * 1e6).unwrap_or(0.0),
            average_us: self.average().as_secs_f64() * 1e6,
            max_us: self.max.as_secs_f64() * 1e6,
        }
    }
}

/// Serializable summary of one profiler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilerSnapshot {
    pub name: String,
    pub calls: u64,
    pub last_us: f64,
    pub average_us: f64,
    pub max_us: f64,
}

/// Owns every profiler of a rendering loop, looked up by system name
#[derive(Debug, Clone)]
pub struct ProfilerRegistry {
    profilers: Vec<SystemProfiler>,
    by_name: HashMap<String, ProfilerHandle>,
    sample_capacity: usize,
}

impl Default for ProfilerRegistry {
    fn default() -> Self {
        Self::new(120)
    }
}

impl ProfilerRegistry {
    /// Create an empty registry whose profilers keep `sample_capacity` samples
    pub fn new(sample_capacity: usize) -> Self {
        Self {
            profilers: Vec::new(),
            by_name: HashMap::new(),
            sample_capacity,
        }
    }

    /// Find the profiler already registered for `name`
    pub fn get_for(&self, name: &str) -> Option<ProfilerHandle> {
        self.by_name.get(name).copied()
    }

    /// Register a profiler for `name`. Returns the existing one if present.
    pub fn create_for(&mut self, name: &str) -> ProfilerHandle {
        if let Some(handle) = self.get_for(name) {
            return handle;
        }

        let handle = ProfilerHandle(self.profilers.len());
        let mut profiler = SystemProfiler::new(name, self.sample_capacity);
        profiler.set_color(PALETTE[handle.0 % PALETTE.len()]);

        self.profilers.push(profiler);
        self.by_name.insert(name.to_string(), handle);
        log::debug!("Created profiler '{}'", name);
        handle
    }

    pub fn get_or_create(&mut self, name: &str) -> ProfilerHandle {
        match self.get_for(name) {
            Some(handle) => handle,
            None => self.create_for(name),
        }
    }

    pub fn get(&self, handle: ProfilerHandle) -> Option<&SystemProfiler> {
        self.profilers.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ProfilerHandle) -> Option<&mut SystemProfiler> {
        self.profilers.get_mut(handle.0)
    }

    /// Look a profiler up by name
    pub fn by_name(&self, name: &str) -> Option<&SystemProfiler> {
        self.get_for(name).and_then(|h| self.get(h))
    }

    pub fn start(&mut self, handle: ProfilerHandle) {
        if let Some(profiler) = self.get_mut(handle) {
            profiler.start();
        }
    }

    pub fn stop(&mut self, handle: ProfilerHandle) {
        if let Some(profiler) = self.get_mut(handle) {
            profiler.stop();
        }
    }

    pub fn len(&self) -> usize {
        self.profilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profilers.is_empty()
    }

    /// Profilers in creation order
    pub fn iter(&self) -> impl Iterator<Item = &SystemProfiler> {
        self.profilers.iter()
    }

    pub fn snapshots(&self) -> Vec<ProfilerSnapshot> {
        self.profilers.iter().map(SystemProfiler::snapshot).collect()
    }
}
