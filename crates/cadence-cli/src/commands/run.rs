//! Run command - drive the demo world for a fixed number of frames

use crate::demo::{self, MovementSystem, SpawnerSystem};
use anyhow::{Context, Result};
use cadence_core::LoopConfig;
use cadence_ecs::GameWorld;
use cadence_render::{RecordingBatch, RecordingSurface, SpriteRenderSystem, SpriteStats};
use cadence_runtime::{GameLoop, LoopStats, ManualTime, MonotonicTime, ProfilerSnapshot};
use serde::Serialize;
use std::thread;
use std::time::Duration;

pub struct RunArgs {
    pub config: Option<String>,
    pub headless: bool,
    pub tick_ms: Option<u64>,
    pub frames: u64,
    pub frame_ms: u64,
    pub realtime: bool,
    pub entities: usize,
    pub json: bool,
}

/// Summary printed at the end of a run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub mode: &'static str,
    pub tick_ms: u64,
    pub stats: LoopStats,
    pub entities: usize,
    pub sprites_last_frame: Option<usize>,
    pub sprites_total: Option<u64>,
    pub surface_clears: Option<u64>,
    pub interpolation_alpha: f64,
    pub profilers: Vec<ProfilerSnapshot>,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let report = simulate(config, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn resolve_config(args: &RunArgs) -> Result<LoopConfig> {
    let mut config = match &args.config {
        Some(path) => {
            LoopConfig::load(path).with_context(|| format!("Failed to load config '{}'", path))?
        }
        None => LoopConfig::default(),
    };

    if args.headless {
        config.headless = true;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.ms_per_tick = tick_ms;
    }
    config.validate()?;
    Ok(config)
}

fn simulate(config: LoopConfig, args: &RunArgs) -> Result<RunReport> {
    let mut world = GameWorld::new();
    demo::populate(&mut world, args.entities)?;

    let headless = config.headless;
    let tick_ms = config.ms_per_tick;
    let frame = Duration::from_millis(args.frame_ms);

    let mut builder = GameLoop::builder(config)
        .with_system(MovementSystem)
        .with_system(SpawnerSystem::new(30, 8));

    let mut sprites: Option<SpriteStats> = None;
    let mut surface: Option<RecordingSurface> = None;
    if !headless {
        let renderer = SpriteRenderSystem::new(RecordingBatch::new());
        sprites = Some(renderer.stats());
        let target = RecordingSurface::new();
        surface = Some(target.clone());
        builder = builder.with_system(renderer).with_surface(target);
    }

    let manual = ManualTime::new();
    builder = if args.realtime {
        builder.with_time_source(MonotonicTime)
    } else {
        builder.with_time_source(manual.clone())
    };

    let mut game_loop = builder.build()?;

    log::info!(
        "Running {} frames of {}ms ({})",
        args.frames,
        args.frame_ms,
        if args.realtime { "realtime" } else { "simulated" }
    );

    for _ in 0..args.frames {
        if args.realtime {
            thread::sleep(frame);
        } else {
            manual.advance(frame);
        }
        let report = game_loop.run_frame(&mut world)?;
        log::debug!(
            "Frame: {:?} elapsed, {} ticks, {:?} left over",
            report.frame_time,
            report.ticks,
            report.accumulator
        );
    }

    Ok(RunReport {
        mode: if headless { "headless" } else { "rendering" },
        tick_ms,
        stats: game_loop.stats(),
        entities: world.entity_count(),
        sprites_last_frame: sprites.as_ref().map(SpriteStats::last_sprite_count),
        sprites_total: sprites.as_ref().map(SpriteStats::total_sprites),
        surface_clears: surface.as_ref().map(RecordingSurface::clears),
        interpolation_alpha: game_loop.interpolation_alpha(),
        profilers: game_loop
            .profilers()
            .map(|registry| registry.snapshots())
            .unwrap_or_default(),
    })
}

fn print_report(report: &RunReport) {
    println!("Mode:          {}", report.mode);
    println!("Tick:          {}ms", report.tick_ms);
    println!("Frames:        {}", report.stats.frames);
    println!("Logic ticks:   {}", report.stats.ticks);
    println!("Clamped:       {}", report.stats.clamped_frames);
    println!("Entities:      {}", report.entities);
    println!("Alpha:         {:.3}", report.interpolation_alpha);

    if let Some(count) = report.sprites_last_frame {
        println!("Sprites/frame: {}", count);
    }
    if let Some(clears) = report.surface_clears {
        println!("Clears:        {}", clears);
    }

    if !report.profilers.is_empty() {
        println!();
        println!("{:<16} {:>8} {:>12} {:>12}", "Profiler", "Calls", "Avg (us)", "Max (us)");
        for profiler in &report.profilers {
            println!(
                "{:<16} {:>8} {:>12.2} {:>12.2}",
                profiler.name, profiler.calls, profiler.average_us, profiler.max_us
            );
        }
    }
}
