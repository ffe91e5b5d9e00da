//! Demo world and logic systems driven by `cadence run`

use cadence_core::{Result, Vec2};
use cadence_ecs::{GameWorld, ItemState, Position, Sprite, Tag, Velocity};
use cadence_render::PLACEMENT_GHOST_TAG;
use cadence_runtime::GameSystem;

/// Half-extent of the square the demo sprites wander in
pub const ARENA_HALF: f32 = 200.0;

/// Fill `world` with `movers` moving sprites plus one dropped item, one
/// held item, and a placement ghost.
pub fn populate(world: &mut GameWorld, movers: usize) -> Result<()> {
    for i in 0..movers {
        let angle = i as f32 * 0.7;
        let speed = 20.0 + (i % 5) as f32 * 10.0;
        world.spawn(
            format!("mover_{}", i),
            (
                Sprite::new("slime", 16.0, 16.0),
                Position(Vec2::new(angle.cos() * 50.0, angle.sin() * 50.0)),
                Velocity(Vec2::new(angle.cos() * speed, angle.sin() * speed)),
            ),
        )?;
    }

    world.spawn(
        "dropped_sword",
        (
            Sprite::new("sword", 8.0, 24.0),
            Position(Vec2::new(30.0, -10.0)),
            ItemState::DroppedInWorld,
        ),
    )?;
    world.spawn(
        "held_potion",
        (
            Sprite::new("potion", 8.0, 8.0),
            Position::default(),
            ItemState::InInventory,
        ),
    )?;

    let mut ghost = Sprite::new("chest", 32.0, 32.0);
    ghost.placement_valid = true;
    world.spawn(
        "placement_ghost",
        (ghost, Position(Vec2::new(-40.0, 40.0)), Tag::new(PLACEMENT_GHOST_TAG)),
    )?;

    log::debug!("Demo world populated with {} entities", world.entity_count());
    Ok(())
}

/// Integrates velocity with the fixed delta, bouncing off the arena edges
pub struct MovementSystem;

impl GameSystem<GameWorld> for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn process(&mut self, world: &mut GameWorld) -> Result<()> {
        let dt = world.delta();
        for (_, (position, velocity)) in world
            .hecs_mut()
            .query_mut::<(&mut Position, &mut Velocity)>()
        {
            position.0 += velocity.0 * dt;
            bounce(&mut position.0.x, &mut velocity.0.x);
            bounce(&mut position.0.y, &mut velocity.0.y);
        }
        Ok(())
    }
}

fn bounce(coord: &mut f32, speed: &mut f32) {
    if coord.abs() > ARENA_HALF {
        *coord = coord.clamp(-ARENA_HALF, ARENA_HALF);
        *speed = -*speed;
    }
}

/// Every `interval` ticks, queues a new dropped coin. Once `keep` coins are
/// live, the lowest-indexed one is queued for despawn.
pub struct SpawnerSystem {
    interval: u64,
    keep: usize,
    ticks: u64,
    spawned: u64,
}

impl SpawnerSystem {
    pub fn new(interval: u64, keep: usize) -> Self {
        Self {
            interval: interval.max(1),
            keep: keep.max(1),
            ticks: 0,
            spawned: 0,
        }
    }

    /// Items queued so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

impl GameSystem<GameWorld> for SpawnerSystem {
    fn name(&self) -> &str {
        "spawner"
    }

    fn process(&mut self, world: &mut GameWorld) -> Result<()> {
        self.ticks += 1;
        if self.ticks % self.interval != 0 {
            return Ok(());
        }

        let x = (self.spawned % 10) as f32 * 12.0 - 60.0;
        world.spawn_deferred((
            Sprite::new("coin", 6.0, 6.0),
            Position(Vec2::new(x, -80.0)),
            ItemState::DroppedInWorld,
            Tag::new("coin"),
        ));
        self.spawned += 1;

        let mut coins: Vec<_> = world
            .hecs()
            .query::<&Tag>()
            .iter()
            .filter(|(_, tag)| tag.is("coin"))
            .map(|(entity, _)| entity)
            .collect();
        if coins.len() >= self.keep {
            coins.sort_by_key(|entity| entity.id());
            if let Some(&oldest) = coins.first() {
                world.despawn_deferred(oldest);
            }
        }
        Ok(())
    }
}
