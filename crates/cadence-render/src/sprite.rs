//! Sprite rendering as a render-phase system

use cadence_core::{Color, Result};
use cadence_ecs::{GameWorld, ItemState, Position, Sprite, Tag};
use cadence_runtime::{GameSystem, SystemPhase};
use std::cell::Cell;
use std::rc::Rc;

/// Tag marking the translucent preview of an item being placed
pub const PLACEMENT_GHOST_TAG: &str = "itemPlacementGhost";

const GHOST_VALID: Color = Color::new(0.0, 1.0, 0.0, 0.6);
const GHOST_INVALID: Color = Color::new(1.0, 0.0, 0.0, 0.6);

/// One sprite quad, positioned by its lower-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub region: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub tint: Color,
}

/// A 2D batching backend
pub trait SpriteBatch {
    fn begin(&mut self);
    fn draw(&mut self, sprite: &SpriteDraw);
    fn end(&mut self);
}

/// Batch that keeps the draws of the most recent begin/end pair
#[derive(Debug, Default)]
pub struct RecordingBatch {
    draws: Vec<SpriteDraw>,
    batches: u64,
    open: bool,
}

impl RecordingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[SpriteDraw] {
        &self.draws
    }

    /// Completed begin/end pairs
    pub fn batches(&self) -> u64 {
        self.batches
    }
}

impl SpriteBatch for RecordingBatch {
    fn begin(&mut self) {
        self.draws.clear();
        self.open = true;
    }

    fn draw(&mut self, sprite: &SpriteDraw) {
        if !self.open {
            log::warn!("Sprite '{}' drawn outside begin/end", sprite.region);
        }
        self.draws.push(sprite.clone());
    }

    fn end(&mut self) {
        self.open = false;
        self.batches += 1;
    }
}

/// Sprite counts published by a [`SpriteRenderSystem`].
///
/// Clones share the same counters, so a caller can keep a handle after the
/// system has been moved into the loop.
#[derive(Debug, Clone, Default)]
pub struct SpriteStats {
    last_frame: Rc<Cell<usize>>,
    total: Rc<Cell<u64>>,
}

impl SpriteStats {
    /// Sprites drawn by the most recent frame
    pub fn last_sprite_count(&self) -> usize {
        self.last_frame.get()
    }

    pub fn total_sprites(&self) -> u64 {
        self.total.get()
    }

    fn publish(&self, count: usize) {
        self.last_frame.set(count);
        self.total.set(self.total.get() + count as u64);
    }
}

/// Draws every visible sprite in the world once per frame.
///
/// Entities without an [`ItemState`] or with [`ItemState::InWorld`] are
/// drawn first, dropped items after them. Inventory items are skipped.
/// Sprites are centered on their [`Position`].
pub struct SpriteRenderSystem<B> {
    batch: B,
    stats: SpriteStats,
}

impl<B: SpriteBatch> SpriteRenderSystem<B> {
    pub fn new(batch: B) -> Self {
        Self {
            batch,
            stats: SpriteStats::default(),
        }
    }

    pub fn batch(&self) -> &B {
        &self.batch
    }

    /// Shared handle to this system's sprite counters
    pub fn stats(&self) -> SpriteStats {
        self.stats.clone()
    }

    pub fn last_sprite_count(&self) -> usize {
        self.stats.last_sprite_count()
    }

    fn render_entities(&mut self, world: &GameWorld) -> usize {
        let mut query = world
            .hecs()
            .query::<(&Sprite, &Position, Option<&ItemState>, Option<&Tag>)>();
        let mut drawn = 0;

        for (_, (sprite, position, item, tag)) in query.iter() {
            if item.is_some_and(|state| *state != ItemState::InWorld) {
                continue;
            }

            let tint = match tag {
                Some(tag) if tag.is(PLACEMENT_GHOST_TAG) => {
                    if sprite.placement_valid {
                        GHOST_VALID
                    } else {
                        GHOST_INVALID
                    }
                }
                _ => Color::WHITE,
            };

            self.batch.draw(&centered(sprite, position, tint));
            drawn += 1;
        }

        drawn
    }

    fn render_dropped_entities(&mut self, world: &GameWorld) -> usize {
        let mut query = world.hecs().query::<(&Sprite, &Position, &ItemState)>();
        let mut drawn = 0;

        for (_, (sprite, position, item)) in query.iter() {
            if *item != ItemState::DroppedInWorld {
                continue;
            }
            self.batch.draw(&centered(sprite, position, Color::WHITE));
            drawn += 1;
        }

        drawn
    }
}

fn centered(sprite: &Sprite, position: &Position, tint: Color) -> SpriteDraw {
    SpriteDraw {
        region: sprite.region.clone(),
        x: position.0.x - sprite.width * 0.5,
        y: position.0.y - sprite.height * 0.5,
        width: sprite.width,
        height: sprite.height,
        tint,
    }
}

impl<B: SpriteBatch> GameSystem<GameWorld> for SpriteRenderSystem<B> {
    fn name(&self) -> &str {
        "sprite_render"
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Render
    }

    fn process(&mut self, world: &mut GameWorld) -> Result<()> {
        self.batch.begin();
        let drawn = self.render_entities(world) + self.render_dropped_entities(world);
        self.batch.end();

        log::trace!("Drew {} sprites", drawn);
        self.stats.publish(drawn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Vec2;

    fn sprite(region: &str) -> Sprite {
        Sprite::new(region, 2.0, 4.0)
    }

    fn draw_of<'a>(
        system: &'a SpriteRenderSystem<RecordingBatch>,
        region: &str,
    ) -> &'a SpriteDraw {
        system
            .batch()
            .draws()
            .iter()
            .find(|d| d.region == region)
            .unwrap()
    }

    #[test]
    fn test_renders_as_render_phase() {
        let system = SpriteRenderSystem::new(RecordingBatch::new());
        assert_eq!(system.phase(), SystemPhase::Render);
    }

    #[test]
    fn test_sprite_centered_on_position() {
        let mut world = GameWorld::new();
        world
            .spawn("tree", (sprite("tree"), Position(Vec2::new(10.0, 10.0))))
            .unwrap();

        let mut system = SpriteRenderSystem::new(RecordingBatch::new());
        system.process(&mut world).unwrap();

        let draw = draw_of(&system, "tree");
        assert_eq!((draw.x, draw.y), (9.0, 8.0));
        assert_eq!(draw.tint, Color::WHITE);
        assert_eq!(system.batch().batches(), 1);
    }

    #[test]
    fn test_item_states_filter_draws() {
        let mut world = GameWorld::new();
        let at = Position(Vec2::ZERO);
        for (name, state) in [
            ("placed", Some(ItemState::InWorld)),
            ("dropped", Some(ItemState::DroppedInWorld)),
            ("held", Some(ItemState::InInventory)),
            ("rock", None),
        ] {
            match state {
                Some(state) => world.spawn(name, (sprite(name), at, state)).unwrap(),
                None => world.spawn(name, (sprite(name), at)).unwrap(),
            };
        }

        let mut system = SpriteRenderSystem::new(RecordingBatch::new());
        system.process(&mut world).unwrap();

        let regions: Vec<&str> = system
            .batch()
            .draws()
            .iter()
            .map(|d| d.region.as_str())
            .collect();
        assert_eq!(regions.len(), 3);
        assert!(!regions.contains(&"held"));
        assert_eq!(regions.last(), Some(&"dropped"));
        assert_eq!(system.last_sprite_count(), 3);
    }

    #[test]
    fn test_placement_ghost_tint() {
        let mut world = GameWorld::new();
        let mut valid = sprite("valid");
        valid.placement_valid = true;
        let at = Position(Vec2::ZERO);
        let ghost = || Tag::new(PLACEMENT_GHOST_TAG);
        world.spawn("valid", (valid, at, ghost())).unwrap();
        world.spawn("invalid", (sprite("invalid"), at, ghost())).unwrap();
        world.spawn("other", (sprite("other"), at, Tag::new("decor"))).unwrap();

        let mut system = SpriteRenderSystem::new(RecordingBatch::new());
        system.process(&mut world).unwrap();

        assert_eq!(draw_of(&system, "valid").tint, GHOST_VALID);
        assert_eq!(draw_of(&system, "invalid").tint, GHOST_INVALID);
        assert_eq!(draw_of(&system, "other").tint, Color::WHITE);
    }

    #[test]
    fn test_stats_handle_outlives_system_borrow() {
        let mut world = GameWorld::new();
        world.spawn("a", (sprite("a"), Position::default())).unwrap();

        let mut system = SpriteRenderSystem::new(RecordingBatch::new());
        let stats = system.stats();

        system.process(&mut world).unwrap();
        system.process(&mut world).unwrap();

        assert_eq!(stats.last_sprite_count(), 1);
        assert_eq!(stats.total_sprites(), 2);
    }
}
