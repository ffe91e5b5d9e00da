//! GameWorld - hecs world with named entities and a deferred change queue

use bimap::BiMap;
use cadence_core::{CadenceError, Result};
use hecs::{CommandBuffer, Component, DynamicBundle, Entity};

/// Structural changes applied by one [`GameWorld::update_entity_states`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityChanges {
    pub spawned: usize,
    pub despawned: usize,
}

impl EntityChanges {
    pub fn is_empty(&self) -> bool {
        self.spawned == 0 && self.despawned == 0
    }
}

/// The ECS world driven by the game loop
///
/// Wraps hecs::World with:
/// - Named entity lookup
/// - A command buffer for changes made while systems iterate
/// - The fixed simulation delta published by the loop
pub struct GameWorld {
    /// The underlying hecs world
    world: hecs::World,
    /// Entity name <-> hecs::Entity
    names: BiMap<String, Entity>,
    /// Queued spawns and inserts
    commands: CommandBuffer,
    pending_spawns: usize,
    pending_inserts: usize,
    /// Queued despawns, applied after the command buffer
    pending_despawns: Vec<Entity>,
    /// Seconds of simulated time per logic tick
    delta: f32,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GameWorld {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            names: BiMap::new(),
            commands: CommandBuffer::new(),
            pending_spawns: 0,
            pending_inserts: 0,
            pending_despawns: Vec::new(),
            delta: 0.0,
        }
    }

    /// Spawn a named entity immediately
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        components: impl DynamicBundle,
    ) -> Result<Entity> {
        let name = name.into();

        if self.names.contains_left(&name) {
            return Err(CadenceError::DuplicateEntityName(name));
        }

        let entity = self.world.spawn(components);
        self.names.insert(name, entity);
        Ok(entity)
    }

    /// Despawn an entity immediately
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.world
            .despawn(entity)
            .map_err(|_| CadenceError::EntityNotFound(format!("{:?}", entity)))?;
        self.names.remove_by_right(&entity);
        Ok(())
    }

    /// Queue an unnamed spawn for the next state update
    pub fn spawn_deferred(&mut self, components: impl DynamicBundle) {
        self.commands.spawn(components);
        self.pending_spawns += 1;
    }

    /// Queue components to be added to an existing entity
    pub fn insert_deferred(&mut self, entity: Entity, components: impl DynamicBundle) {
        self.commands.insert(entity, components);
        self.pending_inserts += 1;
    }

    /// Queue a despawn for the next state update
    pub fn despawn_deferred(&mut self, entity: Entity) {
        self.pending_despawns.push(entity);
    }

    /// Whether any structural change is waiting to be applied
    pub fn has_pending_changes(&self) -> bool {
        self.pending_spawns > 0 || self.pending_inserts > 0 || !self.pending_despawns.is_empty()
    }

    /// Apply every queued change.
    ///
    /// Called by the game loop after each system runs. Despawns of entities
    /// that no longer exist are skipped.
    pub fn update_entity_states(&mut self) -> EntityChanges {
        let spawned = std::mem::take(&mut self.pending_spawns);
        self.pending_inserts = 0;
        self.commands.run_on(&mut self.world);

        let mut despawned = 0;
        for entity in std::mem::take(&mut self.pending_despawns) {
            match self.despawn(entity) {
                Ok(()) => despawned += 1,
                Err(_) => log::debug!("Skipping despawn of missing entity {:?}", entity),
            }
        }

        EntityChanges { spawned, despawned }
    }

    /// Seconds of simulated time per logic tick
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.names.get_by_left(name).copied()
    }

    /// Name of an entity, if it was spawned with one
    pub fn name_of(&self, entity: Entity) -> Option<&str> {
        self.names.get_by_right(&entity).map(|s| s.as_str())
    }

    /// Clone a component off an entity
    pub fn get<T: Component + Clone>(&self, entity: Entity) -> Option<T> {
        self.world.get::<&T>(entity).ok().map(|c| (*c).clone())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Get the number of live entities
    pub fn entity_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Access the underlying hecs world for queries
    pub fn hecs(&self) -> &hecs::World {
        &self.world
    }

    pub fn hecs_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Position, Tag, Velocity};
    use cadence_core::Vec2;

    #[test]
    fn test_spawn_named() {
        let mut world = GameWorld::new();
        let e = world.spawn("player", (Position(Vec2::new(1.0, 2.0)),)).unwrap();

        assert_eq!(world.entity("player"), Some(e));
        assert_eq!(world.name_of(e), Some("player"));
        assert_eq!(world.get::<Position>(e), Some(Position(Vec2::new(1.0, 2.0))));
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut world = GameWorld::new();
        world.spawn("crate", ()).unwrap();
        let err = world.spawn("crate", ()).unwrap_err();
        assert!(matches!(err, CadenceError::DuplicateEntityName(_)));
    }

    #[test]
    fn test_deferred_spawn_applied_on_update() {
        let mut world = GameWorld::new();
        world.spawn_deferred((Position::default(), Velocity::default()));
        world.spawn_deferred((Position::default(),));

        assert_eq!(world.entity_count(), 0);
        assert!(world.has_pending_changes());

        let changes = world.update_entity_states();
        assert_eq!(changes, EntityChanges { spawned: 2, despawned: 0 });
        assert_eq!(world.entity_count(), 2);
        assert!(!world.has_pending_changes());
    }

    #[test]
    fn test_deferred_despawn_clears_name() {
        let mut world = GameWorld::new();
        let e = world.spawn("ghost", (Tag::new("itemPlacementGhost"),)).unwrap();

        world.despawn_deferred(e);
        assert!(world.contains(e));

        let changes = world.update_entity_states();
        assert_eq!(changes.despawned, 1);
        assert!(!world.contains(e));
        assert_eq!(world.entity("ghost"), None);
    }

    #[test]
    fn test_double_despawn_skipped() {
        let mut world = GameWorld::new();
        let e = world.spawn("a", ()).unwrap();
        world.despawn_deferred(e);
        world.despawn_deferred(e);

        let changes = world.update_entity_states();
        assert_eq!(changes.despawned, 1);
    }

    #[test]
    fn test_deferred_insert() {
        let mut world = GameWorld::new();
        let e = world.spawn("mover", (Position::default(),)).unwrap();
        world.insert_deferred(e, (Velocity(Vec2::new(3.0, 0.0)),));
        assert_eq!(world.get::<Velocity>(e), None);

        let changes = world.update_entity_states();
        assert!(changes.is_empty());
        assert_eq!(world.get::<Velocity>(e), Some(Velocity(Vec2::new(3.0, 0.0))));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut world = GameWorld::new();
        assert!(world.update_entity_states().is_empty());
    }
}
