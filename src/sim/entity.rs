//! Entities and the ordered collection that owns them
//!
//! Draw order is insertion order: sky, ground, cookie, then obstacles as
//! they spawn. A respawned cookie goes to the end like any new entity.

use super::obstacle::Obstacle;
use super::player::Player;
use super::scroll::ScrollLayer;
use super::sprite::Sprite;
use crate::tuning::Tuning;

/// Kind tag used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Background,
    Ground,
    Player,
    Obstacle,
}

/// Anything that lives on screen
#[derive(Debug, Clone)]
pub enum Entity {
    Background(ScrollLayer),
    Ground(ScrollLayer),
    Player(Player),
    Obstacle(Obstacle),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Background(_) => EntityKind::Background,
            Entity::Ground(_) => EntityKind::Ground,
            Entity::Player(_) => EntityKind::Player,
            Entity::Obstacle(_) => EntityKind::Obstacle,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        match self {
            Entity::Background(layer) | Entity::Ground(layer) => &layer.sprite,
            Entity::Player(player) => &player.sprite,
            Entity::Obstacle(obstacle) => &obstacle.sprite,
        }
    }

    /// Ground and obstacles end a run on contact
    pub fn is_collidable(&self) -> bool {
        matches!(self.kind(), EntityKind::Ground | EntityKind::Obstacle)
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        match self {
            Entity::Background(layer) | Entity::Ground(layer) => {
                layer.update(dt);
            }
            Entity::Player(player) => player.update(dt, tuning),
            Entity::Obstacle(obstacle) => obstacle.update(dt, tuning.obstacle_speed),
        }
    }

    /// Whether the entity should be dropped after this frame's update
    pub fn is_expired(&self, tuning: &Tuning) -> bool {
        match self {
            Entity::Obstacle(obstacle) => obstacle.is_expired(tuning.despawn_right),
            _ => false,
        }
    }
}

/// The ordered set of live entities
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        })
    }

    /// Everything the player may crash into
    pub fn collidables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_collidable())
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    /// Update every entity in order, then drop the expired ones
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        for entity in &mut self.entities {
            entity.update(dt, tuning);
        }
        self.entities.retain(|e| !e.is_expired(tuning));
    }

    /// Remove every entity of `kind`, returning how many went
    pub fn remove_kind(&mut self, kind: EntityKind) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.kind() != kind);
        before - self.entities.len()
    }
}
