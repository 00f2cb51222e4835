//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, plays sounds
//! or reads input:
//! - Time-scaled steps driven by the caller's `dt`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities)

pub mod collision;
pub mod entity;
pub mod obstacle;
pub mod player;
pub mod scroll;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::CollisionCause;
pub use entity::{Entity, EntityKind, World};
pub use obstacle::{Obstacle, Orientation};
pub use player::{Frames, Player};
pub use scroll::ScrollLayer;
pub use sprite::{Image, Mask, Rect, Rgba, Sprite};
pub use state::{GameEvent, GameState, RunState, SpawnTimer, score_for};
pub use tick::tick;
