//! Collision detection for the cookie
//!
//! A bounding-box test first, then a pixel mask test against the ground and
//! every obstacle. Touching the top of the screen also counts as a crash.

use super::entity::{Entity, EntityKind, World};
use super::player::Player;
use super::sprite::Rect;

/// What the cookie ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    /// Top edge at or above y = 0
    Ceiling,
    Ground,
    Obstacle,
}

/// Check whether the cookie overlaps an entity at pixel level
pub fn player_hits(player: &Player, other: &Entity) -> bool {
    let ps = &player.sprite;
    let os = other.sprite();
    let (Some(pm), Some(om)) = (ps.mask.as_ref(), os.mask.as_ref()) else {
        return false;
    };
    // Masks are placed at each rect's top-left; the player's may be larger
    // than its rect after rotation, so the box test uses the mask extents.
    let pbox = Rect::new(ps.rect.x, ps.rect.y, pm.width() as i32, pm.height() as i32);
    if !pbox.intersects(&os.rect) {
        return false;
    }
    pm.overlaps(ps.rect.top_left(), om, os.rect.top_left())
}

/// Find the first thing the cookie is touching, if any
pub fn detect(world: &World) -> Option<CollisionCause> {
    let player = world.player()?;
    if player.sprite.rect.top() <= 0 {
        return Some(CollisionCause::Ceiling);
    }
    world
        .collidables()
        .find(|e| player_hits(player, e))
        .map(|e| match e.kind() {
            EntityKind::Ground => CollisionCause::Ground,
            _ => CollisionCause::Obstacle,
        })
}

/// End the run: clear every obstacle and remove the cookie
pub fn resolve(world: &mut World) {
    let cleared = world.remove_kind(EntityKind::Obstacle);
    world.remove_kind(EntityKind::Player);
    log::debug!("Cleared {} obstacles", cleared);
}
