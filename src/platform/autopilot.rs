//! Scripted player for the headless demo
//!
//! Looks at the game each frame and produces the events a person would:
//! click Play on the menu, tap to stay level with the safe side of the next
//! obstacle, and tap again a little while after a crash.

use glam::Vec2;

use super::Event;
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::{GameLoop, Screen};
use crate::sim::entity::EntityKind;
use crate::sim::obstacle::Orientation;
use crate::sim::state::GameState;
use crate::ui::MenuAction;

/// Clearance kept between the cookie and an obstacle's edge
const MARGIN: f32 = 30.0;
/// Highest the cookie is steered (screen y of its low point)
const MIN_TARGET: f32 = 100.0;

/// Demo/idle mode AI
#[derive(Debug, Clone)]
pub struct AutoPilot {
    /// Frames to wait on the game-over screen before tapping
    pub respawn_delay: u32,
    waited: u32,
    /// Jumps issued so far
    pub jumps: u32,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self::new(60)
    }
}

impl AutoPilot {
    pub fn new(respawn_delay: u32) -> Self {
        Self {
            respawn_delay,
            waited: 0,
            jumps: 0,
        }
    }

    /// Events for the coming frame
    pub fn poll(&mut self, game: &GameLoop) -> Vec<Event> {
        match game.screen() {
            Screen::MainMenu => game
                .menu()
                .button(MenuAction::Play)
                .map(|b| {
                    let r = b.rect;
                    vec![Event::pointer(r.center_x() as f32, r.center_y() as f32)]
                })
                .unwrap_or_default(),
            Screen::Playing => self.play(game.state()),
        }
    }

    fn play(&mut self, state: &GameState) -> Vec<Event> {
        if !state.is_active() {
            self.waited += 1;
            if self.waited >= self.respawn_delay {
                self.waited = 0;
                return vec![tap()];
            }
            return Vec::new();
        }
        self.waited = 0;

        let Some(player) = state.world.player() else {
            return Vec::new();
        };
        let center_y = player.sprite.rect.center_y() as f32;
        if center_y > target_y(state) && player.velocity > -50.0 {
            self.jumps += 1;
            return vec![tap()];
        }
        Vec::new()
    }
}

fn tap() -> Event {
    Event::PointerDown {
        pos: Vec2::new(WINDOW_WIDTH as f32 / 2.0, WINDOW_HEIGHT as f32 / 2.0),
    }
}

/// Lowest point the cookie should sink to before jumping again
pub fn target_y(state: &GameState) -> f32 {
    let tuning = &state.tuning;
    let Some(player) = state.world.player() else {
        return WINDOW_HEIGHT as f32 / 2.0;
    };
    let half_height = player.sprite.rect.h as f32 / 2.0;
    // Height gained by one jump from rest
    let rise = if tuning.gravity > 0.0 {
        tuning.jump_velocity * tuning.jump_velocity / (2.0 * tuning.gravity)
    } else {
        0.0
    };
    let ground_top = state
        .world
        .iter()
        .find(|e| e.kind() == EntityKind::Ground)
        .map(|e| e.sprite().rect.top() as f32)
        .unwrap_or(WINDOW_HEIGHT as f32);
    let max_target = (ground_top - half_height - MARGIN).max(MIN_TARGET);

    // The first obstacle whose right edge is still ahead of the cookie's left
    let next = state
        .world
        .obstacles()
        .filter(|o| o.sprite.rect.right() >= player.sprite.rect.left())
        .min_by_key(|o| o.sprite.rect.left());

    let target = match next {
        // Rises from the floor: stay above its top
        Some(o) if o.orientation == Orientation::TopMounted => {
            o.sprite.rect.top() as f32 - half_height - MARGIN
        }
        // Hangs from the ceiling: peak of the jump must stay below its bottom
        Some(o) => o.sprite.rect.bottom() as f32 + half_height + MARGIN + rise,
        None => WINDOW_HEIGHT as f32 / 2.0,
    };
    target.clamp(MIN_TARGET, max_target)
}
