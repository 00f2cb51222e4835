//! Draws a full frame for each screen

use glam::{IVec2, Vec2};

use super::Surface;
use crate::consts::{HUD_FONT_SIZE, PAUSE_HINT_POS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::sprite::{Rect, Rgba};
use crate::sim::state::{GameState, RunState};
use crate::ui::{self, MainMenu};

const HUD_COLOR: Rgba = Rgba::BLACK;
const OVERLAY_TEXT: Rgba = Rgba::WHITE;

/// Mid-top of the score text for the current run state
pub fn score_position(run: RunState, overlay_height: u32) -> IVec2 {
    let x = WINDOW_WIDTH as i32 / 2;
    let y = match run {
        RunState::Active => WINDOW_HEIGHT as f32 / 10.0,
        RunState::GameOver => WINDOW_HEIGHT as f32 / 2.0 + overlay_height as f32 / 1.5,
    };
    IVec2::new(x, y as i32)
}

/// Where the game-over panel sits: centered in the window
pub fn overlay_rect(size: IVec2) -> Rect {
    Rect::with_center(
        size,
        Vec2::new(WINDOW_WIDTH as f32 / 2.0, WINDOW_HEIGHT as f32 / 2.0),
    )
}

/// Entities back to front, then HUD, then the game-over panel
pub fn draw_playing(surface: &mut dyn Surface, state: &GameState) {
    surface.clear(Rgba::BLACK);
    for entity in state.world.iter() {
        let sprite = entity.sprite();
        surface.blit(&sprite.image, sprite.rect.top_left());
    }

    let overlay = &state.assets().overlay;
    surface.text(
        &state.score.to_string(),
        score_position(state.run, overlay.height()),
        HUD_FONT_SIZE,
        HUD_COLOR,
    );
    surface.text(
        "ESC",
        IVec2::new(PAUSE_HINT_POS.0, PAUSE_HINT_POS.1),
        HUD_FONT_SIZE,
        HUD_COLOR,
    );

    if state.run == RunState::GameOver {
        let rect = overlay_rect(overlay.size());
        surface.blit(overlay, rect.top_left());
        surface.text(
            "GAME OVER",
            IVec2::new(rect.center_x(), rect.top() + 30),
            HUD_FONT_SIZE,
            OVERLAY_TEXT,
        );
        surface.text(
            "TAP TO PLAY",
            IVec2::new(rect.center_x(), rect.top() + 90),
            HUD_FONT_SIZE * 2 / 3,
            OVERLAY_TEXT,
        );
    }
}

/// Menu background, buttons and (once requested) the help text
pub fn draw_menu(surface: &mut dyn Surface, menu: &MainMenu) {
    surface.clear(ui::MENU_BACKGROUND);
    for button in &menu.buttons {
        surface.fill_rect(button.rect, ui::BUTTON_COLOR);
        surface.text(
            button.label,
            button.label_midtop(),
            ui::LABEL_SIZE,
            ui::LABEL_COLOR,
        );
    }
    if menu.show_help {
        for (line, y) in ui::HELP_LINES {
            surface.text(
                line,
                IVec2::new(WINDOW_WIDTH as i32 / 2, y),
                ui::LABEL_SIZE,
                ui::LABEL_COLOR,
            );
        }
    }
}
