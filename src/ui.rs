//! Main menu layout and hit testing

use glam::{IVec2, Vec2};

use crate::consts::WINDOW_WIDTH;
use crate::sim::sprite::{Rect, Rgba};

pub const MENU_BACKGROUND: Rgba = Rgba::rgb(38, 161, 191);
pub const BUTTON_COLOR: Rgba = Rgba::rgb(143, 93, 39);
pub const LABEL_COLOR: Rgba = Rgba::WHITE;
pub const LABEL_SIZE: u32 = 40;

const BUTTON_SIZE: IVec2 = IVec2::new(200, 50);

/// Help text and the y of each line's mid-top
pub const HELP_LINES: [(&str, i32); 3] = [
    ("Tap to jump", 300),
    ("Jump past obstacles", 350),
    ("Time Alive = Score", 400),
];

/// What a menu button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Help,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub action: MenuAction,
}

impl Button {
    fn centered(label: &'static str, top: i32, action: MenuAction) -> Self {
        let midtop = Vec2::new(WINDOW_WIDTH as f32 / 2.0, top as f32);
        Self {
            label,
            rect: Rect::with_mid_top(BUTTON_SIZE, midtop),
            action,
        }
    }

    /// Where the label is drawn
    pub fn label_midtop(&self) -> IVec2 {
        IVec2::new(self.rect.center_x(), self.rect.top())
    }
}

/// The main menu screen
#[derive(Debug, Clone)]
pub struct MainMenu {
    pub buttons: Vec<Button>,
    /// Help text stays visible once requested
    pub show_help: bool,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            buttons: vec![
                Button::centered("Play Game", 100, MenuAction::Play),
                Button::centered("HELP", 200, MenuAction::Help),
            ],
            show_help: false,
        }
    }

    pub fn button(&self, action: MenuAction) -> Option<&Button> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Button under `pos`, if any
    pub fn hit(&self, pos: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains_point(pos))
            .map(|b| b.action)
    }

    /// Handle a pointer-down; help is handled here, play is returned to the caller
    pub fn click(&mut self, pos: Vec2) -> Option<MenuAction> {
        let action = self.hit(pos)?;
        if action == MenuAction::Help {
            self.show_help = true;
        }
        Some(action)
    }
}
