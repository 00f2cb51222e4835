//! Flappy Cookie - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, run state)
//! - `game`: Frame loop and screen state machine
//! - `renderer`: Software canvas and scene drawing
//! - `platform`: Clock/input/audio collaborators and native implementations
//! - `assets`: Procedurally generated artwork
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use assets::Assets;
pub use error::GameError;
pub use game::{Flow, GameLoop, Screen};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: u32 = 480;
    pub const WINDOW_HEIGHT: u32 = 800;

    /// Number of animation frames for the cookie
    pub const PLAYER_FRAME_COUNT: usize = 3;
    /// Number of obstacle art variants
    pub const OBSTACLE_VARIANTS: usize = 2;

    /// Where the pause hint is drawn (mid-top)
    pub const PAUSE_HINT_POS: (i32, i32) = (400, 30);
    /// HUD font size in pixels
    pub const HUD_FONT_SIZE: u32 = 30;

    /// Fixed frame step used by the headless demo (60 Hz)
    pub const DEMO_DT: f32 = 1.0 / 60.0;
}

/// Round a float coordinate to a pixel, ties to even
#[inline]
pub fn round_px(v: f32) -> i32 {
    v.round_ties_even() as i32
}
