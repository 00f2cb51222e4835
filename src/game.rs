//! Frame loop and screen state machine
//!
//! One [`GameLoop`] owns the menu, the simulation and the audio mix. Each call
//! to [`GameLoop::frame`] consumes one frame's events, advances the game when
//! it is on screen, and draws the result.

use crate::assets::Assets;
use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::platform::{Clock, Event, InputSource, Key};
use crate::renderer::{Surface, draw_menu, draw_playing};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::tick;
use crate::ui::{MainMenu, MenuAction};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
}

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The whole game
#[derive(Debug)]
pub struct GameLoop {
    screen: Screen,
    menu: MainMenu,
    state: GameState,
    audio: AudioManager,
    frames: u64,
}

impl GameLoop {
    /// Build the game on the main menu and start the music
    pub fn new(settings: &Settings, assets: Assets, sink: &mut dyn AudioSink) -> Self {
        let seed = settings.resolve_seed();
        let mut state = GameState::new(seed, settings.tuning.clone(), assets);
        // The first run is already set up; nothing to announce yet
        state.drain_events();

        let audio = AudioManager::from_settings(settings);
        audio.play_looped(sink, SoundEffect::Music, 1.0);
        log::info!("Game ready (seed {seed})");

        Self {
            screen: Screen::MainMenu,
            menu: MainMenu::new(),
            state,
            audio,
            frames: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn set_screen(&mut self, screen: Screen) {
        log::info!("Screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    /// Apply one event. Returns `Some(Flow::Quit)` to stop the game and
    /// `Some(Flow::Continue)` after a screen change.
    fn handle_event(&mut self, event: Event) -> Option<Flow> {
        match (self.screen, event) {
            (_, Event::Quit) => Some(Flow::Quit),
            (Screen::MainMenu, Event::KeyDown(Key::Escape)) => Some(Flow::Quit),
            (Screen::MainMenu, Event::PointerDown { pos }) => {
                if self.menu.click(pos) == Some(MenuAction::Play) {
                    self.set_screen(Screen::Playing);
                    return Some(Flow::Continue);
                }
                None
            }
            (Screen::Playing, Event::KeyDown(Key::Escape)) => {
                self.set_screen(Screen::MainMenu);
                Some(Flow::Continue)
            }
            (Screen::Playing, Event::PointerDown { .. }) => {
                self.state.tap();
                None
            }
        }
    }

    /// Run one frame: events, simulation (while playing), sound, drawing
    pub fn frame(
        &mut self,
        dt: f32,
        events: &[Event],
        surface: &mut dyn Surface,
        sink: &mut dyn AudioSink,
    ) -> Flow {
        let mut screen_changed = false;
        for &event in events {
            // Input meant for the old screen is stale; a quit still counts
            if screen_changed && event != Event::Quit {
                continue;
            }
            match self.handle_event(event) {
                Some(Flow::Quit) => {
                    log::info!("Quit requested");
                    return Flow::Quit;
                }
                Some(Flow::Continue) => screen_changed = true,
                None => {}
            }
        }

        match self.screen {
            Screen::MainMenu => draw_menu(surface, &self.menu),
            Screen::Playing => {
                tick(&mut self.state, dt);
                self.play_sounds(sink);
                draw_playing(surface, &self.state);
            }
        }
        surface.present();
        self.frames += 1;
        Flow::Continue
    }

    fn play_sounds(&mut self, sink: &mut dyn AudioSink) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => {
                    self.audio
                        .play(sink, SoundEffect::Jump, self.state.tuning.jump_volume);
                }
                GameEvent::Crashed { cause, score } => {
                    log::debug!("Crashed into {:?} with score {}", cause, score);
                }
                GameEvent::RunStarted | GameEvent::ObstacleSpawned => {}
            }
        }
    }

    /// Drive frames from `clock` and `input` until a quit
    pub fn run(
        &mut self,
        clock: &mut dyn Clock,
        input: &mut dyn InputSource,
        surface: &mut dyn Surface,
        sink: &mut dyn AudioSink,
    ) -> u64 {
        loop {
            let dt = clock.delta();
            let events = input.poll();
            if self.frame(dt, &events, surface, sink) == Flow::Quit {
                break;
            }
        }
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
    use crate::platform::{FixedClock, ScriptedInput};
    use crate::renderer::Canvas;
    use crate::sim::state::RunState;

    const PLAY: (f32, f32) = (240.0, 120.0);

    fn setup() -> (GameLoop, Canvas, RecordingAudio) {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let mut audio = RecordingAudio::default();
        let game = GameLoop::new(&settings, Assets::generate(), &mut audio);
        (game, Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT), audio)
    }

    #[test]
    fn test_starts_on_menu_with_music() {
        let (game, _, audio) = setup();
        assert_eq!(game.screen(), Screen::MainMenu);
        assert_eq!(audio.count(SoundEffect::Music), 1);
        assert!(audio.played[0].looped);
    }

    #[test]
    fn test_menu_does_not_advance_play() {
        let (mut game, mut canvas, mut audio) = setup();
        for _ in 0..10 {
            game.frame(0.5, &[], &mut canvas, &mut audio);
        }
        assert_eq!(game.state().play_ms, 0.0);
        assert_eq!(game.state().obstacles_spawned, 0);
        assert!(canvas.label("Play Game").is_some());
    }

    #[test]
    fn test_play_then_jump_plays_sound() {
        let (mut game, mut canvas, mut audio) = setup();
        let click = Event::pointer(PLAY.0, PLAY.1);
        game.frame(0.01, &[click], &mut canvas, &mut audio);
        assert_eq!(game.screen(), Screen::Playing);
        // The Play click itself does not jump
        assert_eq!(audio.count(SoundEffect::Jump), 0);

        game.frame(0.01, &[Event::pointer(10.0, 10.0)], &mut canvas, &mut audio);
        assert_eq!(audio.count(SoundEffect::Jump), 1);
        let jump = audio.played.last().unwrap();
        assert!((jump.volume - 0.8 * 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_escape_pauses_and_play_resumes() {
        let (mut game, mut canvas, mut audio) = setup();
        let click = Event::pointer(PLAY.0, PLAY.1);
        game.frame(0.5, &[click], &mut canvas, &mut audio);
        let played = game.state().play_ms;
        assert!(played > 0.0);

        game.frame(0.5, &[Event::KeyDown(Key::Escape)], &mut canvas, &mut audio);
        assert_eq!(game.screen(), Screen::MainMenu);
        game.frame(5.0, &[], &mut canvas, &mut audio);
        assert_eq!(game.state().play_ms, played);

        game.frame(0.5, &[click], &mut canvas, &mut audio);
        assert_eq!(game.screen(), Screen::Playing);
        assert_eq!(game.state().runs, 1);
        assert_eq!(game.state().play_ms, played + 500.0);
    }

    #[test]
    fn test_escape_on_menu_quits() {
        let (mut game, mut canvas, mut audio) = setup();
        let flow = game.frame(0.1, &[Event::KeyDown(Key::Escape)], &mut canvas, &mut audio);
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn test_quit_from_play_skips_drawing() {
        let (mut game, mut canvas, mut audio) = setup();
        game.frame(0.1, &[Event::pointer(PLAY.0, PLAY.1)], &mut canvas, &mut audio);
        let presented = canvas.presented();
        let flow = game.frame(0.1, &[Event::Quit], &mut canvas, &mut audio);
        assert_eq!(flow, Flow::Quit);
        assert_eq!(canvas.presented(), presented);
    }

    #[test]
    fn test_quit_after_screen_change_still_quits() {
        let (mut game, mut canvas, mut audio) = setup();
        let click = Event::pointer(PLAY.0, PLAY.1);
        let flow = game.frame(0.1, &[click, Event::Quit], &mut canvas, &mut audio);
        assert_eq!(flow, Flow::Quit);
        assert_eq!(game.screen(), Screen::Playing);

        let (mut game, mut canvas, mut audio) = setup();
        game.frame(0.1, &[click], &mut canvas, &mut audio);
        let events = [Event::KeyDown(Key::Escape), Event::Quit];
        assert_eq!(game.frame(0.1, &events, &mut canvas, &mut audio), Flow::Quit);
        assert_eq!(game.screen(), Screen::MainMenu);
    }

    #[test]
    fn test_input_after_screen_change_is_dropped() {
        let (mut game, mut canvas, mut audio) = setup();
        let click = Event::pointer(PLAY.0, PLAY.1);
        // Play, then a tap and an Escape meant for the menu
        let events = [click, click, Event::KeyDown(Key::Escape)];
        assert_eq!(game.frame(0.1, &events, &mut canvas, &mut audio), Flow::Continue);
        assert_eq!(game.screen(), Screen::Playing);
        assert_eq!(audio.count(SoundEffect::Jump), 0);
    }

    #[test]
    fn test_run_until_scripted_quit() {
        let (mut game, mut canvas, mut audio) = setup();
        let mut input = ScriptedInput::new([
            vec![Event::pointer(PLAY.0, PLAY.1)],
            vec![],
            vec![Event::pointer(1.0, 1.0)],
            vec![],
            vec![Event::Quit],
        ]);
        let frames = game.run(
            &mut FixedClock::new(1.0 / 60.0),
            &mut input,
            &mut canvas,
            &mut audio,
        );
        assert_eq!(frames, 4);
        assert_eq!(game.state().run, RunState::Active);
        assert_eq!(audio.count(SoundEffect::Jump), 1);
    }
}
