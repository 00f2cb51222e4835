//! Flappy Cookie entry point
//!
//! Runs the game headlessly: the autopilot plays into the software canvas on a
//! fixed 60 Hz clock (or the wall clock when `realtime` is set), and each
//! finished run is logged.

use std::time::Duration;

use anyhow::Context;

use flappy_cookie::audio::LogAudio;
use flappy_cookie::consts::{DEMO_DT, WINDOW_HEIGHT, WINDOW_WIDTH};
use flappy_cookie::platform::{AutoPilot, Event, clock_for};
use flappy_cookie::renderer::Canvas;
use flappy_cookie::settings::{CONFIG_ENV, Settings};
use flappy_cookie::{Assets, Flow, GameLoop};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Flappy Cookie (headless) starting...");

    let config = std::env::var_os(CONFIG_ENV).map(std::path::PathBuf::from);
    let settings = Settings::load_or_default(config.as_deref())
        .context("failed to load settings")?;
    let assets = Assets::build().context("failed to build assets")?;

    let mut audio = LogAudio;
    let mut canvas = Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut game = GameLoop::new(&settings, assets, &mut audio);
    let mut clock = clock_for(settings.realtime, DEMO_DT);
    let mut pilot = AutoPilot::default();
    if settings.realtime {
        log::info!("Pacing the demo to the wall clock");
    }

    let mut elapsed = 0.0;
    let mut best = 0;

    loop {
        let dt = clock.delta();
        elapsed += dt;
        let mut events = pilot.poll(&game);
        if elapsed >= settings.demo_seconds {
            events.push(Event::Quit);
        }

        let was_active = game.state().is_active();
        if game.frame(dt, &events, &mut canvas, &mut audio) == Flow::Quit {
            break;
        }

        let state = game.state();
        // Score stays frozen after a crash
        if was_active && !state.is_active() {
            best = best.max(state.score);
            log::info!("Run {} scored {}", state.runs, state.score);
        }

        if settings.realtime {
            std::thread::sleep(Duration::from_secs_f32(DEMO_DT));
        }
    }

    let state = game.state();
    log::info!(
        "Demo finished after {} frames: {} runs, best score {}, {} obstacles, {} jumps",
        game.frames(),
        state.runs,
        best.max(state.score),
        state.obstacles_spawned,
        pilot.jumps
    );

    if let Some(path) = &settings.snapshot_path {
        canvas
            .write_png(path)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    }

    Ok(())
}
