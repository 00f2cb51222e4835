//! Game state and core simulation types
//!
//! Everything a run needs lives here: the entity collection, the run state,
//! the spawn timer, the score clock and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::CollisionCause;
use super::entity::{Entity, World};
use super::obstacle::Obstacle;
use super::player::Player;
use super::scroll::ScrollLayer;
use crate::assets::Assets;
use crate::tuning::Tuning;

/// Whether the current run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Cookie alive, obstacles spawning, score counting
    Active,
    /// Cookie crashed; the field is frozen until the next tap
    GameOver,
}

/// Things that happened during a tick, for sound and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new run began (cookie spawned)
    RunStarted,
    /// The cookie jumped
    Jumped,
    /// An obstacle entered from the right
    ObstacleSpawned,
    /// The run ended
    Crashed { cause: CollisionCause, score: u32 },
}

/// Fixed-cadence trigger driven by elapsed frame time
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `ms` and return how many times the timer fired
    pub fn advance(&mut self, ms: f64) -> u32 {
        self.elapsed_ms += ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            fired += 1;
        }
        fired
    }
}

/// Score for a run that has lasted `elapsed_ms`
pub fn score_for(elapsed_ms: f64, interval_ms: u32) -> u32 {
    (elapsed_ms.max(0.0) / interval_ms as f64).floor() as u32
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    assets: Assets,
    /// Live entities in draw order
    pub world: World,
    pub run: RunState,
    /// Score of the current (or last finished) run
    pub score: u32,
    /// Milliseconds of simulated play time
    pub play_ms: f64,
    /// Play time at which the current run began
    pub run_start_ms: f64,
    pub spawn_timer: SpawnTimer,
    /// Obstacles created since the game began
    pub obstacles_spawned: u64,
    /// Runs started, including the first
    pub runs: u32,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed; the first run starts active
    pub fn new(seed: u64, tuning: Tuning, assets: Assets) -> Self {
        let mut world = World::new();
        world.push(Entity::Background(ScrollLayer::background(
            assets.background.clone(),
            tuning.background_speed,
        )));
        world.push(Entity::Ground(ScrollLayer::ground(
            assets.ground.clone(),
            tuning.ground_speed,
        )));

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer: SpawnTimer::new(tuning.spawn_interval_ms),
            tuning,
            assets,
            world,
            run: RunState::GameOver,
            score: 0,
            play_ms: 0.0,
            run_start_ms: 0.0,
            obstacles_spawned: 0,
            runs: 0,
            events: Vec::new(),
        };
        state.start_run();
        state
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn is_active(&self) -> bool {
        self.run == RunState::Active
    }

    /// Pointer-down during play: jump while alive, respawn after a crash
    pub fn tap(&mut self) {
        match self.run {
            RunState::Active => {
                let jump_velocity = self.tuning.jump_velocity;
                if let Some(player) = self.world.player_mut() {
                    player.jump(jump_velocity);
                    self.events.push(GameEvent::Jumped);
                }
            }
            RunState::GameOver => self.start_run(),
        }
    }

    /// Spawn a fresh cookie and restart the score clock
    pub fn start_run(&mut self) {
        self.world
            .push(Entity::Player(Player::new(self.assets.player_frames.clone())));
        self.run = RunState::Active;
        self.run_start_ms = self.play_ms;
        self.score = 0;
        self.runs += 1;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run {} started (seed {})", self.runs, self.seed);
    }

    /// Add a randomly placed obstacle
    pub fn spawn_obstacle(&mut self) {
        let Some(obstacle) = Obstacle::spawn(&self.assets.obstacles, &self.tuning, &mut self.rng)
        else {
            log::warn!("No obstacle art, skipping spawn");
            return;
        };
        log::debug!(
            "Spawned {:?} obstacle (variant {}) at x={}",
            obstacle.orientation,
            obstacle.variant,
            obstacle.sprite.rect.x
        );
        self.world.push(Entity::Obstacle(obstacle));
        self.obstacles_spawned += 1;
        self.events.push(GameEvent::ObstacleSpawned);
    }

    /// Refresh the score from the play clock (only while active)
    pub fn update_score(&mut self) {
        if self.is_active() {
            self.score = score_for(self.play_ms - self.run_start_ms, self.tuning.score_interval_ms);
        }
    }

    /// End the current run
    pub fn game_over(&mut self, cause: CollisionCause) {
        super::collision::resolve(&mut self.world);
        self.run = RunState::GameOver;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        log::info!("Run {} over: hit {:?}, score {}", self.runs, cause, self.score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
