//! Platform abstraction layer
//!
//! Handles the things the game loop needs from the outside world:
//! - Time (per-frame delta): [`SystemClock`] for real-time play, [`FixedClock`]
//!   for deterministic runs
//! - Input events
//! - A scripted player for headless runs ([`autopilot`])

pub mod autopilot;

use std::collections::VecDeque;
use std::time::Instant;

use glam::Vec2;

pub use autopilot::AutoPilot;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

/// One input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Window closed or process asked to stop
    Quit,
    /// Primary button or touch, in window coordinates
    PointerDown { pos: Vec2 },
    KeyDown(Key),
}

impl Event {
    pub fn pointer(x: f32, y: f32) -> Self {
        Event::PointerDown {
            pos: Vec2::new(x, y),
        }
    }
}

/// Monotonic frame timer
pub trait Clock {
    /// Seconds since the previous call (or since creation)
    fn delta(&mut self) -> f32;
}

/// Source of input events
pub trait InputSource {
    /// Everything that arrived since the last poll, oldest first
    fn poll(&mut self) -> Vec<Event>;
}

/// Wall-clock timer
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Returns the same step every frame
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.step
    }
}

/// Wall-clock time when `realtime`, otherwise a fixed `step` per frame
pub fn clock_for(realtime: bool, step: f32) -> Box<dyn Clock> {
    if realtime {
        Box::new(SystemClock::new())
    } else {
        Box::new(FixedClock::new(step))
    }
}

/// Replays a fixed list of per-frame event batches, then stays silent
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<Event>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<Event>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<Event> {
        self.frames.pop_front().unwrap_or_default()
    }
}
