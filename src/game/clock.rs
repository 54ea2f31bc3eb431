//! The game screen's elapsed-time display and day/night toggle.

use std::{
    fmt,
    time::{
        Duration,
        Instant
    }
};
use serde::{
    Deserialize,
    Serialize
};

/// The progress ring fills up over this many seconds.
pub const FULL_CIRCLE: u64 = 3600;

/// Whether it's currently day or night in the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Discussion and voting.
    #[default]
    Day,
    /// Everyone's eyes are closed while roles act.
    Night
}

impl Phase {
    /// The other phase.
    pub fn toggle(self) -> Phase {
        match self {
            Phase::Day => Phase::Night,
            Phase::Night => Phase::Day
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Phase::Day => write!(f, "day"),
            Phase::Night => write!(f, "night")
        }
    }
}

/// Counts the seconds since the moderator last reset the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    elapsed: u64,
    phase: Phase
}

impl Clock {
    /// A clock at 00:00, during the day.
    pub fn new() -> Clock {
        Clock::default()
    }

    /// Advances the timer by one second.
    pub fn tick(&mut self) {
        self.advance(1);
    }

    /// Advances the timer by the given number of seconds.
    pub fn advance(&mut self, secs: u64) {
        self.elapsed = self.elapsed.saturating_add(secs);
    }

    /// Sets the timer back to 00:00. The phase is left alone.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Switches between day and night, returning the new phase.
    pub fn toggle_phase(&mut self) -> Phase {
        self.phase = self.phase.toggle();
        self.phase
    }

    /// Seconds since the last reset.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How far the progress ring is filled, from 0 to 1.
    pub fn progress(&self) -> f64 {
        (self.elapsed as f64 / FULL_CIRCLE as f64).min(1.0)
    }
}

/// Formats as `MM:SS`. Minutes wrap around every hour.
impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", (self.elapsed % 3600) / 60, self.elapsed % 60)
    }
}

/// Turns wall-clock time into whole-second ticks for a `Clock`.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    since: Instant
}

impl Stopwatch {
    /// Starts counting now.
    pub fn start() -> Stopwatch {
        Stopwatch { since: Instant::now() }
    }

    /// Discards any partial second and starts counting again.
    pub fn restart(&mut self) {
        self.since = Instant::now();
    }

    /// Returns the number of whole seconds since the last call (or start), keeping the remainder for next time.
    pub fn take_ticks(&mut self) -> u64 {
        let secs = self.since.elapsed().as_secs();
        self.since += Duration::from_secs(secs);
        secs
    }
}
