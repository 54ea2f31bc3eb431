//! Contains the `Handler` trait, which is what a session uses to talk to the moderator, the `Ambience` trait for the soundtrack, and some implementations.

mod cli;

use log::info;
use rand::Rng;
use crate::{
    game::{
        Faction,
        Phase,
        Player,
        Role,
        SettleError,
        state::{
            Assigned,
            InProgress
        }
    },
    util::IteratorExt
};
pub use self::cli::CliHandler;

/// Played during the day.
pub const DAY_TRACK: &str = "daysoundtrack";

/// One of these is picked at random whenever night falls.
pub const NIGHT_TRACKS: [&str; 12] = [
    "soundtrack1", "soundtrack2", "soundtrack4", "soundtrack5", "soundtrack6", "soundtrack7",
    "soundtrack8", "soundtrack9", "soundtrack10", "soundtrack11", "soundtrack12", "soundtrack13"
];

/// A moderator action during a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the role of the player at this roster position.
    Reveal(usize),
    /// Select the next player.
    Next,
    /// Select the previous player.
    Previous,
    /// Switch between day and night.
    TogglePhase,
    /// Set the timer back to 00:00.
    ResetTimer,
    /// Show the timer and phase.
    Status,
    /// End the game with this faction as the winner.
    End(Faction),
    /// Leave the game without crediting anyone.
    Quit
}

/// The session uses this trait to talk to the moderator.
pub trait Handler {
    /// Called once roles have been dealt, before the game starts.
    fn announce_assignment(&mut self, _: &Assigned) {}

    /// Called whenever the session is waiting for the moderator.
    fn next_command(&mut self, game: &InProgress) -> Command;

    /// Called when the moderator asks for a player's role.
    fn reveal_role(&mut self, _: &Player, _: &Role) {}

    /// Called when a reveal refers to a player who isn't in the roster.
    fn no_such_player(&mut self, _: usize) {}

    /// Called after the phase has changed.
    fn phase_changed(&mut self, _: Phase) {}

    /// Called in response to `Command::Status`.
    fn show_status(&mut self, _: &InProgress) {}

    /// Called once wins have been credited.
    fn announce_winners(&mut self, _: Faction, _: &[Player]) {}

    /// Called if crediting wins failed. The session is over either way.
    fn settle_failed(&mut self, _: &SettleError) {}
}

/// Plays background music.
pub trait Ambience {
    /// Starts playing the named track.
    fn play(&mut self, track: &str);

    /// Stops whatever is playing.
    fn stop(&mut self);
}

/// Picks the track to play during the given phase.
pub fn soundtrack<R: Rng + ?Sized>(phase: Phase, rng: &mut R) -> &'static str {
    match phase {
        Phase::Day => DAY_TRACK,
        Phase::Night => NIGHT_TRACKS.iter().copied().rand(rng).unwrap_or(NIGHT_TRACKS[0])
    }
}

/// An ambience that only logs which track would be playing.
#[derive(Debug, Default)]
pub struct LogAmbience {
    playing: Option<String>
}

impl LogAmbience {
    /// The track currently playing, if any.
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

impl Ambience for LogAmbience {
    fn play(&mut self, track: &str) {
        info!("now playing {}", track);
        self.playing = Some(track.to_owned());
    }

    fn stop(&mut self) {
        if let Some(track) = self.playing.take() {
            info!("stopped {}", track);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        SeedableRng,
        rngs::StdRng
    };
    use super::*;

    #[test]
    fn day_and_night_tracks() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(soundtrack(Phase::Day, &mut rng), DAY_TRACK);
        for _ in 0..50 {
            assert!(NIGHT_TRACKS.contains(&soundtrack(Phase::Night, &mut rng)));
        }
    }

    #[test]
    fn log_ambience_tracks_playing() {
        let mut ambience = LogAmbience::default();
        ambience.play(DAY_TRACK);
        assert_eq!(ambience.playing(), Some(DAY_TRACK));
        ambience.stop();
        assert_eq!(ambience.playing(), None);
    }
}
