//! Core game logic.

mod assign;
pub mod clock;
pub mod state;
mod tally;
mod types;

use log::debug;
use rand::thread_rng;
use thiserror::Error;
use crate::{
    handler::{
        Ambience,
        Command,
        Handler,
        soundtrack
    },
    store::Store
};
pub use self::{
    assign::*,
    clock::{
        Clock,
        Phase,
        Stopwatch
    },
    tally::*,
    types::*
};

/// The possible errors returned by `run`.
#[derive(Debug, Error)]
pub enum Error {
    /// Roles could not be dealt.
    #[error(transparent)]
    Assign(#[from] AssignError),
    /// Wins could not be credited.
    #[error(transparent)]
    Settle(#[from] SettleError)
}

/// Moderate a game: deal roles, run the game screen until the moderator ends or quits the game, and credit the winners.
///
/// Returns the settled game, or `None` if the moderator quit without declaring a winner.
///
/// # Errors
///
/// Fails if roles can't be dealt (nothing is credited) or wins can't be recorded.
pub fn run<H, A, S, P>(handler: &mut H, ambience: &mut A, store: &mut S, configuring: &state::Configuring, permutation: &mut P) -> Result<Option<state::Settled>, Error>
where H: Handler + ?Sized, A: Ambience + ?Sized, S: Store + ?Sized, P: Permutation + ?Sized {
    let assigned = configuring.assign(permutation)?;
    handler.announce_assignment(&assigned);
    let mut game = assigned.begin();
    let mut stopwatch = Stopwatch::start();
    ambience.play(soundtrack(game.clock().phase(), &mut thread_rng()));
    loop {
        let ticks = stopwatch.take_ticks();
        game.clock_mut().advance(ticks);
        match handler.next_command(&game) {
            Command::Reveal(idx) => match game.reveal(idx) {
                Some((player, role)) => handler.reveal_role(player, role),
                None => handler.no_such_player(idx)
            },
            Command::Next => { game.select_next(); }
            Command::Previous => { game.select_previous(); }
            Command::TogglePhase => {
                let phase = game.toggle_phase();
                ambience.stop();
                ambience.play(soundtrack(phase, &mut thread_rng()));
                handler.phase_changed(phase);
            }
            Command::ResetTimer => {
                stopwatch.restart();
                game.reset_timer();
            }
            Command::Status => handler.show_status(&game),
            Command::End(faction) => {
                ambience.stop();
                return match game.settle(store, faction) {
                    Ok(settled) => {
                        handler.announce_winners(faction, settled.winners());
                        Ok(Some(settled))
                    }
                    Err(e) => {
                        handler.settle_failed(&e);
                        Err(e.into())
                    }
                };
            }
            Command::Quit => {
                debug!("moderator left the game");
                ambience.stop();
                return Ok(None);
            }
        }
    }
}
