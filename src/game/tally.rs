//! Crediting wins at the end of a game.

use std::collections::HashSet;
use log::info;
use thiserror::Error;
use crate::{
    game::{
        Assignment,
        Faction,
        Player,
        PlayerId
    },
    store::{
        Store,
        StoreError
    }
};

/// The possible errors returned by `settle`.
#[derive(Debug, Error)]
pub enum SettleError {
    /// A player has no role in the assignment.
    #[error("{name} ({player}) has not been dealt a role")]
    IncompleteAssignment {
        /// The player without a role.
        player: PlayerId,
        /// That player's display name.
        name: String
    },
    /// The same player appears more than once among the players to credit.
    #[error("player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),
    /// Persisting a win failed. Winners before this one have already been credited.
    #[error("failed to record win: {0}")]
    Store(#[from] StoreError)
}

/// Credits a win to every player whose role belongs to the winning faction.
///
/// Returns the winners in roster order, with their updated win counts.
///
/// Every call credits again: calling this twice for the same game counts the win twice. `InProgress::settle` consumes the session to make sure that doesn't happen.
///
/// # Errors
///
/// Fails before crediting anyone if a player is listed twice or has no role. Store failures abort the remaining credits.
pub fn settle<S: Store + ?Sized>(store: &mut S, players: &[Player], assignment: &Assignment, winning: Faction) -> Result<Vec<Player>, SettleError> {
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player.id) {
            return Err(SettleError::DuplicatePlayer(player.id));
        }
        if assignment.role(&player.id).is_none() {
            return Err(SettleError::IncompleteAssignment { player: player.id, name: player.name.clone() });
        }
    }
    let winning_ids = assignment.players_in(winning).into_iter().collect::<HashSet<_>>();
    let mut winners = players.iter()
        .filter(|player| winning_ids.contains(&player.id))
        .cloned()
        .collect::<Vec<_>>();
    for winner in &mut winners {
        winner.wins = store.increment_wins(&winner.id)?;
        info!("{} wins with the {} faction ({} wins total)", winner.name, winning, winner.wins);
    }
    Ok(winners)
}
