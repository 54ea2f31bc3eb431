//! Dealing role cards to the players of a session.

use std::collections::HashSet;
use log::{
    debug,
    warn
};
use rand::{
    prelude::*,
    rngs::ThreadRng
};
use thiserror::Error;
use crate::game::{
    Assignment,
    Player,
    PlayerId,
    RoleCounts
};

/// The possible errors returned by `assign`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// A role was configured with a negative number of copies.
    #[error("invalid quantity {quantity} for role {role}")]
    InvalidQuantity {
        /// Name of the offending role.
        role: String,
        /// The quantity it was configured with.
        quantity: i32
    },
    /// The same player appears more than once in the roster.
    #[error("player {0} is in the roster more than once")]
    DuplicatePlayer(PlayerId),
    /// The number of role slots doesn't match the number of players.
    #[error("unbalanced configuration: {roles} roles for {players} players")]
    UnbalancedConfiguration {
        /// The number of players in the roster.
        players: usize,
        /// The sum of all configured quantities.
        roles: i64
    },
    /// The permutation source returned something that isn't an ordering of all role slots.
    #[error("permutation source returned an invalid ordering for {len} role slots")]
    InvalidPermutation {
        /// The number of role slots that should have been permuted.
        len: usize
    }
}

impl AssignError {
    /// For `UnbalancedConfiguration`, the number of missing roles. Negative if there are too many roles.
    pub fn difference(&self) -> Option<i64> {
        match *self {
            AssignError::UnbalancedConfiguration { players, roles } => Some(players as i64 - roles),
            _ => None
        }
    }
}

/// A source of orderings for the role slots.
///
/// `order(len)` must return every index in `0..len` exactly once. The slot at `order[i]` is dealt to the `i`th player.
pub trait Permutation {
    /// Returns an ordering of `0..len`.
    fn order(&mut self, len: usize) -> Vec<usize>;
}

impl<P: Permutation + ?Sized> Permutation for &mut P {
    fn order(&mut self, len: usize) -> Vec<usize> {
        (**self).order(len)
    }
}

/// Uniformly random orderings drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct Shuffled<R: Rng>(pub R);

impl Shuffled<ThreadRng> {
    /// Shuffles using the thread-local generator.
    pub fn thread() -> Shuffled<ThreadRng> {
        Shuffled(thread_rng())
    }
}

impl<R: Rng> Permutation for Shuffled<R> {
    fn order(&mut self, len: usize) -> Vec<usize> {
        let mut order = (0..len).collect::<Vec<_>>();
        order.shuffle(&mut self.0);
        order
    }
}

/// Always returns the same, preselected ordering.
///
/// Makes dealing fully predictable, e.g. `Fixed::identity()` deals the role slots in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Fixed(Option<Vec<usize>>);

impl Fixed {
    /// Deals the `i`th player the role slot at `order[i]`.
    pub fn new(order: Vec<usize>) -> Fixed {
        Fixed(Some(order))
    }

    /// Deals role slots in configuration order.
    pub fn identity() -> Fixed {
        Fixed(None)
    }
}

impl Permutation for Fixed {
    fn order(&mut self, len: usize) -> Vec<usize> {
        match self.0 {
            Some(ref order) => order.clone(),
            None => (0..len).collect()
        }
    }
}

/// Deals one role slot to each player.
///
/// The configuration is expanded into role slots (each role repeated by its quantity, in configuration order), the slots are reordered by `permutation`, and the `i`th slot goes to the `i`th player of the roster.
///
/// # Errors
///
/// Fails without dealing anything if a quantity is negative, a player appears twice, the total number of roles differs from the number of players, or `permutation` returns an invalid ordering. See `AssignError` for details.
pub fn assign<P: Permutation + ?Sized>(players: &[Player], counts: &RoleCounts, permutation: &mut P) -> Result<Assignment, AssignError> {
    if let Some((role, quantity)) = counts.iter().find(|&&(_, quantity)| quantity < 0) {
        warn!("refusing to deal {} copies of {}", quantity, role.name);
        return Err(AssignError::InvalidQuantity { role: role.name.clone(), quantity: *quantity });
    }
    let mut seen = HashSet::with_capacity(players.len());
    if let Some(player) = players.iter().find(|player| !seen.insert(player.id)) {
        return Err(AssignError::DuplicatePlayer(player.id));
    }
    let total = counts.total();
    if total != players.len() as i64 {
        warn!("refusing to deal {} roles to {} players", total, players.len());
        return Err(AssignError::UnbalancedConfiguration { players: players.len(), roles: total });
    }
    let slots = counts.iter()
        .flat_map(|(role, quantity)| (0..*quantity).map(move |_| role))
        .collect::<Vec<_>>();
    let order = permutation.order(slots.len());
    if !is_permutation(&order, slots.len()) {
        return Err(AssignError::InvalidPermutation { len: slots.len() });
    }
    let assignment = Assignment::new(
        players.iter()
            .zip(order)
            .map(|(player, slot)| (player.id, slots[slot].clone()))
            .collect()
    );
    debug!("dealt {} roles to {} players", counts.iter().filter(|&&(_, quantity)| quantity > 0).count(), assignment.len());
    Ok(assignment)
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order.iter().all(|&idx| idx < len && !std::mem::replace(&mut seen[idx], true))
}
