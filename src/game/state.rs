//! Game state representation.

use log::debug;
use serde::{
    Deserialize,
    Serialize
};
use crate::{
    game::{
        AssignError,
        Assignment,
        Clock,
        Faction,
        Permutation,
        Phase,
        Player,
        PlayerId,
        Role,
        RoleCounts,
        RoleId,
        SettleError,
        assign,
        settle
    },
    store::Store
};

/// This enum represents the state of a session. Each variant contains relevant methods to observe or progress the session, refer to their documentation for details.
///
/// A session only ever moves forward: `Configuring` → `Assigned` → `InProgress` → `Settled`. A new game starts from a new `Configuring`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum State {
    /// The moderator is choosing how many copies of each role are in play.
    Configuring(Configuring),
    /// Roles have been dealt, but the game hasn't started.
    Assigned(Assigned),
    /// The game is running.
    InProgress(InProgress),
    /// The game is over and wins have been credited.
    Settled(Settled)
}

impl State {
    /// The players of this session, in roster order.
    pub fn roster(&self) -> &[Player] {
        match *self {
            State::Configuring(ref configuring) => configuring.roster(),
            State::Assigned(ref assigned) => assigned.roster(),
            State::InProgress(ref in_progress) => in_progress.roster(),
            State::Settled(ref settled) => settled.roster()
        }
    }

    /// Returns the role of the given player, if roles have been dealt.
    pub fn role(&self, player: &PlayerId) -> Option<&Role> {
        match *self {
            State::Configuring(_) => None,
            State::Assigned(ref assigned) => assigned.role(player),
            State::InProgress(ref in_progress) => in_progress.assignment().role(player),
            State::Settled(ref settled) => settled.assignment().role(player)
        }
    }
}

/// The moderator is choosing how many copies of each role are in play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuring {
    roster: Vec<Player>,
    counts: RoleCounts
}

impl Configuring {
    /// Starts configuring a session for the given players, with every role from the library at 0 copies.
    pub fn new(roster: Vec<Player>, roles: Vec<Role>) -> Configuring {
        Configuring {
            roster,
            counts: RoleCounts::from_roles(roles)
        }
    }

    /// Starts configuring a session with the given quantities already chosen.
    pub fn with_counts(roster: Vec<Player>, counts: RoleCounts) -> Configuring {
        Configuring { roster, counts }
    }

    /// The players, in roster order.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// The current role quantities.
    pub fn counts(&self) -> &RoleCounts {
        &self.counts
    }

    /// Returns the number of players in the roster.
    pub fn num_players(&self) -> usize {
        self.roster.len()
    }

    /// Returns the number of roles chosen so far.
    pub fn total_roles(&self) -> i64 {
        self.counts.total()
    }

    /// Returns `true` if there are exactly as many roles as players.
    pub fn is_ready(&self) -> bool {
        self.total_roles() == self.num_players() as i64
    }

    /// Adds a copy of a role, unless every player already has one.
    ///
    /// Returns `true` if the quantity was changed.
    pub fn increment(&mut self, role: &RoleId) -> bool {
        if self.total_roles() >= self.num_players() as i64 {
            return false;
        }
        match self.counts.get_mut(role) {
            Some(quantity) => {
                *quantity += 1;
                true
            }
            None => false
        }
    }

    /// Removes a copy of a role, unless there are none left.
    ///
    /// Returns `true` if the quantity was changed.
    pub fn decrement(&mut self, role: &RoleId) -> bool {
        match self.counts.get_mut(role) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                true
            }
            _ => false
        }
    }

    /// Sets the quantity of a role directly. The configuration is validated when roles are dealt.
    ///
    /// Returns `false` if the role isn't part of this session's library.
    pub fn set_count(&mut self, role: &RoleId, quantity: i32) -> bool {
        match self.counts.get_mut(role) {
            Some(current) => {
                *current = quantity;
                true
            }
            None => false
        }
    }

    /// Moves a player to a different position in the roster.
    ///
    /// Returns `false` if either index is out of bounds.
    pub fn move_player(&mut self, from: usize, to: usize) -> bool {
        if from >= self.roster.len() || to >= self.roster.len() {
            return false;
        }
        let player = self.roster.remove(from);
        self.roster.insert(to, player);
        true
    }

    /// Deals the roles.
    ///
    /// This can be called again to deal a completely new set of roles.
    ///
    /// # Errors
    ///
    /// See `assign`.
    pub fn assign<P: Permutation + ?Sized>(&self, permutation: &mut P) -> Result<Assigned, AssignError> {
        let assignment = assign(&self.roster, &self.counts, permutation)?;
        debug!("session configured with {} players", self.roster.len());
        Ok(Assigned {
            roster: self.roster.clone(),
            assignment
        })
    }
}

impl From<Configuring> for State {
    fn from(state: Configuring) -> State {
        State::Configuring(state)
    }
}

/// Roles have been dealt, but the game hasn't started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assigned {
    roster: Vec<Player>,
    assignment: Assignment
}

impl Assigned {
    /// The players, in roster order.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// The dealt roles.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the role dealt to the given player.
    pub fn role(&self, player: &PlayerId) -> Option<&Role> {
        self.assignment.role(player)
    }

    /// Starts the game. The timer starts at 00:00, during the day.
    pub fn begin(self) -> InProgress {
        debug!("game started");
        InProgress {
            roster: self.roster,
            assignment: self.assignment,
            clock: Clock::new(),
            selected: 0
        }
    }
}

impl From<Assigned> for State {
    fn from(state: Assigned) -> State {
        State::Assigned(state)
    }
}

/// The game is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InProgress {
    roster: Vec<Player>,
    assignment: Assignment,
    clock: Clock,
    selected: usize
}

impl InProgress {
    /// The players, in roster order.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// The dealt roles.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// The elapsed-time display and day/night state.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable access to the clock, e.g. to feed it ticks.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Returns the player at the given roster position and their role.
    pub fn reveal(&self, idx: usize) -> Option<(&Player, &Role)> {
        let player = self.roster.get(idx)?;
        self.assignment.role(&player.id).map(|role| (player, role))
    }

    /// The roster position of the currently selected player.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Selects the next player in the roster. Stops at the last player.
    pub fn select_next(&mut self) -> usize {
        if self.selected + 1 < self.roster.len() {
            self.selected += 1;
        }
        self.selected
    }

    /// Selects the previous player in the roster. Stops at the first player.
    pub fn select_previous(&mut self) -> usize {
        self.selected = self.selected.saturating_sub(1);
        self.selected
    }

    /// Switches between day and night.
    pub fn toggle_phase(&mut self) -> Phase {
        let phase = self.clock.toggle_phase();
        debug!("it is now {}", phase);
        phase
    }

    /// Advances the timer by one second.
    pub fn tick(&mut self) {
        self.clock.tick();
    }

    /// Sets the timer back to 00:00.
    pub fn reset_timer(&mut self) {
        self.clock.reset();
    }

    /// Ends the game, crediting a win to every player on the winning faction.
    ///
    /// This consumes the running game, so a session can't be settled twice.
    ///
    /// # Errors
    ///
    /// See `settle`.
    pub fn settle<S: Store + ?Sized>(self, store: &mut S, winning: Faction) -> Result<Settled, SettleError> {
        let winners = settle(store, &self.roster, &self.assignment, winning)?;
        debug!("game settled: {} of {} players won", winners.len(), self.roster.len());
        Ok(Settled {
            roster: self.roster,
            assignment: self.assignment,
            winning,
            winners
        })
    }
}

impl From<InProgress> for State {
    fn from(state: InProgress) -> State {
        State::InProgress(state)
    }
}

/// The game is over and wins have been credited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settled {
    roster: Vec<Player>,
    assignment: Assignment,
    winning: Faction,
    winners: Vec<Player>
}

impl Settled {
    /// The players, in roster order, with the win counts they had before the game.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// The dealt roles.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// The faction the moderator declared the winner.
    pub fn winning_faction(&self) -> Faction {
        self.winning
    }

    /// The players who won, with their updated win counts.
    pub fn winners(&self) -> &[Player] {
        &self.winners
    }
}

impl From<Settled> for State {
    fn from(state: Settled) -> State {
        State::Settled(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        game::Fixed,
        store::MemoryStore
    };
    use super::*;

    fn library() -> Vec<Role> {
        vec![
            Role::new("Werewolf", "wolf", "", Faction::Bad),
            Role::new("Seer", "seer", "", Faction::Good),
            Role::new("Villager", "villager", "", Faction::Good),
        ]
    }

    fn setup() -> (MemoryStore, Configuring) {
        let mut store = MemoryStore::new();
        for name in &["A", "B", "C", "D"] {
            store.insert_player(Player::new(*name, "person1")).expect("fresh id");
        }
        let roles = library();
        for role in &roles {
            store.insert_role(role.clone()).expect("fresh id");
        }
        let configuring = Configuring::new(store.players(), roles);
        (store, configuring)
    }

    #[test]
    fn increment_stops_at_roster_size() {
        let (_, mut configuring) = setup();
        let villager = configuring.counts().iter().nth(2).map(|(role, _)| role.id).expect("three roles");
        assert!(!configuring.decrement(&villager));
        for _ in 0..4 {
            assert!(configuring.increment(&villager));
        }
        assert!(configuring.is_ready());
        assert!(!configuring.increment(&villager));
        assert_eq!(configuring.total_roles(), 4);
        assert!(configuring.decrement(&villager));
        assert!(!configuring.is_ready());
        assert!(!configuring.increment(&RoleId::new()));
    }

    #[test]
    fn cannot_deal_until_balanced() {
        let (_, mut configuring) = setup();
        let ids = configuring.counts().iter().map(|(role, _)| role.id).collect::<Vec<_>>();
        assert!(matches!(configuring.assign(&mut Fixed::identity()), Err(AssignError::UnbalancedConfiguration { players: 4, roles: 0 })));
        assert!(configuring.set_count(&ids[0], 1));
        assert!(configuring.set_count(&ids[1], 1));
        assert!(configuring.set_count(&ids[2], 2));
        let assigned = configuring.assign(&mut Fixed::identity()).expect("balanced configuration");
        let roster = configuring.roster();
        assert_eq!(assigned.role(&roster[0].id).map(|role| &role.name[..]), Some("Werewolf"));
        assert_eq!(assigned.role(&roster[1].id).map(|role| &role.name[..]), Some("Seer"));
        assert_eq!(assigned.role(&roster[3].id).map(|role| &role.name[..]), Some("Villager"));
    }

    #[test]
    fn roles_are_known_once_dealt() {
        let (mut store, mut configuring) = setup();
        let ids = configuring.counts().iter().map(|(role, _)| role.id).collect::<Vec<_>>();
        configuring.set_count(&ids[0], 1);
        configuring.set_count(&ids[2], 3);
        let first = configuring.roster()[0].id;
        assert!(State::from(configuring.clone()).role(&first).is_none());
        let assigned = configuring.assign(&mut Fixed::identity()).expect("balanced configuration");
        assert_eq!(State::from(assigned.clone()).role(&first).map(|role| &role.name[..]), Some("Werewolf"));
        let game = assigned.begin();
        assert_eq!(State::from(game.clone()).role(&first).map(|role| role.faction), Some(Faction::Bad));
        let settled = game.settle(&mut store, Faction::Good).expect("complete assignment");
        assert_eq!(State::from(settled).role(&first).map(|role| role.faction), Some(Faction::Bad));
        assert!(State::from(configuring).role(&PlayerId::new()).is_none());
    }

    #[test]
    fn roster_order_decides_who_gets_which_slot() {
        let (_, mut configuring) = setup();
        let ids = configuring.counts().iter().map(|(role, _)| role.id).collect::<Vec<_>>();
        configuring.set_count(&ids[0], 1);
        configuring.set_count(&ids[2], 3);
        let last = configuring.roster()[3].id;
        assert!(configuring.move_player(3, 0));
        assert!(!configuring.move_player(4, 0));
        let assigned = configuring.assign(&mut Fixed::identity()).expect("balanced configuration");
        assert_eq!(assigned.role(&last).map(|role| role.faction), Some(Faction::Bad));
    }

    #[test]
    fn full_session() {
        let (mut store, mut configuring) = setup();
        let ids = configuring.counts().iter().map(|(role, _)| role.id).collect::<Vec<_>>();
        configuring.set_count(&ids[0], 1);
        configuring.set_count(&ids[1], 1);
        configuring.set_count(&ids[2], 2);
        let mut game = configuring.assign(&mut Fixed::new(vec![3, 2, 1, 0])).expect("balanced configuration").begin();
        assert_eq!(game.clock().to_string(), "00:00");
        game.tick();
        game.tick();
        assert_eq!(game.clock().elapsed(), 2);
        game.reset_timer();
        assert_eq!(game.clock().elapsed(), 0);
        assert_eq!(game.toggle_phase(), Phase::Night);
        assert_eq!(game.select_previous(), 0);
        assert_eq!(game.select_next(), 1);
        assert_eq!(game.select_next(), 2);
        assert_eq!(game.select_next(), 3);
        assert_eq!(game.select_next(), 3);
        let (player, role) = game.reveal(3).expect("four players");
        assert_eq!(player.name, "D");
        assert_eq!(role.name, "Werewolf");
        assert!(game.reveal(4).is_none());
        let state = State::from(game);
        assert_eq!(state.roster().len(), 4);
        let game = match state {
            State::InProgress(game) => game,
            _ => unreachable!()
        };
        let settled = game.settle(&mut store, Faction::Bad).expect("complete assignment");
        assert_eq!(settled.winning_faction(), Faction::Bad);
        assert_eq!(settled.winners().len(), 1);
        assert_eq!(settled.winners()[0].name, "D");
        let wins = store.players().into_iter().map(|player| player.wins).collect::<Vec<_>>();
        assert_eq!(wins, vec![0, 0, 0, 1]);
    }
}
