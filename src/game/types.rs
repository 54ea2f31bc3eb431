//! Data types used in game state representation.

use std::{
    fmt,
    slice,
    str::FromStr
};
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> $name {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<$name, uuid::Error> {
                Uuid::parse_str(s).map($name)
            }
        }
    };
}

record_id! {
    /// Stable unique identifier of a player record.
    PlayerId
}

record_id! {
    /// Stable unique identifier of a role card.
    RoleId
}

/// The faction of a role determines which players win together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The village.
    Good,
    /// The werewolves and their allies.
    Bad,
    /// Third parties with their own win condition.
    Neutral
}

impl Faction {
    /// Every faction, in display order.
    pub const ALL: [Faction; 3] = [Faction::Good, Faction::Bad, Faction::Neutral];
}

/// Returned by `Faction::from_str` for unknown faction names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no such faction: {0:?} (expected good, bad or neutral)")]
pub struct ParseFactionError(pub String);

impl FromStr for Faction {
    type Err = ParseFactionError;

    fn from_str(s: &str) -> Result<Faction, ParseFactionError> {
        match &s.to_lowercase()[..] {
            "good" => Ok(Faction::Good),
            "bad" => Ok(Faction::Bad),
            "neutral" => Ok(Faction::Neutral),
            _ => Err(ParseFactionError(s.to_owned()))
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Faction::Good => write!(f, "good"),
            Faction::Bad => write!(f, "bad"),
            Faction::Neutral => write!(f, "neutral")
        }
    }
}

/// A player in the roster, with their lifetime win counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Identifies the player across sessions.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Name of the avatar image.
    pub avatar: String,
    /// Number of games this player has won. Only changed by settling a game.
    #[serde(default)]
    pub wins: u32
}

impl Player {
    /// Creates a new player with a fresh id and no wins.
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Player {
        Player {
            id: PlayerId::new(),
            name: name.into(),
            avatar: avatar.into(),
            wins: 0
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A role card from the role library. Roles are templates and can be dealt to several players at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// Identifies the role card.
    pub id: RoleId,
    /// Display name, e.g. "Seer".
    pub name: String,
    /// Name of the card image.
    pub avatar: String,
    /// Rules text shown when the role is revealed.
    pub description: String,
    /// The faction this role wins with.
    pub faction: Faction
}

impl Role {
    /// Creates a new role card with a fresh id.
    pub fn new(name: impl Into<String>, avatar: impl Into<String>, description: impl Into<String>, faction: Faction) -> Role {
        Role {
            id: RoleId::new(),
            name: name.into(),
            avatar: avatar.into(),
            description: description.into(),
            faction
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.faction)
    }
}

/// How many copies of each role are in play.
///
/// Entries keep their insertion order, which is the order role slots are laid out in before shuffling. Quantities are signed so that invalid configurations can be represented and rejected by `assign`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    entries: Vec<(Role, i32)>
}

impl RoleCounts {
    /// An empty configuration.
    pub fn new() -> RoleCounts {
        RoleCounts::default()
    }

    /// A configuration listing every given role with quantity 0.
    pub fn from_roles<I: IntoIterator<Item = Role>>(roles: I) -> RoleCounts {
        RoleCounts {
            entries: roles.into_iter().map(|role| (role, 0)).collect()
        }
    }

    /// Sets the quantity of a role, adding it if it's not listed yet.
    pub fn set(&mut self, role: Role, quantity: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|(iter_role, _)| iter_role.id == role.id) {
            entry.1 = quantity;
        } else {
            self.entries.push((role, quantity));
        }
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, role: Role, quantity: i32) -> RoleCounts {
        self.set(role, quantity);
        self
    }

    /// Returns the quantity of the given role, if it's listed.
    pub fn get(&self, role: &RoleId) -> Option<i32> {
        self.entries.iter()
            .find(|(iter_role, _)| iter_role.id == *role)
            .map(|&(_, quantity)| quantity)
    }

    pub(crate) fn get_mut(&mut self, role: &RoleId) -> Option<&mut i32> {
        self.entries.iter_mut()
            .find(|(iter_role, _)| iter_role.id == *role)
            .map(|(_, quantity)| quantity)
    }

    /// Sum of all quantities.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|&(_, quantity)| i64::from(quantity)).sum()
    }

    /// Iterates over roles and their quantities in configuration order.
    pub fn iter(&self) -> slice::Iter<'_, (Role, i32)> {
        self.entries.iter()
    }

    /// The number of listed roles, including those with quantity 0.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no roles are listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RoleCounts {
    type Item = &'a (Role, i32);
    type IntoIter = slice::Iter<'a, (Role, i32)>;

    fn into_iter(self) -> slice::Iter<'a, (Role, i32)> {
        self.iter()
    }
}

/// The roles dealt to the players of a session, in roster order.
///
/// Only `assign` constructs an assignment, and there is no way to modify one afterwards. Dealing again produces a new assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    entries: Vec<(PlayerId, Role)>
}

impl Assignment {
    pub(crate) fn new(entries: Vec<(PlayerId, Role)>) -> Assignment {
        Assignment { entries }
    }

    /// Returns the role dealt to the given player.
    pub fn role(&self, player: &PlayerId) -> Option<&Role> {
        self.entries.iter()
            .find(|(iter_player, _)| iter_player == player)
            .map(|(_, role)| role)
    }

    /// Iterates over players and their roles in roster order.
    pub fn iter(&self) -> slice::Iter<'_, (PlayerId, Role)> {
        self.entries.iter()
    }

    /// The number of players with a role.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody has been dealt a role.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many players have been dealt the given role.
    pub fn count(&self, role: &RoleId) -> usize {
        self.entries.iter().filter(|(_, iter_role)| iter_role.id == *role).count()
    }

    /// The players whose role belongs to the given faction, in roster order.
    pub fn players_in(&self, faction: Faction) -> Vec<PlayerId> {
        self.entries.iter()
            .filter(|(_, role)| role.faction == faction)
            .map(|&(player, _)| player)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a (PlayerId, Role);
    type IntoIter = slice::Iter<'a, (PlayerId, Role)>;

    fn into_iter(self) -> slice::Iter<'a, (PlayerId, Role)> {
        self.iter()
    }
}
