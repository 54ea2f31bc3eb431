//! Contains the `Store` trait, which is how player and role records are kept between sessions, and some implementations.

mod json;

use std::io;
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use crate::game::{
    Player,
    PlayerId,
    Role,
    RoleId
};
pub use self::json::JsonStore;

/// The possible errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No player record with this id exists.
    #[error("no such player: {0}")]
    NoSuchPlayer(PlayerId),
    /// No role record with this id exists.
    #[error("no such role: {0}")]
    NoSuchRole(RoleId),
    /// A player record with this id already exists.
    #[error("player {0} already exists")]
    DuplicatePlayer(PlayerId),
    /// A role record with this id already exists.
    #[error("role {0} already exists")]
    DuplicateRole(RoleId),
    /// The player's win count can't go any higher.
    #[error("win count of player {0} would overflow")]
    WinsOverflow(PlayerId),
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The backing file isn't valid.
    #[error("malformed record file: {0}")]
    Json(#[from] serde_json::Error)
}

/// Persistent player and role records.
///
/// Reads are infallible; implementations load everything up front.
pub trait Store {
    /// All player records, in insertion order.
    fn players(&self) -> Vec<Player>;

    /// All role records, in insertion order.
    fn roles(&self) -> Vec<Role>;

    /// Looks up a single player record.
    fn player(&self, id: &PlayerId) -> Option<Player> {
        self.players().into_iter().find(|player| player.id == *id)
    }

    /// Adds a player record.
    fn insert_player(&mut self, player: Player) -> Result<(), StoreError>;

    /// Removes a player record, returning it.
    fn delete_player(&mut self, id: &PlayerId) -> Result<Player, StoreError>;

    /// Adds a role record.
    fn insert_role(&mut self, role: Role) -> Result<(), StoreError>;

    /// Removes a role record, returning it.
    fn delete_role(&mut self, id: &RoleId) -> Result<Role, StoreError>;

    /// Adds one win to a player's record and persists it. Returns the new win count.
    fn increment_wins(&mut self, id: &PlayerId) -> Result<u32, StoreError>;
}

/// The full contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    /// Player records.
    #[serde(default)]
    pub players: Vec<Player>,
    /// Role records.
    #[serde(default)]
    pub roles: Vec<Role>
}

impl Records {
    fn insert_player(&mut self, player: Player) -> Result<(), StoreError> {
        if self.players.iter().any(|iter_player| iter_player.id == player.id) {
            return Err(StoreError::DuplicatePlayer(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    fn delete_player(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        let idx = self.players.iter().position(|player| player.id == *id).ok_or(StoreError::NoSuchPlayer(*id))?;
        Ok(self.players.remove(idx))
    }

    fn insert_role(&mut self, role: Role) -> Result<(), StoreError> {
        if self.roles.iter().any(|iter_role| iter_role.id == role.id) {
            return Err(StoreError::DuplicateRole(role.id));
        }
        self.roles.push(role);
        Ok(())
    }

    fn delete_role(&mut self, id: &RoleId) -> Result<Role, StoreError> {
        let idx = self.roles.iter().position(|role| role.id == *id).ok_or(StoreError::NoSuchRole(*id))?;
        Ok(self.roles.remove(idx))
    }

    fn increment_wins(&mut self, id: &PlayerId) -> Result<u32, StoreError> {
        let player = self.players.iter_mut().find(|player| player.id == *id).ok_or(StoreError::NoSuchPlayer(*id))?;
        player.wins = player.wins.checked_add(1).ok_or(StoreError::WinsOverflow(*id))?;
        Ok(player.wins)
    }
}

/// A store which only lives as long as the process. Useful for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn players(&self) -> Vec<Player> {
        self.records.players.clone()
    }

    fn roles(&self) -> Vec<Role> {
        self.records.roles.clone()
    }

    fn insert_player(&mut self, player: Player) -> Result<(), StoreError> {
        self.records.insert_player(player)
    }

    fn delete_player(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        self.records.delete_player(id)
    }

    fn insert_role(&mut self, role: Role) -> Result<(), StoreError> {
        self.records.insert_role(role)
    }

    fn delete_role(&mut self, id: &RoleId) -> Result<Role, StoreError> {
        self.records.delete_role(id)
    }

    fn increment_wins(&mut self, id: &PlayerId) -> Result<u32, StoreError> {
        self.records.increment_wins(id)
    }
}
