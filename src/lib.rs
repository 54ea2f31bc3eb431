//! A moderator's companion for [Werewolf](https://en.wikipedia.org/wiki/Mafia_(party_game)): keeps a roster of players and a library of role cards, deals roles at random, runs the game screen, and credits wins to the winning faction.

#![warn(trivial_casts)]
#![deny(missing_docs)]
#![deny(unused_extern_crates, unused_import_braces)]

pub mod config;
pub mod game;
pub mod handler;
pub mod store;
mod util;

pub use crate::{
    config::Config,
    game::run
};
