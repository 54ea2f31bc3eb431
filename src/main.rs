#![warn(trivial_casts)]
#![deny(unused)]
#![deny(unused_extern_crates, unused_import_braces)]

use std::{
    path::PathBuf,
    process::ExitCode
};
use clap::{
    Parser,
    Subcommand
};
use log::error;
use rand::{
    SeedableRng,
    rngs::StdRng
};
use werewolf_moderator::{
    Config,
    game::{
        self,
        Faction,
        Player,
        PlayerId,
        Role,
        RoleCounts,
        RoleId,
        Shuffled,
        state::Configuring
    },
    handler::{
        CliHandler,
        LogAmbience
    },
    store::{
        JsonStore,
        Store,
        StoreError
    }
};

/// Werewolf moderator: manage players and roles, deal roles and track wins.
#[derive(Parser, Debug)]
#[command(name = "wwm", version)]
struct Args {
    /// Record file (default: werewolf.json)
    #[arg(long, global = true, env = "WEREWOLF_STORE")]
    store: Option<PathBuf>,

    /// Print more log messages; repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the player roster
    Player {
        #[command(subcommand)]
        command: PlayerCommand,
    },
    /// Manage the role library
    Role {
        #[command(subcommand)]
        command: RoleCommand,
    },
    /// Deal roles and moderate a game
    Play {
        /// Role quantity as NAME=COUNT (repeatable)
        #[arg(short, long = "role", value_parser = parse_role_count, required = true)]
        roles: Vec<(String, i32)>,

        /// Players to seat, in order (default: everyone)
        #[arg(short, long = "player")]
        players: Vec<PlayerId>,

        /// Random seed for dealing (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum PlayerCommand {
    /// Add a player
    Add {
        name: String,
        #[arg(long, default_value = "person1")]
        avatar: String,
    },
    /// Remove a player
    Remove { id: PlayerId },
    /// List players and their wins
    List,
}

#[derive(Subcommand, Debug)]
enum RoleCommand {
    /// Add a role card
    Add {
        name: String,
        /// good, bad or neutral
        #[arg(short, long)]
        faction: Faction,
        #[arg(long, default_value = "")]
        avatar: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Remove a role card
    Remove { id: RoleId },
    /// List role cards
    List,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Game(#[from] game::Error),
    #[error("no role named {0:?} in the library")]
    NoSuchRole(String),
    #[error("no player with id {0}")]
    NoSuchPlayer(PlayerId),
}

fn parse_role_count(s: &str) -> Result<(String, i32), String> {
    let (name, count) = s.rsplit_once('=').ok_or_else(|| format!("expected NAME=COUNT, got {:?}", s))?;
    let count = count.trim().parse().map_err(|e| format!("invalid count {:?}: {}", count, e))?;
    Ok((name.trim().to_owned(), count))
}

fn play(store: &mut JsonStore, roles: Vec<(String, i32)>, players: Vec<PlayerId>, seed: Option<u64>) -> Result<(), CliError> {
    let library = store.roles();
    let mut counts = RoleCounts::new();
    for (name, count) in roles {
        let role = library.iter()
            .find(|role| role.name.eq_ignore_ascii_case(&name))
            .ok_or(CliError::NoSuchRole(name))?;
        counts.set(role.clone(), count);
    }
    let roster = if players.is_empty() {
        store.players()
    } else {
        players.into_iter()
            .map(|id| store.player(&id).ok_or(CliError::NoSuchPlayer(id)))
            .collect::<Result<Vec<_>, _>>()?
    };
    let configuring = Configuring::with_counts(roster, counts);
    let mut ambience = LogAmbience::default();
    let settled = match seed {
        Some(seed) => game::run(&mut CliHandler, &mut ambience, store, &configuring, &mut Shuffled(StdRng::seed_from_u64(seed)))?,
        None => game::run(&mut CliHandler, &mut ambience, store, &configuring, &mut Shuffled::thread())?
    };
    if settled.is_none() {
        println!("[ ** ] game abandoned, no wins recorded");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = Config::from_env().with_verbosity(args.verbose);
    if let Some(store) = args.store {
        config.store = store;
    }
    if let Err(e) = config.init_logger() {
        eprintln!("[ !! ] logging disabled: {}", e);
    }
    let mut store = JsonStore::open(&config.store)?;
    match args.command {
        Commands::Player { command } => match command {
            PlayerCommand::Add { name, avatar } => {
                let player = Player::new(name, avatar);
                let id = player.id;
                store.insert_player(player)?;
                println!("{}", id);
            }
            PlayerCommand::Remove { id } => {
                let player = store.delete_player(&id)?;
                println!("removed {}", player.name);
            }
            PlayerCommand::List => for player in store.players() {
                println!("{}\t{}\t{}\t{} wins", player.id, player.name, player.avatar, player.wins);
            },
        },
        Commands::Role { command } => match command {
            RoleCommand::Add { name, faction, avatar, description } => {
                let role = Role::new(name, avatar, description, faction);
                let id = role.id;
                store.insert_role(role)?;
                println!("{}", id);
            }
            RoleCommand::Remove { id } => {
                let role = store.delete_role(&id)?;
                println!("removed {}", role.name);
            }
            RoleCommand::List => for role in store.roles() {
                println!("{}\t{}\t{}\t{}", role.id, role.name, role.faction, role.description);
            },
        },
        Commands::Play { roles, players, seed } => play(&mut store, roles, players, seed)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("[ !! ] {}", e);
            ExitCode::FAILURE
        }
    }
}
