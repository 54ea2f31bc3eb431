use std::str::FromStr;
use log::error;
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
    handler::{
        Command,
        Handler
    },
    util
};

const HELP: &str = "commands: reveal <n>, next, prev, night/day, reset, status, end <good|bad|neutral>, quit";

/// A game handler which uses the command line.
#[derive(Debug, Default)]
pub struct CliHandler;

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Command, ()> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some(word) => word.to_lowercase(),
            None => return Err(())
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(());
        }
        match (&command[..], arg) {
            ("reveal", Some(idx)) => idx.parse().map(Command::Reveal).map_err(|_| ()),
            ("next", None) => Ok(Command::Next),
            ("prev", None) | ("previous", None) => Ok(Command::Previous),
            ("night", None) | ("day", None) | ("toggle", None) => Ok(Command::TogglePhase),
            ("reset", None) => Ok(Command::ResetTimer),
            ("status", None) => Ok(Command::Status),
            ("end", Some(faction)) => faction.parse::<Faction>().map(Command::End).map_err(|_| ()),
            ("quit", None) => Ok(Command::Quit),
            _ => Err(())
        }
    }
}

impl Handler for CliHandler {
    fn announce_assignment(&mut self, assigned: &Assigned) {
        println!("[ ** ] roles have been dealt to {} players", assigned.roster().len());
        for (idx, player) in assigned.roster().iter().enumerate() {
            println!("[ ** ] {}: {}", idx, player.name);
        }
        println!("[ ** ] {}", HELP);
    }

    fn next_command(&mut self, game: &InProgress) -> Command {
        loop {
            let selected = game.roster().get(game.selected()).map_or("nobody", |player| &player.name[..]);
            let prompt = format!("{} {} | {}", game.clock().phase(), game.clock(), selected);
            match util::input(&prompt) {
                Ok(Some(line)) if line.trim().is_empty() => return Command::Reveal(game.selected()),
                Ok(Some(line)) => match line.parse() {
                    Ok(command) => return command,
                    Err(()) => println!("[ !! ] {}", HELP)
                },
                Ok(None) => return Command::Quit,
                Err(e) => {
                    error!("failed to read moderator input: {}", e);
                    return Command::Quit;
                }
            }
        }
    }

    fn reveal_role(&mut self, player: &Player, role: &Role) {
        println!("[ __ ] {} is {}", player.name, role);
        if !role.description.is_empty() {
            println!("[ __ ] {}", role.description);
        }
    }

    fn no_such_player(&mut self, idx: usize) {
        println!("[ !! ] no player at position {}", idx);
    }

    fn phase_changed(&mut self, phase: Phase) {
        println!("[ ** ] it is now {}", phase);
    }

    fn show_status(&mut self, game: &InProgress) {
        println!("[ ** ] {} {} ({:.0}% of the hour)", game.clock().phase(), game.clock(), game.clock().progress() * 100.0);
    }

    fn announce_winners(&mut self, faction: Faction, winners: &[Player]) {
        if winners.is_empty() {
            println!("[ ** ] the {} faction won, but nobody played for it", faction);
        } else {
            println!("[ ** ] the {} faction won:", faction);
            for winner in winners {
                println!("[ ** ] {} ({} wins)", winner.name, winner.wins);
            }
        }
    }

    fn settle_failed(&mut self, e: &SettleError) {
        println!("[ !! ] {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("reveal 2".parse::<Command>(), Ok(Command::Reveal(2)));
        assert_eq!("Next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("prev".parse::<Command>(), Ok(Command::Previous));
        assert_eq!("night".parse::<Command>(), Ok(Command::TogglePhase));
        assert_eq!("reset".parse::<Command>(), Ok(Command::ResetTimer));
        assert_eq!("end Bad".parse::<Command>(), Ok(Command::End(Faction::Bad)));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("reveal".parse::<Command>(), Err(()));
        assert_eq!("reveal x".parse::<Command>(), Err(()));
        assert_eq!("end evil".parse::<Command>(), Err(()));
        assert_eq!("next 1".parse::<Command>(), Err(()));
        assert_eq!("".parse::<Command>(), Err(()));
    }
}
