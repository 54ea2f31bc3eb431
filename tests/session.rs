use std::collections::VecDeque;
use werewolf_moderator::{
    game::{
        self,
        AssignError,
        Faction,
        Fixed,
        Phase,
        Player,
        Role,
        RoleCounts,
        Shuffled,
        state::{
            Configuring,
            InProgress
        }
    },
    handler::{
        Ambience,
        Command,
        DAY_TRACK,
        Handler,
        NIGHT_TRACKS
    },
    store::{
        JsonStore,
        MemoryStore,
        Store
    }
};

/// Replays a fixed list of commands and records what the session reported.
#[derive(Default)]
struct Script {
    commands: VecDeque<Command>,
    revealed: Vec<(String, String)>,
    missing: Vec<usize>,
    phases: Vec<Phase>,
    winners: Option<(Faction, Vec<String>)>
}

impl Script {
    fn new(commands: Vec<Command>) -> Script {
        Script { commands: commands.into(), ..Script::default() }
    }
}

impl Handler for Script {
    fn next_command(&mut self, _: &InProgress) -> Command {
        self.commands.pop_front().unwrap_or(Command::Quit)
    }

    fn reveal_role(&mut self, player: &Player, role: &Role) {
        self.revealed.push((player.name.clone(), role.name.clone()));
    }

    fn no_such_player(&mut self, idx: usize) {
        self.missing.push(idx);
    }

    fn phase_changed(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn announce_winners(&mut self, faction: Faction, winners: &[Player]) {
        self.winners = Some((faction, winners.iter().map(|player| player.name.clone()).collect()));
    }
}

#[derive(Default)]
struct Playlist(Vec<Option<String>>);

impl Ambience for Playlist {
    fn play(&mut self, track: &str) {
        self.0.push(Some(track.to_owned()));
    }

    fn stop(&mut self) {
        self.0.push(None);
    }
}

/// Four players A-D and a Wolf/Seer/Villager library, stored in `store`.
fn table<S: Store>(store: &mut S) -> (Vec<Player>, [Role; 3]) {
    for name in &["A", "B", "C", "D"] {
        store.insert_player(Player::new(*name, "person1")).expect("fresh id");
    }
    let roles = [
        Role::new("Wolf", "wolf", "Kills a villager each night.", Faction::Bad),
        Role::new("Seer", "seer", "Learns one player's faction each night.", Faction::Good),
        Role::new("Villager", "villager", "", Faction::Good),
    ];
    for role in &roles {
        store.insert_role(role.clone()).expect("fresh id");
    }
    (store.players(), roles)
}

#[test]
fn four_player_scenario() {
    let mut store = MemoryStore::new();
    let (players, [wolf, seer, villager]) = table(&mut store);
    let counts = RoleCounts::new().with(wolf.clone(), 1).with(seer.clone(), 1).with(villager.clone(), 2);
    for _ in 0..25 {
        let assignment = game::assign(&players, &counts, &mut Shuffled::thread()).expect("balanced configuration");
        assert_eq!(assignment.len(), 4);
        for player in &players {
            assert!(assignment.role(&player.id).is_some());
        }
        assert_eq!(assignment.count(&wolf.id), 1);
        assert_eq!(assignment.count(&seer.id), 1);
        assert_eq!(assignment.count(&villager.id), 2);
    }
}

#[test]
fn moderated_game_credits_winners() {
    let mut store = MemoryStore::new();
    let (players, [wolf, seer, villager]) = table(&mut store);
    let counts = RoleCounts::new().with(wolf, 1).with(seer, 1).with(villager, 2);
    let configuring = Configuring::with_counts(players, counts);
    let mut script = Script::new(vec![
        Command::Reveal(0),
        Command::Reveal(3),
        Command::Reveal(9),
        Command::TogglePhase,
        Command::ResetTimer,
        Command::Status,
        Command::TogglePhase,
        Command::End(Faction::Good),
        Command::Reveal(0),
    ]);
    let mut playlist = Playlist::default();
    // slots are [Wolf, Seer, Villager, Villager], so D is the wolf
    let settled = game::run(&mut script, &mut playlist, &mut store, &configuring, &mut Fixed::new(vec![1, 2, 3, 0]))
        .expect("game runs")
        .expect("game was ended, not abandoned");
    assert_eq!(script.revealed, vec![
        ("A".to_owned(), "Seer".to_owned()),
        ("D".to_owned(), "Wolf".to_owned()),
    ]);
    assert_eq!(script.missing, vec![9]);
    assert_eq!(script.phases, vec![Phase::Night, Phase::Day]);
    assert_eq!(script.winners, Some((Faction::Good, vec!["A".to_owned(), "B".to_owned(), "C".to_owned()])));
    // the reveal after the end is never asked for
    assert_eq!(script.commands.len(), 1);
    assert_eq!(settled.winners().len(), 3);
    let wins = store.players().into_iter().map(|player| player.wins).collect::<Vec<_>>();
    assert_eq!(wins, vec![1, 1, 1, 0]);
    assert_eq!(playlist.0.first(), Some(&Some(DAY_TRACK.to_owned())));
    let night = playlist.0[2].as_deref().expect("a night track after the first toggle");
    assert!(NIGHT_TRACKS.contains(&night));
    assert_eq!(playlist.0.last(), Some(&None));
}

#[test]
fn quitting_credits_nobody() {
    let mut store = MemoryStore::new();
    let (players, [wolf, _, villager]) = table(&mut store);
    let counts = RoleCounts::new().with(wolf, 1).with(villager, 3);
    let configuring = Configuring::with_counts(players.clone(), counts);
    let result = game::run(&mut Script::new(vec![Command::Next, Command::Quit]), &mut Playlist::default(), &mut store, &configuring, &mut Shuffled::thread())
        .expect("game runs");
    assert!(result.is_none());
    assert_eq!(store.players(), players);
}

#[test]
fn unbalanced_game_never_starts() {
    let mut store = MemoryStore::new();
    let (players, roles) = table(&mut store);
    let configuring = Configuring::new(players, roles.to_vec());
    let mut script = Script::new(vec![Command::End(Faction::Bad)]);
    match game::run(&mut script, &mut Playlist::default(), &mut store, &configuring, &mut Shuffled::thread()) {
        Err(game::Error::Assign(AssignError::UnbalancedConfiguration { players: 4, roles: 0 })) => {}
        result => panic!("expected an unbalanced configuration, got {:?}", result)
    }
    assert_eq!(script.commands.len(), 1);
}

#[test]
fn wins_survive_reopening_the_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("werewolf.json");
    {
        let mut store = JsonStore::open(&path).expect("missing file is an empty store");
        let (players, [wolf, seer, villager]) = table(&mut store);
        let counts = RoleCounts::new().with(wolf, 2).with(seer, 1).with(villager, 1);
        let game = Configuring::with_counts(players, counts).assign(&mut Fixed::identity()).expect("balanced configuration").begin();
        game.settle(&mut store, Faction::Bad).expect("complete assignment");
    }
    let store = JsonStore::open(&path).expect("failed to reopen store");
    let wins = store.players().into_iter().map(|player| (player.name, player.wins)).collect::<Vec<_>>();
    assert_eq!(wins, vec![
        ("A".to_owned(), 1),
        ("B".to_owned(), 1),
        ("C".to_owned(), 0),
        ("D".to_owned(), 0),
    ]);
}
