use crate::config::Config;
use crate::error::{GameError, SessionError};
use crate::game::Game;
use crate::menu::{
    is_done, DashboardChoice, EntryMethod, MainChoice, DASHBOARD_MENU, ENTRY_MENU, MAIN_MENU,
};
use crate::session::Session;
use crate::store::{self, PlayerStore};
use rand::RngCore;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const PAUSE: &str = "Press enter or type any input to continue... \n";

/// A line-oriented conversation with whoever is running the game.
pub trait LineInterface {
    /// Shows `message` and reads one line of input, or `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Shows a line of output.
    fn display(&mut self, message: &str);
}

/// Talks to the user over stdin and stdout.
pub struct Terminal;

impl LineInterface for Terminal {
    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{}", message);
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                log::error!("Could not read input: {}", err);
                None
            }
        }
    }

    fn display(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Where to go once a flow finishes.
enum Flow {
    MainMenu,
    Exit,
}

/// Drives the menus: starting and resuming games, and the in-game dashboard.
pub struct Console<'a, L> {
    io: L,
    store: &'a dyn PlayerStore,
    config: &'a Config,
}

impl<'a, L: LineInterface> Console<'a, L> {
    pub fn new(io: L, store: &'a dyn PlayerStore, config: &'a Config) -> Self {
        Self { io, store, config }
    }

    /// Runs until the user quits or input runs out.
    pub fn run(&mut self) {
        loop {
            let Some(choice) = self.choose::<MainChoice>(MAIN_MENU) else {
                return;
            };
            let flow = match choice {
                MainChoice::NewGame => self.start_new_game(),
                MainChoice::ContinueGame => self.continue_game(),
                MainChoice::Quit => Flow::Exit,
            };
            if let Flow::Exit = flow {
                return;
            }
        }
    }

    /// Prompts until the answer parses as a valid choice.
    fn choose<T: FromStr<Err = GameError>>(&mut self, menu: &str) -> Option<T> {
        loop {
            let line = self.io.prompt(menu)?;
            match line.parse() {
                Ok(choice) => return Some(choice),
                Err(err) => self.io.display(&format!("Sorry, {}.", err)),
            }
        }
    }

    fn start_new_game(&mut self) -> Flow {
        let Some(name) = self.io.prompt("Enter game name: ") else {
            return Flow::Exit;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            self.io.display("A game needs a name. Returning to main menu.");
            return Flow::MainMenu;
        }
        if matches!(self.store.list(), Ok(games) if games.contains(&name)) {
            let question = format!("A game named {} already exists. Overwrite it? (y/n): ", name);
            let Some(answer) = self.io.prompt(&question) else {
                return Flow::Exit;
            };
            if !answer.trim().to_ascii_lowercase().starts_with('y') {
                self.io.display("Returning to main menu.");
                return Flow::MainMenu;
            }
        }

        let Some(method) = self.io.prompt(ENTRY_MENU) else {
            return Flow::Exit;
        };
        let players = match method.parse::<EntryMethod>() {
            Ok(EntryMethod::Manual) => match self.enter_names() {
                Some(players) => players,
                None => return Flow::Exit,
            },
            Ok(EntryMethod::Import) => match store::import_file(&self.config.import_path) {
                Ok(players) => players,
                Err(err) => {
                    log::error!("Could not import players: {}", err);
                    self.io.display(&format!("Error reading the file: {}", err));
                    return Flow::MainMenu;
                }
            },
            Err(err) => {
                self.io.display(&format!("Sorry, {}. Returning to main menu.", err));
                return Flow::MainMenu;
            }
        };

        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
        match Session::create(&name, &players, seed, self.store) {
            Ok(session) => self.dashboard(session),
            Err(err) => {
                self.io.display(&format!("Could not start the game: {}", err));
                Flow::MainMenu
            }
        }
    }

    fn continue_game(&mut self) -> Flow {
        match self.store.list() {
            Ok(games) if !games.is_empty() => {
                self.io.display(&format!("Saved games: {}", games.join(", ")));
            }
            Ok(_) => self.io.display("There are no saved games."),
            Err(err) => log::error!("Could not list saved games: {}", err),
        }

        let Some(name) = self.io.prompt("Enter game name: ") else {
            return Flow::Exit;
        };
        match Session::resume(name.trim(), self.store) {
            Ok(session) => self.dashboard(session),
            Err(err) => {
                self.io.display(&format!("Error loading the game: {}", err));
                Flow::MainMenu
            }
        }
    }

    /// Reads player names one per line until "done".
    fn enter_names(&mut self) -> Option<Vec<String>> {
        let mut players: Vec<String> = vec![];
        loop {
            let line = self.io.prompt("Enter player's name (type 'Done' to finish): ")?;
            if is_done(&line) {
                return Some(players);
            }
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            if players.iter().any(|p| p == name) {
                self.io.display(&format!("{} is already playing.", name));
                continue;
            }
            players.push(name.to_string());
        }
    }

    fn dashboard(&mut self, mut session: Session) -> Flow {
        loop {
            self.io.display(&format!("\nGame Dashboard: {}", session.name()));
            let Some(choice) = self.choose::<DashboardChoice>(DASHBOARD_MENU) else {
                return Flow::Exit;
            };
            let shown = match choice {
                DashboardChoice::Leaderboard => self.show_leaderboard(session.game()),
                DashboardChoice::RecordKill => self.record_kill(&mut session),
                DashboardChoice::GameTree => self.show_game_tree(session.game()),
                DashboardChoice::EndGame => {
                    self.io.display("Ending game...");
                    return Flow::MainMenu;
                }
            };
            if shown.is_none() {
                return Flow::Exit;
            }
        }
    }

    fn show_leaderboard(&mut self, game: &Game) -> Option<()> {
        self.io.display("\nLeaderboard:");
        for player in game.leaderboard() {
            self.io.display(&format!("{}: {} kills", player.name, player.kills));
        }
        self.io.display("\n");
        self.io.prompt(PAUSE).map(drop)
    }

    fn show_game_tree(&mut self, game: &Game) -> Option<()> {
        match game.chain() {
            None => self.io.display("No alive players to display."),
            Some(chain) => {
                if !chain.is_closed() {
                    log::warn!("Target ring is broken after {}", chain.names().join(", "));
                }
                self.io.display(&chain.to_string());
            }
        }
        self.io.display("\n");
        self.io.prompt(PAUSE).map(drop)
    }

    fn record_kill(&mut self, session: &mut Session) -> Option<()> {
        if let Some(winner) = session.game().winner() {
            let message = format!("The game is over. {} is the last one standing.", winner.name);
            self.io.display(&message);
            return Some(());
        }

        let assassin = self.io.prompt("Enter Assassin's name: ")?;
        let victim = self.io.prompt("Enter Victim's name: ")?;
        let (assassin, victim) = (assassin.trim(), victim.trim());

        match session.record_kill(assassin, victim) {
            Ok(kill) => {
                self.io.display(&format!("{} has successfully eliminated {}.", assassin, victim));
                let outcome = match kill.next_target {
                    Some(target) => format!("{}'s new target is: {}.", assassin, target),
                    None => format!("{} is the last one standing and wins the game!", assassin),
                };
                self.io.display(&outcome);
            }
            Err(SessionError::Game(GameError::NotAssigned)) => {
                self.io.display(&format!("{} is not allowed to kill {}.", assassin, victim));
            }
            Err(SessionError::Game(_)) => {
                self.io.display(
                    "Invalid names or player(s) not found or already eliminated. Please try again.",
                );
            }
            Err(SessionError::Store(err)) => {
                self.io.display(&format!(
                    "The game could not be saved, so the kill was not recorded: {}",
                    err
                ));
            }
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use crate::store::MemoryStore;
    use std::collections::VecDeque;
    use std::io::Write as _;

    /// Replays canned input and records everything shown.
    #[derive(Default)]
    struct Scripted {
        input: VecDeque<String>,
        output: Vec<String>,
    }

    impl Scripted {
        fn new(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|s| s.to_string()).collect(),
                output: vec![],
            }
        }

        fn shown(&self, text: &str) -> bool {
            self.output.iter().any(|line| line.contains(text))
        }
    }

    impl LineInterface for Scripted {
        fn prompt(&mut self, _message: &str) -> Option<String> {
            self.input.pop_front()
        }

        fn display(&mut self, message: &str) {
            self.output.push(message.to_string());
        }
    }

    fn seeded() -> Config {
        Config {
            seed: Some(1),
            ..Config::default()
        }
    }

    fn run(store: &MemoryStore, config: &Config, lines: &[&str]) -> Scripted {
        let mut console = Console::new(Scripted::new(lines), store, config);
        console.run();
        console.io
    }

    fn save_abc(store: &MemoryStore) {
        let players = [("A", "B"), ("B", "C"), ("C", "A")]
            .iter()
            .map(|(name, target)| {
                let mut player = Player::new(name.to_string());
                player.target = Some(target.to_string());
                player
            })
            .collect::<Vec<_>>();
        store.save("office", &players).unwrap();
    }

    #[test]
    fn plays_a_duel_to_the_end() {
        let store = MemoryStore::default();
        let io = run(
            &store,
            &seeded(),
            &["1", "duel", "1", "A", "B", "done", "2", "A", "B", "3", "", "2", "4", "3"],
        );

        assert!(io.shown("A has successfully eliminated B."));
        assert!(io.shown("A is the last one standing and wins the game!"));
        assert!(io.output.iter().any(|line| line == "A"));
        assert!(io.shown("The game is over. A is the last one standing."));
        assert!(io.shown("Ending game..."));

        let saved = store.load("duel").unwrap();
        assert_eq!(saved.iter().filter(|p| p.alive).count(), 1);
        assert_eq!(store.archived.borrow().len(), 1);
    }

    #[test]
    fn unsaved_kill_is_reported_as_not_recorded() {
        let store = MemoryStore::default();
        store.writes_left.set(Some(1));
        let io = run(
            &store,
            &seeded(),
            &["1", "duel", "1", "A", "B", "done", "2", "A", "B", "4", "3"],
        );

        assert!(io.shown("The game could not be saved, so the kill was not recorded"));
        assert!(!io.shown("has successfully eliminated"));
        let saved = store.load("duel").unwrap();
        assert!(saved.iter().all(|p| p.alive));
        assert!(store.archived.borrow().is_empty());
    }

    #[test]
    fn continues_saved_game() {
        let store = MemoryStore::default();
        save_abc(&store);
        let io = run(
            &store,
            &seeded(),
            &[
                "2", "office", "2", "A", "C", "2", "Z", "B", "2", "A", "B", "3", "", "1", "", "4",
                "3",
            ],
        );

        assert!(io.shown("Saved games: office"));
        assert!(io.shown("A is not allowed to kill C."));
        assert!(io.shown("Invalid names or player(s) not found or already eliminated."));
        assert!(io.shown("A's new target is: C."));
        assert!(io.output.iter().any(|line| line == "A -> C -> A"));

        let board = io
            .output
            .iter()
            .skip_while(|line| !line.contains("Leaderboard:"))
            .skip(1)
            .take(3)
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(board, ["A: 1 kills", "B: 0 kills", "C: 0 kills"]);

        assert_eq!(store.load("office").unwrap()[0].victims, vec!["B".to_string()]);
    }

    #[test]
    fn invalid_menu_choice_reprompts() {
        let store = MemoryStore::default();
        save_abc(&store);
        let io = run(&store, &seeded(), &["7", "2", "office", "9", "4", "3"]);

        let complaints = io
            .output
            .iter()
            .filter(|line| line.starts_with("Sorry, invalid option"))
            .count();
        assert_eq!(complaints, 2);
        assert!(io.shown("Ending game..."));
    }

    #[test]
    fn missing_game_returns_to_main_menu() {
        let store = MemoryStore::default();
        let io = run(&store, &seeded(), &["2", "nope", "3"]);

        assert!(io.shown("There are no saved games."));
        assert!(io.shown("Error loading the game: game does not exist"));
        assert!(io.input.is_empty());
    }

    #[test]
    fn end_of_input_exits() {
        let store = MemoryStore::default();
        let io = run(&store, &seeded(), &["1", "office", "1", "A"]);
        assert!(io.input.is_empty());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn repeated_names_are_skipped() {
        let store = MemoryStore::default();
        let io = run(&store, &seeded(), &["1", "office", "1", "A", "A", "", "B", "DONE", "4", "3"]);

        assert!(io.shown("A is already playing."));
        assert_eq!(store.load("office").unwrap().len(), 2);
    }

    #[test]
    fn empty_roster_is_refused() {
        let store = MemoryStore::default();
        let io = run(&store, &seeded(), &["1", "office", "1", "done", "3"]);

        assert!(io.shown("Could not start the game: too few players in the game"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn invalid_entry_method_returns_to_main_menu() {
        let store = MemoryStore::default();
        let io = run(&store, &seeded(), &["1", "office", "3", "3"]);
        assert!(io.shown("Returning to main menu."));
        assert!(io.input.is_empty());
    }

    #[test]
    fn imports_players_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Alex, Bob,Cat,").unwrap();
        let config = Config {
            import_path: file.path().to_path_buf(),
            ..seeded()
        };
        let store = MemoryStore::default();
        run(&store, &config, &["1", "imported", "2", "4", "3"]);

        let saved = store.load("imported").unwrap();
        let names = saved.iter().map(|p| &p.name[..]).collect::<Vec<_>>();
        assert_eq!(names, ["Alex", "Bob", "Cat"]);
        assert!(Game::from_players(saved).is_ok());
    }

    #[test]
    fn failed_import_returns_to_main_menu() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            import_path: dir.path().join("missing.csv"),
            ..seeded()
        };
        let store = MemoryStore::default();
        let io = run(&store, &config, &["1", "imported", "2", "3"]);

        assert!(io.shown("Error reading the file"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn declining_overwrite_keeps_saved_game() {
        let store = MemoryStore::default();
        save_abc(&store);
        let before = store.load("office").unwrap();
        run(&store, &seeded(), &["1", "office", "n", "3"]);
        assert_eq!(store.load("office").unwrap(), before);
    }

    #[test]
    fn accepting_overwrite_replaces_saved_game() {
        let store = MemoryStore::default();
        save_abc(&store);
        run(&store, &seeded(), &["1", "office", "y", "1", "X", "Y", "done", "4", "3"]);

        let names = store
            .load("office")
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["X", "Y"]);
    }
}
