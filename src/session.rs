use crate::error::{GameError, SessionError};
use crate::game::{Game, Kill};
use crate::store::PlayerStore;
use crate::time::iso8601;
use serde_json::{json, Value};
use std::time::SystemTime;

/// A single game being played, tied to the store it is saved in.
pub struct Session<'a> {
    /// The game name, which is also its key in the store.
    name: String,
    /// The game itself.
    game: Game,
    /// Where the game is persisted after every change.
    store: &'a dyn PlayerStore,
    /// Whether this game has been archived.
    archived: bool,
}

impl<'a> Session<'a> {
    /// Starts a new game with the given players and saves it.
    pub fn create(
        name: &str,
        player_names: &[String],
        seed: u64,
        store: &'a dyn PlayerStore,
    ) -> Result<Self, SessionError> {
        let game = Game::new(player_names, seed)?;
        log::info!("Created game {} with {} players", name, game.num_players());

        let mut session = Self {
            name: name.to_string(),
            game,
            store,
            archived: false,
        };
        session.persist_game(&session.game)?;
        session.archive();
        Ok(session)
    }

    /// Picks up a previously saved game.
    pub fn resume(name: &str, store: &'a dyn PlayerStore) -> Result<Self, SessionError> {
        let players = store.load(name)?;
        let game = Game::from_players(players).map_err(|err| {
            log::warn!("Saved game {} failed validation: {}", name, err);
            err
        })?;
        log::info!(
            "Resumed game {} ({} of {} alive)",
            name,
            game.num_players_alive(),
            game.num_players()
        );

        Ok(Self {
            name: name.to_string(),
            archived: game.game_over(),
            game,
            store,
        })
    }

    /// Gets the game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Records an elimination and saves the result.
    pub fn record_kill(&mut self, assassin: &str, victim: &str) -> Result<Kill, SessionError> {
        let kill = self.mutate_game(|game| game.record_kill(assassin, victim));
        match &kill {
            Ok(kill) if kill.wins_game() => {
                log::info!("{}: {} eliminated {} and won", self.name, kill.assassin, kill.victim);
            }
            Ok(kill) => log::info!("{}: {} eliminated {}", self.name, kill.assassin, kill.victim),
            Err(err) => {
                log::warn!("{}: rejected kill of {} by {}: {}", self.name, victim, assassin, err);
            }
        }
        kill
    }

    /// Performs an action on a copy of the game, persists the copy, then adopts it.
    /// If either the action or the save fails, the game is left as it was.
    pub fn mutate_game<F, T>(&mut self, mutation: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        let mut next = self.game.clone();
        let result = mutation(&mut next)?;
        self.persist_game(&next)?;
        self.game = next;
        self.archive();
        Ok(result)
    }

    /// Persists a game state, overwriting the previous save.
    fn persist_game(&self, game: &Game) -> Result<(), SessionError> {
        self.store.save(&self.name, game.players()).map_err(|err| {
            log::error!("Could not save game {}: {}", self.name, err);
            err.into()
        })
    }

    /// Archives the game if it is over and hasn't been archived yet.
    fn archive(&mut self) {
        if self.archived {
            return;
        }
        let Some(record) = self.summary() else {
            return;
        };
        match self.store.archive(&self.name, &record) {
            Ok(()) => self.archived = true,
            Err(err) => log::error!("Could not archive game {}: {}", self.name, err),
        }
    }

    /// Summarises a finished game; `None` while the game is still running.
    fn summary(&self) -> Option<Value> {
        let winner = self.game.winner()?;
        let standings = self
            .game
            .leaderboard()
            .iter()
            .map(|p| json!({ "name": p.name, "kills": p.kills }))
            .collect::<Value>();
        Some(json!({
            "game": self.name,
            "players": self.game.player_names().collect::<Value>(),
            "winner": winner.name,
            "standings": standings,
            "finished": iso8601(SystemTime::now()),
        }))
    }
}
