pub use self::chain::Chain;
pub use self::player::Player;
use self::ring::assign_targets;
use crate::error::GameError;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod chain;
mod player;
mod ring;
mod test;

/// A game of Assassin.
///
/// Serialises as the bare player roster, which is exactly what gets persisted.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct Game {
    players: Vec<Player>,
}

/// A successfully recorded elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kill {
    pub assassin: String,
    pub victim: String,
    /// The assassin's new target; `None` once the assassin is the last player standing.
    pub next_target: Option<String>,
}

impl Kill {
    /// Returns true if this kill ended the game.
    pub fn wins_game(&self) -> bool {
        self.next_target.is_none()
    }
}

impl Game {
    /// Creates a new game of Assassin, with every player hunting the next in a random ring.
    pub fn new(player_names: &[String], seed: u64) -> Result<Self, GameError> {
        if player_names.is_empty() {
            return Err(GameError::TooFewPlayers);
        }
        check_names(player_names.iter().map(|n| &n[..]))?;

        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let mut players = player_names
            .iter()
            .map(|name| Player::new(name.into()))
            .collect::<Vec<_>>();
        assign_targets(&mut players, &mut rng);

        Ok(Game { players })
    }

    /// Rebuilds a game from a saved roster.
    ///
    /// Rejects rosters whose targets no longer form a single ring.
    pub fn from_players(mut players: Vec<Player>) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::TooFewPlayers);
        }
        check_names(players.iter().map(|p| &p.name[..]))?;

        for player in &players {
            if player.kills != player.victims.len() {
                return Err(invalid(format!(
                    "{} has {} kills but {} victims",
                    player.name,
                    player.kills,
                    player.victims.len()
                )));
            }
            match (player.alive, &player.assassin, &player.target) {
                (true, Some(_), _) => {
                    return Err(invalid(format!("{} is alive but has an assassin", player.name)));
                }
                (false, None, _) => {
                    return Err(invalid(format!("{} was eliminated by nobody", player.name)));
                }
                (false, _, Some(_)) => {
                    let reason = format!("{} was eliminated but still has a target", player.name);
                    return Err(invalid(reason));
                }
                _ => {}
            }
        }

        // Older saves mark the last survivor as hunting themselves
        let mut alive = players.iter_mut().filter(|p| p.alive);
        match (alive.next(), alive.next()) {
            (None, _) => return Err(invalid("nobody is alive".into())),
            (Some(survivor), None) => {
                if survivor.is_hunting(&survivor.name) {
                    survivor.target = None;
                }
                if survivor.target.is_some() {
                    return Err(invalid(format!("{} has nobody left to hunt", survivor.name)));
                }
            }
            _ => {}
        }

        let game = Game { players };
        game.check_ring()?;
        Ok(game)
    }

    /// Gets the players, in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Gets the player names.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.players.iter().map(|p| &p.name[..])
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Returns the last player standing, if the game has been won.
    pub fn winner(&self) -> Option<&Player> {
        let mut alive = self.players.iter().filter(|p| p.alive);
        match (alive.next(), alive.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Records that `assassin` has eliminated `victim`.
    ///
    /// The assassin inherits the victim's target, which closes the gap left in the ring.
    /// Nothing is modified unless the kill is valid.
    pub fn record_kill(&mut self, assassin: &str, victim: &str) -> Result<Kill, GameError> {
        let hunter = self.find_alive(assassin)?;
        let prey = self.find_alive(victim)?;
        if !self.players[hunter].is_hunting(victim) {
            return Err(GameError::NotAssigned);
        }

        let inherited = self.players[prey].target.take();
        let prey = &mut self.players[prey];
        prey.alive = false;
        prey.assassin = Some(assassin.to_string());

        let hunter = &mut self.players[hunter];
        hunter.kills += 1;
        hunter.victims.push(victim.to_string());
        hunter.target = inherited.filter(|name| name != assassin);

        Ok(Kill {
            assassin: assassin.to_string(),
            victim: victim.to_string(),
            next_target: hunter.target.clone(),
        })
    }

    /// Walks the target ring from the first alive player back to themselves.
    /// Returns `None` if nobody is alive.
    pub fn chain(&self) -> Option<Chain> {
        let start = self.players.iter().find(|p| p.alive)?;
        let num_alive = self.num_players_alive();

        let mut names = vec![start.name.clone()];
        let mut current = start;
        let closed = loop {
            let next = current
                .target
                .as_deref()
                .and_then(|name| self.find_alive(name).ok())
                .map(|idx| &self.players[idx]);
            let Some(next) = next else {
                break num_alive == 1 && current.target.is_none();
            };
            if next.name == start.name {
                break true;
            }
            if names.len() == num_alive {
                break false;
            }
            names.push(next.name.clone());
            current = next;
        };

        Some(Chain::new(names, closed))
    }

    /// Ranks the players by number of kills; ties keep roster order.
    pub fn leaderboard(&self) -> Vec<&Player> {
        let mut ranked = self.players.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.kills.cmp(&a.kills));
        ranked
    }

    /// Finds an alive player with the given name.
    fn find_alive(&self, name: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.alive && p.name == name)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Returns `Ok` if the alive players form exactly one ring.
    fn check_ring(&self) -> Result<(), GameError> {
        let num_alive = self.num_players_alive();
        if num_alive < 2 {
            return Ok(());
        }

        for player in self.players.iter().filter(|p| p.alive) {
            let Some(target) = player.target.as_deref() else {
                return Err(invalid(format!("{} has no target", player.name)));
            };
            if target == player.name || self.find_alive(target).is_err() {
                return Err(invalid(format!("{} cannot hunt {}", player.name, target)));
            }
        }

        match self.chain() {
            Some(chain) if chain.is_closed() && chain.names().len() == num_alive => Ok(()),
            _ => Err(invalid("targets do not form a single ring".into())),
        }
    }
}

/// Player names double as targets, so they must be non-blank and unique.
fn check_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), GameError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(GameError::BlankName);
        }
        if !seen.insert(name) {
            return Err(GameError::DuplicatePlayer(name.to_string()));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidRoster(reason)
}
