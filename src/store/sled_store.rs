use super::PlayerStore;
use crate::error::StoreError;
use crate::game::Player;
use serde_json::Value;
use std::path::Path;

/// Persists games to a sled database.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
    games: sled::Tree,
    archive: sled::Tree,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_db(sled::open(path)?)
    }

    pub fn with_db(db: sled::Db) -> Result<Self, StoreError> {
        Ok(Self {
            games: db.open_tree("games")?,
            archive: db.open_tree("archive")?,
            db,
        })
    }
}

impl PlayerStore for SledStore {
    fn load(&self, game: &str) -> Result<Vec<Player>, StoreError> {
        let Some(roster) = self.games.get(game.as_bytes())? else {
            return Err(StoreError::GameNotFound);
        };
        Ok(serde_json::from_slice(&roster)?)
    }

    fn save(&self, game: &str, players: &[Player]) -> Result<(), StoreError> {
        self.games.insert(game.as_bytes(), serde_json::to_vec(players)?)?;
        self.games.flush()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = vec![];
        for key in self.games.iter().keys() {
            let key = key?;
            match std::str::from_utf8(&key) {
                Ok(name) => names.push(name.to_string()),
                Err(_) => log::error!("Found game with a non UTF-8 name: {:?}", key),
            }
        }
        Ok(names)
    }

    fn archive(&self, game: &str, record: &Value) -> Result<(), StoreError> {
        let key = self.db.generate_id()?.to_be_bytes();
        self.archive.insert(key, record.to_string().as_bytes())?;
        log::info!("Archived game {}", game);
        Ok(())
    }
}
