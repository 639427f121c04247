pub use self::json_dir::JsonDirStore;
pub use self::sled_store::SledStore;
use crate::config::{Config, StoreKind};
use crate::error::StoreError;
use crate::game::Player;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;

mod json_dir;
mod sled_store;

/// Somewhere games are persisted between runs, keyed by game name.
pub trait PlayerStore {
    /// Loads the roster of a previously saved game.
    fn load(&self, game: &str) -> Result<Vec<Player>, StoreError>;

    /// Saves the full roster of a game, replacing whatever was saved before.
    fn save(&self, game: &str, players: &[Player]) -> Result<(), StoreError>;

    /// Lists the names of all saved games.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Records the summary of a finished game.
    fn archive(&self, _game: &str, _record: &Value) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Opens the store selected by the configuration.
pub fn open(config: &Config) -> anyhow::Result<Box<dyn PlayerStore>> {
    Ok(match config.store {
        StoreKind::Sled => {
            let store = SledStore::open(&config.db_path).with_context(|| {
                format!("could not open database at {}", config.db_path.display())
            })?;
            log::info!("Using sled database at {}", config.db_path.display());
            Box::new(store)
        }
        StoreKind::Json => {
            log::info!("Saving games to {}", config.games_dir.display());
            Box::new(JsonDirStore::new(&config.games_dir))
        }
    })
}

/// Splits a comma or line separated list of player names.
/// Blank entries are dropped; duplicates are kept.
pub fn import_names(source: &str) -> Vec<String> {
    source
        .split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Reads a list of player names from a file.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<String>, StoreError> {
    let path = path.as_ref();
    let names = import_names(&std::fs::read_to_string(path)?);
    if names.is_empty() {
        return Err(StoreError::Parse(format!("{}: no player names found", path.display())));
    }
    log::info!("Imported {} players from {}", names.len(), path.display());
    Ok(names)
}

#[cfg(test)]
pub use self::memory::MemoryStore;
