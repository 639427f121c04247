use super::PlayerStore;
use crate::error::StoreError;
use crate::game::Player;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persists each game as a pretty-printed JSON file named after the game.
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, game: &str) -> Result<PathBuf, StoreError> {
        let invalid = game.is_empty()
            || game == "."
            || game == ".."
            || game.contains(['/', '\\'])
            || Path::new(game).is_absolute();
        if invalid {
            return Err(StoreError::InvalidGameName);
        }
        Ok(self.dir.join(format!("{}.json", game)))
    }
}

impl PlayerStore for JsonDirStore {
    fn load(&self, game: &str) -> Result<Vec<Player>, StoreError> {
        let data = match std::fs::read_to_string(self.path(game)?) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StoreError::GameNotFound),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// Stages the roster beside its save file and renames it into place, so the
    /// previous save is replaced whole or not at all.
    fn save(&self, game: &str, players: &[Player]) -> Result<(), StoreError> {
        let path = self.path(game)?;
        let staged = path.with_extension("json.tmp");
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&staged, serde_json::to_string_pretty(players)?)?;
        if let Err(err) = std::fs::rename(&staged, &path) {
            std::fs::remove_file(&staged).ok();
            return Err(err.into());
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };
        let mut names = vec![];
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
