use anyhow::{bail, Context};
use std::path::PathBuf;

/// Where saved games live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// A sled database.
    Sled,
    /// A directory of `<game>.json` files.
    Json,
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub store: StoreKind,
    pub db_path: PathBuf,
    pub games_dir: PathBuf,
    pub import_path: PathBuf,
    /// Fixes the target ring of new games; random when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::Sled,
            db_path: "assassin.db".into(),
            games_dir: "Games".into(),
            import_path: "Players/players.csv".into(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(store) = var("ASSASSIN_STORE") {
            config.store = match store.trim().to_ascii_lowercase().as_str() {
                "sled" => StoreKind::Sled,
                "json" => StoreKind::Json,
                other => bail!("ASSASSIN_STORE must be \"sled\" or \"json\", not {:?}", other),
            };
        }
        if let Some(path) = var("ASSASSIN_DB_PATH") {
            config.db_path = path.into();
        }
        if let Some(dir) = var("ASSASSIN_GAMES_DIR") {
            config.games_dir = dir.into();
        }
        if let Some(path) = var("ASSASSIN_IMPORT_PATH") {
            config.import_path = path.into();
        }
        if let Some(seed) = var("ASSASSIN_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid ASSASSIN_SEED: {}", seed))?;
            config.seed = Some(seed);
        }

        Ok(config)
    }
}
