use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game].
///
/// [Game]: crate::game::Game
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("no living player exists with the given name")]
    PlayerNotFound,
    #[error("this player is not the assassin's current target")]
    NotAssigned,
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("player names cannot be blank")]
    BlankName,
    #[error("player {0:?} appears more than once")]
    DuplicatePlayer(String),
    #[error("saved roster is inconsistent: {0}")]
    InvalidRoster(String),
    #[error("invalid option, please choose {0}")]
    InvalidChoice(&'static str),
}

/// A failure to read or write persisted games.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("game does not exist")]
    GameNotFound,
    #[error("game names must be non-empty and cannot contain path separators")]
    InvalidGameName,
    #[error("could not parse {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

/// Anything that can go wrong while driving a [Session].
///
/// [Session]: crate::session::Session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
