use serde::{Deserialize, Serialize};

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub alive: bool,
    pub kills: usize,
    /// Players eliminated by this player, in the order they fell.
    #[serde(default)]
    pub victims: Vec<String>,
    /// Who eliminated this player.
    #[serde(with = "blank_as_none", default)]
    pub assassin: Option<String>,
    /// Who this player must eliminate next.
    #[serde(with = "blank_as_none", default)]
    pub target: Option<String>,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            alive: true,
            kills: 0,
            victims: vec![],
            assassin: None,
            target: None,
        }
    }

    /// Returns `true` iff this player is currently hunting `name`.
    pub fn is_hunting(&self, name: &str) -> bool {
        self.target.as_deref() == Some(name)
    }
}

/// Stores an absent name as `""`, which is how saved rosters have always
/// represented "no assassin" and "no target".
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|name| !name.is_empty()))
    }
}
