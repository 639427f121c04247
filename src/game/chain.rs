use std::fmt;

/// The live elimination order, read off the target ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    names: Vec<String>,
    closed: bool,
}

impl Chain {
    pub(super) fn new(names: Vec<String>, closed: bool) -> Self {
        Self { names, closed }
    }

    /// The alive players in hunting order, starting from the first alive player.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` iff the walk arrived back at its starting player.
    /// A lone survivor with no target, or hunting themselves, forms a closed chain of one.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(" -> "))?;
        if self.closed && self.names.len() > 1 {
            write!(f, " -> {}", self.names[0])?;
        }
        Ok(())
    }
}
