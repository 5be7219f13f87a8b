//! Channel identity and display information.

use serde::{Deserialize, Serialize};

/// Feed identifier of a channel (e.g. "abc.au").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Channel display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Feed identifier.
    pub id: ChannelId,
    /// Human readable name (e.g. "ABC1").
    pub name: String,
    /// Broadcast channel numbers (e.g. ["2", "21"]).
    #[serde(default)]
    pub numbers: Vec<String>,
}

impl ChannelInfo {
    /// Create channel info with no channel numbers.
    pub fn new<S: Into<String>>(id: ChannelId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            numbers: Vec::new(),
        }
    }

    /// Name used when rendering showings; falls back to the feed id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}
