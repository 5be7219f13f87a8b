//! Bookmark match data models.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Handle of a bookmark rule owned by the bookmark rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(pub u32);

impl std::fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How well a programme satisfies a bookmark rule, weakest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    #[default]
    None,
    /// Title matches but the programme is outside the bookmarked slot.
    TitleMatch,
    /// Programme starts inside the slot but finishes early.
    Underrun,
    /// Programme runs past the end of the slot.
    Overrun,
    FullMatch,
}

impl MatchStrength {
    pub fn is_match(self) -> bool {
        self != MatchStrength::None
    }
}

impl std::fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrength::None => write!(f, "none"),
            MatchStrength::TitleMatch => write!(f, "title"),
            MatchStrength::Underrun => write!(f, "underrun"),
            MatchStrength::Overrun => write!(f, "overrun"),
            MatchStrength::FullMatch => write!(f, "full"),
        }
    }
}

/// Highlight colour attached to a bookmark rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) colour.
    pub fn parse(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(value.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(value.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Result of offering a programme to the bookmark rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The winning rule.
    pub rule: BookmarkId,
    pub strength: MatchStrength,
    /// Highlight colour of the winning rule, if it has one.
    pub color: Option<Color>,
}

/// The bookmark binding stored on a programme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookmarkMatch {
    #[default]
    Unmatched,
    Matched {
        rule: BookmarkId,
        strength: MatchStrength,
        color: Option<Color>,
    },
}

impl BookmarkMatch {
    /// Build a binding from a classifier verdict. A `None` strength is unmatched.
    pub fn from_classification(classification: Option<Classification>) -> Self {
        match classification {
            Some(c) if c.strength.is_match() => BookmarkMatch::Matched {
                rule: c.rule,
                strength: c.strength,
                color: c.color,
            },
            _ => BookmarkMatch::Unmatched,
        }
    }

    pub fn rule(&self) -> Option<BookmarkId> {
        match self {
            BookmarkMatch::Matched { rule, .. } => Some(*rule),
            BookmarkMatch::Unmatched => None,
        }
    }

    pub fn strength(&self) -> MatchStrength {
        match self {
            BookmarkMatch::Matched { strength, .. } => *strength,
            BookmarkMatch::Unmatched => MatchStrength::None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            BookmarkMatch::Matched { color, .. } => *color,
            BookmarkMatch::Unmatched => None,
        }
    }
}
