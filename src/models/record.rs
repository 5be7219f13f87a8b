//! Structured feed records handed over by a guide loader.

use super::channel::{ChannelId, ChannelInfo};
use super::programme::Programme;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One programme as it arrives from a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgrammeRecord {
    pub channel: ChannelId,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<String>,
    /// Credits by role ("director", "actor", "presenter", "writer", ...).
    #[serde(default)]
    pub credits: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub premiere: bool,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub movie: bool,
}

impl ProgrammeRecord {
    /// Build a programme. The interval is validated before any field is set.
    pub fn into_programme(self) -> Result<Programme> {
        let mut programme = Programme::new(self.channel, self.start, self.stop)?;

        programme.set_title(self.title);
        programme.set_sub_title(self.sub_title.unwrap_or_default());
        programme.set_description(self.description.unwrap_or_default());
        programme.set_date(self.date.unwrap_or_default());
        programme.set_episode_number(self.episode_number.unwrap_or_default());
        programme.set_language(self.language.unwrap_or_default());
        programme.set_original_language(self.original_language.unwrap_or_default());
        programme.set_country(self.country.unwrap_or_default());
        programme.set_aspect_ratio(self.aspect_ratio.unwrap_or_default());
        programme.set_rating(self.rating.unwrap_or_default());
        programme.set_star_rating(self.star_rating.unwrap_or_default());

        for (role, names) in self.credits {
            for name in names {
                programme.add_credit(&role, name);
            }
        }
        programme.set_categories(self.categories);

        programme.set_premiere(self.premiere);
        programme.set_repeat(self.repeat);
        programme.set_movie(self.movie);

        Ok(programme)
    }
}

/// A whole guide as produced by a loader: channels plus their programmes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideSnapshot {
    #[serde(default)]
    pub channels: Vec<ChannelInfo>,
    #[serde(default)]
    pub programmes: Vec<ProgrammeRecord>,
}
