//! Multi-channel guide: owns every channel timeline and answers
//! other-showings lookups across channels.

use crate::core::timeline::ChannelTimeline;
use crate::generators::description::{self, DescriptionContext, WriteOptions};
use crate::models::channel::{ChannelId, ChannelInfo};
use crate::models::config::DisplayConfig;
use crate::models::programme::{Programme, ProgrammeKey};
use crate::models::record::GuideSnapshot;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One airing of a title: where and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Showing {
    pub channel: ChannelId,
    pub channel_name: String,
    pub start: DateTime<Utc>,
}

impl Showing {
    pub fn new(channel: &ChannelInfo, start: DateTime<Utc>) -> Self {
        Self {
            channel: channel.id.clone(),
            channel_name: channel.display_name().to_string(),
            start,
        }
    }
}

/// Read-only lookup of airings by index title.
pub trait ShowingsIndex {
    /// Every airing whose index title equals `index_title`, in any order.
    fn showings(&self, index_title: &str) -> Vec<Showing>;
}

/// Guide-wide handle of a programme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgrammeRef {
    pub channel: ChannelId,
    pub key: ProgrammeKey,
}

/// All channel timelines of a guide.
#[derive(Debug, Clone, Default)]
pub struct Guide {
    channels: BTreeMap<ChannelId, ChannelTimeline>,
    display: DisplayConfig,
}

impl Guide {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            channels: BTreeMap::new(),
            display,
        }
    }

    /// Build a guide from loader output.
    ///
    /// Records with an invalid interval are skipped. Programmes on channels the
    /// snapshot does not declare get a channel named after their feed id.
    pub fn from_snapshot(snapshot: GuideSnapshot, display: DisplayConfig) -> Result<Self> {
        let mut guide = Guide::new(display);

        for info in snapshot.channels {
            guide.add_channel(info);
        }

        let mut skipped = 0;
        for record in snapshot.programmes {
            if !guide.channels.contains_key(&record.channel) {
                tracing::warn!("Programme on undeclared channel {}", record.channel);
                let id = record.channel.clone();
                guide.add_channel(ChannelInfo::new(id.clone(), id.as_str()));
            }

            match record.into_programme() {
                Ok(programme) => {
                    guide.insert(programme)?;
                }
                Err(e) => {
                    tracing::warn!("Skipping programme record: {}", e);
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            "Loaded {} programmes on {} channels ({} skipped)",
            guide.len(),
            guide.channels.len(),
            skipped
        );
        Ok(guide)
    }

    /// Load a JSON guide snapshot from disk.
    pub fn load_snapshot_file(path: &Path, display: DisplayConfig) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InvalidGuideFile(format!(
                "{} does not exist",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: GuideSnapshot = serde_json::from_str(&content)?;
        Self::from_snapshot(snapshot, display)
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Replace the display settings. Every cached description is dropped.
    pub fn set_display(&mut self, display: DisplayConfig) {
        self.display = display;
        for timeline in self.channels.values_mut() {
            timeline.invalidate_all();
        }
    }

    /// Add a channel, or update the info of a known one.
    ///
    /// Other-showings lines name the channel, so a changed name drops every
    /// cached description.
    pub fn add_channel(&mut self, info: ChannelInfo) {
        match self.channels.get_mut(&info.id) {
            Some(timeline) => {
                if *timeline.info() != info {
                    tracing::debug!("Updating channel {}", info.id);
                    timeline.set_info(info);
                    for timeline in self.channels.values_mut() {
                        timeline.invalidate_all();
                    }
                }
            }
            None => {
                self.channels.insert(info.id.clone(), ChannelTimeline::new(info));
            }
        }
    }

    /// Remove every programme of a channel. Returns how many were removed.
    pub fn clear_channel(&mut self, channel: &ChannelId) -> usize {
        let Some(timeline) = self.channels.get_mut(channel) else {
            return 0;
        };
        let titles: Vec<String> = timeline
            .iter()
            .map(|(_, programme)| programme.index_title().to_string())
            .collect();
        timeline.clear();

        for index_title in &titles {
            self.invalidate_title_elsewhere(channel, index_title);
        }
        titles.len()
    }

    pub fn channel(&self, id: &ChannelId) -> Option<&ChannelTimeline> {
        self.channels.get(id)
    }

    /// Timelines in channel id order.
    pub fn channels(&self) -> impl Iterator<Item = &ChannelTimeline> {
        self.channels.values()
    }

    pub(crate) fn channels_mut(&mut self) -> impl Iterator<Item = &mut ChannelTimeline> {
        self.channels.values_mut()
    }

    /// Total programmes across channels.
    pub fn len(&self) -> usize {
        self.channels.values().map(ChannelTimeline::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, programme: &ProgrammeRef) -> Option<&Programme> {
        self.channels.get(&programme.channel)?.get(programme.key)
    }

    pub(crate) fn get_mut(&mut self, programme: &ProgrammeRef) -> Option<&mut Programme> {
        self.channels.get_mut(&programme.channel)?.get_mut(programme.key)
    }

    /// Look up a programme by its identity.
    pub fn find(&self, channel: &ChannelId, start: DateTime<Utc>) -> Option<ProgrammeRef> {
        let key = self.channels.get(channel)?.find(start)?;
        Some(ProgrammeRef {
            channel: channel.clone(),
            key,
        })
    }

    /// Every programme, by channel then start time.
    pub fn iter(&self) -> impl Iterator<Item = (ProgrammeRef, &Programme)> {
        self.channels.iter().flat_map(|(id, timeline)| {
            timeline.iter().map(move |(key, programme)| {
                (
                    ProgrammeRef {
                        channel: id.clone(),
                        key,
                    },
                    programme,
                )
            })
        })
    }

    /// Insert a programme into its channel's timeline.
    pub fn insert(&mut self, programme: Programme) -> Result<ProgrammeRef> {
        let channel = programme.channel().clone();
        let index_title = programme.index_title().to_string();

        let timeline = self
            .channels
            .get_mut(&channel)
            .ok_or_else(|| Error::UnknownChannel(channel.to_string()))?;
        let replaced_title = timeline
            .find(programme.start())
            .and_then(|key| timeline.get(key))
            .map(|existing| existing.index_title().to_string());
        let key = timeline.insert(programme)?;

        self.invalidate_title_elsewhere(&channel, &index_title);
        if let Some(replaced_title) = replaced_title {
            self.invalidate_title_elsewhere(&channel, &replaced_title);
        }
        Ok(ProgrammeRef { channel, key })
    }

    /// Remove a programme from its timeline.
    pub fn remove(&mut self, programme: &ProgrammeRef) -> Option<Programme> {
        let removed = self.channels.get_mut(&programme.channel)?.remove(programme.key)?;
        self.invalidate_title_elsewhere(&programme.channel, removed.index_title());
        Some(removed)
    }

    /// Edit a programme in place; see [`ChannelTimeline::modify`].
    pub fn modify<F, R>(&mut self, programme: &ProgrammeRef, f: F) -> Option<R>
    where
        F: FnOnce(&mut Programme) -> R,
    {
        let old_title = self.get(programme)?.index_title().to_string();
        let result = self
            .channels
            .get_mut(&programme.channel)?
            .modify(programme.key, f)?;
        let new_title = self.get(programme)?.index_title().to_string();

        if old_title != new_title {
            self.invalidate_title_elsewhere(&programme.channel, &old_title);
            self.invalidate_title_elsewhere(&programme.channel, &new_title);
        }
        Some(result)
    }

    /// Drop programmes that finished at or before `cutoff` on every channel.
    pub fn evict_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let evicted: usize = self
            .channels
            .values_mut()
            .map(|timeline| timeline.evict_before(cutoff))
            .sum();

        // Other-showings lists anywhere may have referenced evicted airings.
        if evicted > 0 {
            for timeline in self.channels.values_mut() {
                timeline.invalidate_all();
            }
        }
        evicted
    }

    /// Other airings of the programme's title, sorted and de-duplicated.
    pub fn other_showings(&self, programme: &ProgrammeRef) -> Vec<Showing> {
        self.get(programme)
            .map(|p| description::format_other_showings(p, self))
            .unwrap_or_default()
    }

    /// Short description, computed on first access and cached on the entry.
    ///
    /// Recomputing stores the new text on the programme, hence `&mut self`.
    pub fn short_description(
        &mut self,
        programme: &ProgrammeRef,
        options: WriteOptions,
    ) -> Option<&str> {
        let timeline = self.channels.get(&programme.channel)?;
        let entry = timeline.get(programme.key)?;

        if entry.descriptions().short(options).is_none() {
            tracing::trace!("Rendering short description of '{}'", entry.title());
            let context = DescriptionContext {
                timeline,
                index: &*self,
                config: &self.display,
            };
            let text = description::short_description(entry, &context, options);
            self.get_mut(programme)?
                .descriptions_mut()
                .store_short(options, text);
        }

        self.get(programme)?.descriptions().short(options)
    }

    /// Long description, computed on first access and cached on the entry.
    pub fn long_description(&mut self, programme: &ProgrammeRef) -> Option<&str> {
        let timeline = self.channels.get(&programme.channel)?;
        let entry = timeline.get(programme.key)?;

        if entry.descriptions().long().is_none() {
            tracing::trace!("Rendering long description of '{}'", entry.title());
            let context = DescriptionContext {
                timeline,
                index: &*self,
                config: &self.display,
            };
            let text = description::long_description(entry, &context);
            self.get_mut(programme)?.descriptions_mut().store_long(text);
        }

        self.get(programme)?.descriptions().long()
    }

    fn invalidate_title_elsewhere(&mut self, channel: &ChannelId, index_title: &str) {
        for (id, timeline) in self.channels.iter_mut() {
            if id != channel {
                timeline.invalidate_title(index_title);
            }
        }
    }
}

impl ShowingsIndex for Guide {
    fn showings(&self, index_title: &str) -> Vec<Showing> {
        self.channels
            .values()
            .flat_map(|timeline| timeline.showings(index_title))
            .collect()
    }
}
