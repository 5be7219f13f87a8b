//! Programme entry: one scheduled airing on one channel.

use super::bookmark::BookmarkMatch;
use super::channel::ChannelId;
use crate::core::parser::{self, EpisodeInfo};
use crate::generators::description::WriteOptions;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Handle of a programme inside its channel timeline.
///
/// Handles are generational: once the entry is removed, the old handle no
/// longer resolves, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgrammeKey {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Adjacency links, maintained by the owning timeline only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub prev: Option<ProgrammeKey>,
    pub next: Option<ProgrammeKey>,
}

/// Memoized renderings. `None` means dirty.
#[derive(Debug, Clone, Default)]
pub(crate) struct DescriptionCache {
    short: Option<(WriteOptions, String)>,
    long: Option<String>,
}

impl DescriptionCache {
    pub fn short(&self, options: WriteOptions) -> Option<&str> {
        match &self.short {
            Some((cached_options, text)) if *cached_options == options => Some(text),
            _ => None,
        }
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn store_short(&mut self, options: WriteOptions, text: String) {
        self.short = Some((options, text));
    }

    pub fn store_long(&mut self, text: String) {
        self.long = Some(text);
    }

    pub fn invalidate(&mut self) {
        self.short = None;
        self.long = None;
    }
}

/// One scheduled airing of a show on one channel.
///
/// Identity is the pair (channel, start). Start and stop are fixed at
/// construction, so `start < stop` holds for the lifetime of the entry.
/// Setters for fields that feed bookmark matching clear the bookmark binding,
/// and setters for fields that feed descriptions mark the cached renderings
/// dirty.
#[derive(Debug, Clone)]
pub struct Programme {
    channel: ChannelId,
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
    title: String,
    index_title: String,
    sub_title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    episode_number: Option<String>,
    language: Option<String>,
    original_language: Option<String>,
    country: Option<String>,
    aspect_ratio: Option<String>,
    rating: Option<String>,
    star_rating: Option<String>,
    directors: Vec<String>,
    actors: Vec<String>,
    presenters: Vec<String>,
    categories: Vec<String>,
    other_credits: BTreeMap<String, Vec<String>>,
    is_premiere: bool,
    is_repeat: bool,
    is_movie: bool,
    is_suppressed: bool,
    bookmark: BookmarkMatch,
    links: Links,
    descriptions: DescriptionCache,
}

/// Store `None` for blank strings.
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Programme {
    /// Create an entry for `channel` airing over `[start, stop)`.
    pub fn new(channel: ChannelId, start: DateTime<Utc>, stop: DateTime<Utc>) -> Result<Self> {
        if start >= stop {
            return Err(Error::InvalidInterval { start, stop });
        }

        Ok(Self {
            channel,
            start,
            stop,
            title: String::new(),
            index_title: String::new(),
            sub_title: None,
            description: None,
            date: None,
            episode_number: None,
            language: None,
            original_language: None,
            country: None,
            aspect_ratio: None,
            rating: None,
            star_rating: None,
            directors: Vec::new(),
            actors: Vec::new(),
            presenters: Vec::new(),
            categories: Vec::new(),
            other_credits: BTreeMap::new(),
            is_premiere: false,
            is_repeat: false,
            is_movie: false,
            is_suppressed: false,
            bookmark: BookmarkMatch::Unmatched,
            links: Links::default(),
            descriptions: DescriptionCache::default(),
        })
    }

    // ---- Accessors ----

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn stop(&self) -> DateTime<Utc> {
        self.stop
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lower-cased title, used for search and other-showings lookups.
    pub fn index_title(&self) -> &str {
        &self.index_title
    }

    pub fn sub_title(&self) -> Option<&str> {
        self.sub_title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn episode_number(&self) -> Option<&str> {
        self.episode_number.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn original_language(&self) -> Option<&str> {
        self.original_language.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn aspect_ratio(&self) -> Option<&str> {
        self.aspect_ratio.as_deref()
    }

    pub fn rating(&self) -> Option<&str> {
        self.rating.as_deref()
    }

    pub fn star_rating(&self) -> Option<&str> {
        self.star_rating.as_deref()
    }

    pub fn directors(&self) -> &[String] {
        &self.directors
    }

    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn presenters(&self) -> &[String] {
        &self.presenters
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Credits for roles other than director, actor and presenter.
    pub fn other_credits(&self) -> &BTreeMap<String, Vec<String>> {
        &self.other_credits
    }

    pub fn is_premiere(&self) -> bool {
        self.is_premiere
    }

    pub fn is_repeat(&self) -> bool {
        self.is_repeat
    }

    pub fn is_movie(&self) -> bool {
        self.is_movie
    }

    pub fn is_suppressed(&self) -> bool {
        self.is_suppressed
    }

    /// Raw bookmark binding as stored.
    pub fn bookmark(&self) -> &BookmarkMatch {
        &self.bookmark
    }

    /// Previous showing on the same channel.
    pub fn prev(&self) -> Option<ProgrammeKey> {
        self.links.prev
    }

    /// Next showing on the same channel.
    pub fn next(&self) -> Option<ProgrammeKey> {
        self.links.next
    }

    // ---- Derived values ----

    /// Year parsed from the date field.
    pub fn year(&self) -> Option<u16> {
        self.date.as_deref().and_then(parser::parse_year)
    }

    /// Season parsed from the episode number.
    pub fn season(&self) -> Option<u32> {
        self.episode_info().season
    }

    /// Episode parsed from the episode number.
    pub fn episode(&self) -> Option<u32> {
        self.episode_info().episode
    }

    pub fn episode_info(&self) -> EpisodeInfo {
        self.episode_number
            .as_deref()
            .map(parser::parse_episode_number)
            .unwrap_or_default()
    }

    /// Length of the airing in seconds.
    pub fn seconds_length(&self) -> i64 {
        let seconds = (self.stop - self.start).num_seconds();
        debug_assert!(seconds >= 0, "programme stop precedes start");
        seconds.max(0)
    }

    /// Whether the `[start, stop)` intervals of the two entries intersect.
    pub fn overlaps_with(&self, other: &Programme) -> bool {
        debug_assert!(self.start < self.stop && other.start < other.stop);
        self.start < other.stop && other.start < self.stop
    }

    /// Whether the entry is airing at `time`.
    pub fn is_on_air_at(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.stop
    }

    // ---- Loader setters ----

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
        self.index_title = self.title.to_lowercase();
        self.matchable_changed();
    }

    pub fn set_sub_title<S: Into<String>>(&mut self, sub_title: S) {
        self.sub_title = non_empty(sub_title.into());
        self.matchable_changed();
    }

    pub fn set_description<S: Into<String>>(&mut self, description: S) {
        self.description = non_empty(description.into());
        self.matchable_changed();
    }

    pub fn set_date<S: Into<String>>(&mut self, date: S) {
        self.date = non_empty(date.into());
        self.descriptions.invalidate();
    }

    pub fn set_episode_number<S: Into<String>>(&mut self, episode_number: S) {
        self.episode_number = non_empty(episode_number.into());
        self.matchable_changed();
    }

    pub fn set_language<S: Into<String>>(&mut self, language: S) {
        self.language = non_empty(language.into());
        self.descriptions.invalidate();
    }

    pub fn set_original_language<S: Into<String>>(&mut self, language: S) {
        self.original_language = non_empty(language.into());
        self.descriptions.invalidate();
    }

    pub fn set_country<S: Into<String>>(&mut self, country: S) {
        self.country = non_empty(country.into());
        self.descriptions.invalidate();
    }

    pub fn set_aspect_ratio<S: Into<String>>(&mut self, aspect_ratio: S) {
        self.aspect_ratio = non_empty(aspect_ratio.into());
        self.descriptions.invalidate();
    }

    pub fn set_rating<S: Into<String>>(&mut self, rating: S) {
        self.rating = non_empty(rating.into());
        self.descriptions.invalidate();
    }

    pub fn set_star_rating<S: Into<String>>(&mut self, star_rating: S) {
        self.star_rating = non_empty(star_rating.into());
        self.descriptions.invalidate();
    }

    pub fn set_directors(&mut self, directors: Vec<String>) {
        self.directors = directors;
        self.matchable_changed();
    }

    pub fn set_actors(&mut self, actors: Vec<String>) {
        self.actors = actors;
        self.matchable_changed();
    }

    pub fn set_presenters(&mut self, presenters: Vec<String>) {
        self.presenters = presenters;
        self.matchable_changed();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
        self.matchable_changed();
    }

    /// Add one credit. The director, actor and presenter roles go to their
    /// own lists; any other role is kept under its lower-cased name.
    pub fn add_credit(&mut self, role: &str, name: impl Into<String>) {
        let name = name.into();
        match role.trim().to_lowercase().as_str() {
            "director" => self.directors.push(name),
            "actor" => self.actors.push(name),
            "presenter" => self.presenters.push(name),
            other => self
                .other_credits
                .entry(other.to_string())
                .or_default()
                .push(name),
        }
        self.matchable_changed();
    }

    pub fn add_category<S: Into<String>>(&mut self, category: S) {
        self.categories.push(category.into());
        self.matchable_changed();
    }

    pub fn set_premiere(&mut self, value: bool) {
        self.is_premiere = value;
        self.matchable_changed();
    }

    pub fn set_repeat(&mut self, value: bool) {
        self.is_repeat = value;
        self.matchable_changed();
    }

    pub fn set_movie(&mut self, value: bool) {
        self.is_movie = value;
        self.matchable_changed();
    }

    /// Hide or un-hide the entry. Suppression only affects the displayed match.
    pub fn set_suppressed(&mut self, value: bool) {
        self.is_suppressed = value;
    }

    fn matchable_changed(&mut self) {
        self.bookmark = BookmarkMatch::Unmatched;
        self.descriptions.invalidate();
    }

    // ---- Crate-internal mutation, used by the timeline and bookmark binding ----

    pub(crate) fn links(&self) -> Links {
        self.links
    }

    /// Re-link into the timeline. Adjacent showings feed the descriptions.
    pub(crate) fn set_links(&mut self, links: Links) {
        if self.links != links {
            self.links = links;
            self.descriptions.invalidate();
        }
    }

    pub(crate) fn set_bookmark(&mut self, binding: BookmarkMatch) {
        self.bookmark = binding;
    }

    pub(crate) fn descriptions(&self) -> &DescriptionCache {
        &self.descriptions
    }

    pub(crate) fn descriptions_mut(&mut self) -> &mut DescriptionCache {
        &mut self.descriptions
    }
}
