//! Programme description generator.
//!
//! Produces the plain-text short and long renderings of a programme. The
//! rendering surface decides how to paint them.

use crate::core::guide::{Showing, ShowingsIndex};
use crate::core::timeline::ChannelTimeline;
use crate::models::config::DisplayConfig;
use crate::models::programme::Programme;
use crate::utils::text::{dedup_case_insensitive, truncate_chars};
use crate::Error;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::ops::{BitOr, BitOrAssign, Sub};

/// Facets to include in a description. Flags combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteOptions(u16);

impl WriteOptions {
    pub const ACTOR: Self = Self(1 << 0);
    pub const CATEGORY: Self = Self(1 << 1);
    pub const EPISODE_NAME: Self = Self(1 << 2);
    pub const OTHER_SHOWINGS: Self = Self(1 << 3);
    pub const DATE: Self = Self(1 << 4);
    pub const STAR_RATING: Self = Self(1 << 5);
    pub const DESCRIPTION: Self = Self(1 << 6);
    pub const CONTINUED: Self = Self(1 << 7);

    /// Every facet except the description text.
    pub const SHORT: Self = Self(Self::ALL.0 & !Self::DESCRIPTION.0);
    pub const ALL: Self = Self((1 << 8) - 1);

    const NAMES: [(&'static str, WriteOptions); 8] = [
        ("actor", Self::ACTOR),
        ("category", Self::CATEGORY),
        ("episode", Self::EPISODE_NAME),
        ("showings", Self::OTHER_SHOWINGS),
        ("date", Self::DATE),
        ("stars", Self::STAR_RATING),
        ("description", Self::DESCRIPTION),
        ("continued", Self::CONTINUED),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for WriteOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for WriteOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Sub for WriteOptions {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl std::str::FromStr for WriteOptions {
    type Err = Error;

    /// Parse a comma separated list such as "actor,category" or "short".
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut options = WriteOptions::empty();
        for name in s.split(',').map(|n| n.trim().to_lowercase()) {
            options |= match name.as_str() {
                "" => continue,
                "short" => WriteOptions::SHORT,
                "all" => WriteOptions::ALL,
                other => WriteOptions::NAMES
                    .iter()
                    .find(|(flag_name, _)| *flag_name == other)
                    .map(|(_, flag)| *flag)
                    .ok_or_else(|| Error::other(format!("Unknown description facet: {}", other)))?,
            };
        }
        Ok(options)
    }
}

/// What a description needs beyond the programme itself.
pub struct DescriptionContext<'a> {
    /// Timeline the programme belongs to.
    pub timeline: &'a ChannelTimeline,
    /// Lookup for other showings, possibly across channels.
    pub index: &'a dyn ShowingsIndex,
    pub config: &'a DisplayConfig,
}

/// Other airings of the programme's title, excluding the programme itself,
/// by start time with duplicate (channel, start) pairs removed.
pub fn format_other_showings(programme: &Programme, index: &dyn ShowingsIndex) -> Vec<Showing> {
    let mut showings: Vec<Showing> = index
        .showings(programme.index_title())
        .into_iter()
        .filter(|s| !(s.channel == *programme.channel() && s.start == programme.start()))
        .collect();

    showings.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.channel.cmp(&b.channel)));
    showings.dedup_by(|a, b| a.start == b.start && a.channel == b.channel);
    showings
}

/// Render showings as "Sat 12 Mar 20:30 (ABC1), ...". A `limit` of 0 lists all.
pub fn render_showings(showings: &[Showing], config: &DisplayConfig, limit: usize) -> String {
    let shown = if limit == 0 {
        showings.len()
    } else {
        limit.min(showings.len())
    };

    let mut rendered: Vec<String> = showings[..shown]
        .iter()
        .map(|s| format!("{} ({})", format_time(s.start, &config.time_format), s.channel_name))
        .collect();
    if shown < showings.len() {
        rendered.push(format!("and {} more", showings.len() - shown));
    }
    rendered.join(", ")
}

/// Whether the previous showing on the channel is the first part of this one.
pub fn is_continuation(programme: &Programme, timeline: &ChannelTimeline) -> bool {
    programme
        .prev()
        .and_then(|key| timeline.get(key))
        .is_some_and(|prev| {
            prev.index_title() == programme.index_title() && prev.stop() == programme.start()
        })
}

/// Short description, limited to `short_length_limit` characters.
pub fn short_description(
    programme: &Programme,
    context: &DescriptionContext<'_>,
    options: WriteOptions,
) -> String {
    let config = context.config;
    let mut lines = vec![headline(programme, context, options)];

    if options.contains(WriteOptions::EPISODE_NAME) {
        lines.extend(episode_label(programme));
    }

    if options.contains(WriteOptions::ACTOR) {
        let limit = Some(config.max_short_credits);
        lines.extend(credit_line("Directed by", programme.directors(), limit));
        lines.extend(credit_line("Starring", programme.actors(), limit));
        lines.extend(credit_line("Presented by", programme.presenters(), limit));
    }

    if options.contains(WriteOptions::CATEGORY) {
        lines.extend(credit_line("Categories", programme.categories(), None));
    }

    if options.contains(WriteOptions::STAR_RATING) {
        if let Some(stars) = programme.star_rating() {
            lines.push(format!("Stars: {}", stars));
        }
    }

    if options.contains(WriteOptions::DESCRIPTION) {
        if let Some(description) = programme.description() {
            lines.push(description.trim().to_string());
        }
    }

    if options.contains(WriteOptions::OTHER_SHOWINGS) {
        let showings = format_other_showings(programme, context.index);
        if !showings.is_empty() {
            let limit = config.max_other_showings.max(1);
            lines.push(format!(
                "Other showings: {}",
                render_showings(&showings, config, limit)
            ));
        }
    }

    truncate_chars(&lines.join("\n"), config.short_length_limit)
}

/// Long description: full text, every credit and every other showing.
pub fn long_description(programme: &Programme, context: &DescriptionContext<'_>) -> String {
    let mut lines = vec![headline(
        programme,
        context,
        WriteOptions::DATE | WriteOptions::CONTINUED,
    )];
    lines.extend(episode_label(programme));

    if let Some(description) = programme.description() {
        lines.push(String::new());
        lines.push(description.trim().to_string());
        lines.push(String::new());
    }

    lines.extend(credit_line("Directed by", programme.directors(), None));
    lines.extend(credit_line("Starring", programme.actors(), None));
    lines.extend(credit_line("Presented by", programme.presenters(), None));
    for (role, names) in programme.other_credits() {
        lines.extend(credit_line(&capitalize(role), names, None));
    }
    lines.extend(credit_line("Categories", programme.categories(), None));

    let details = [
        ("Date", programme.date()),
        ("Language", programme.language()),
        ("Original language", programme.original_language()),
        ("Country", programme.country()),
        ("Aspect ratio", programme.aspect_ratio()),
        ("Rating", programme.rating()),
        ("Stars", programme.star_rating()),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    }
    if programme.is_movie() {
        lines.push("Movie".to_string());
    }

    let showings = format_other_showings(programme, context.index);
    if !showings.is_empty() {
        lines.push("Other showings:".to_string());
        for showing in &showings {
            lines.push(format!(
                "  {} ({})",
                format_time(showing.start, &context.config.time_format),
                showing.channel_name
            ));
        }
    }

    lines.join("\n")
}

/// Title line with year, classification and premiere/repeat badges.
fn headline(programme: &Programme, context: &DescriptionContext<'_>, options: WriteOptions) -> String {
    let mut line = programme.title().to_string();

    if options.contains(WriteOptions::DATE) {
        if let Some(year) = programme.year() {
            line.push_str(&format!(" ({})", year));
        }
    }
    if let Some(rating) = programme.rating() {
        line.push_str(&format!(" [{}]", rating));
    }
    if programme.is_premiere() {
        line.push_str(" (Premiere)");
    }
    if programme.is_repeat() {
        line.push_str(" (Repeat)");
    }
    if options.contains(WriteOptions::CONTINUED) && is_continuation(programme, context.timeline) {
        line.push_str(" (continued)");
    }

    line
}

/// Sub-title plus "S2 E5" style episode label.
fn episode_label(programme: &Programme) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(sub_title) = programme.sub_title() {
        parts.push(format!("\"{}\"", sub_title.trim()));
    }

    let info = programme.episode_info();
    match (info.season, info.episode) {
        (Some(season), Some(episode)) => parts.push(format!("S{} E{}", season, episode)),
        (Some(season), None) => parts.push(format!("Season {}", season)),
        (None, Some(episode)) => parts.push(format!("Episode {}", episode)),
        (None, None) => {
            if let Some(raw) = programme.episode_number() {
                parts.push(raw.trim().to_string());
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" - "))
    }
}

/// "Label: a, b, c" with repeated names dropped; `limit` cuts with "...".
fn credit_line(label: &str, names: &[String], limit: Option<usize>) -> Option<String> {
    let names = dedup_case_insensitive(names);
    if names.is_empty() {
        return None;
    }

    let mut listed: Vec<&str> = match limit {
        Some(limit) => names.iter().take(limit.max(1)).copied().collect(),
        None => names.clone(),
    };
    if listed.len() < names.len() {
        listed.push("...");
    }
    Some(format!("{}: {}", label, listed.join(", ")))
}

fn capitalize(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a time, falling back to ISO style for an invalid format string.
fn format_time(time: DateTime<Utc>, format: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::warn!("Invalid time format '{}'", format);
        return time.format("%Y-%m-%d %H:%M").to_string();
    }
    time.format_with_items(items.iter()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_excludes_description() {
        assert!(!WriteOptions::SHORT.contains(WriteOptions::DESCRIPTION));
        assert!(WriteOptions::SHORT.contains(WriteOptions::ACTOR | WriteOptions::CONTINUED));
        assert!(WriteOptions::ALL.contains(WriteOptions::SHORT | WriteOptions::DESCRIPTION));
        assert_eq!(WriteOptions::ALL - WriteOptions::DESCRIPTION, WriteOptions::SHORT);
    }

    #[test]
    fn test_parse_write_options() {
        let options: WriteOptions = "actor, category".parse().unwrap();
        assert_eq!(options, WriteOptions::ACTOR | WriteOptions::CATEGORY);
        assert_eq!("short".parse::<WriteOptions>().unwrap(), WriteOptions::SHORT);
        assert!("".parse::<WriteOptions>().unwrap().is_empty());
        assert!("colour".parse::<WriteOptions>().is_err());
    }

    #[test]
    fn test_credit_line_limit_and_dedup() {
        let names = vec![
            "Ann".to_string(),
            "ann".to_string(),
            "Bob".to_string(),
            "Cat".to_string(),
        ];
        assert_eq!(
            credit_line("Starring", &names, Some(2)).unwrap(),
            "Starring: Ann, Bob, ..."
        );
        assert_eq!(
            credit_line("Starring", &names, None).unwrap(),
            "Starring: Ann, Bob, Cat"
        );
        assert!(credit_line("Starring", &[], None).is_none());
    }

    #[test]
    fn test_format_time_invalid_format() {
        let time = "2011-03-12T20:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_time(time, "%H:%M"), "20:30");
        assert_eq!(format_time(time, "%"), "2011-03-12 20:30");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("writer"), "Writer");
        assert_eq!(capitalize(""), "");
    }
}
