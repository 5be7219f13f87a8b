//! Integration tests for short/long descriptions and other showings.
//!
//! Tests cover:
//! - Short description contents and credit limits
//! - Caching and invalidation when the guide changes
//! - Other showings ordering, exclusion and de-duplication
//! - Continuation detection
//! - Long description completeness

use chrono::{DateTime, TimeZone, Utc};
use tvguide::core::guide::{Guide, ProgrammeRef, Showing, ShowingsIndex};
use tvguide::core::timeline::ChannelTimeline;
use tvguide::generators::description::{
    format_other_showings, is_continuation, render_showings, short_description,
    DescriptionContext, WriteOptions,
};
use tvguide::models::channel::{ChannelId, ChannelInfo};
use tvguide::models::config::DisplayConfig;
use tvguide::models::programme::Programme;

// ========== TEST FIXTURES ==========

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 3, 12, hour, minute, 0).unwrap()
}

fn abc() -> ChannelInfo {
    ChannelInfo::new(ChannelId::new("abc.au"), "ABC1")
}

fn sbs() -> ChannelInfo {
    ChannelInfo::new(ChannelId::new("sbs.au"), "SBS")
}

fn create_programme(channel: &str, title: &str, start: DateTime<Utc>) -> Programme {
    let stop = start + chrono::Duration::hours(1);
    let mut programme = Programme::new(ChannelId::new(channel), start, stop).unwrap();
    programme.set_title(title);
    programme
}

fn create_movie() -> Programme {
    let mut programme = create_programme("abc.au", "Casablanca", at(20, 30));
    programme.set_date("1942");
    programme.set_rating("PG");
    programme.set_repeat(true);
    programme.set_star_rating("4/4");
    programme.set_description("A nightclub owner in Morocco shelters an old flame.");
    programme.add_credit("director", "Michael Curtiz");
    for actor in ["Humphrey Bogart", "Ingrid Bergman", "Paul Henreid", "Claude Rains"] {
        programme.add_credit("actor", actor);
    }
    programme.add_credit("writer", "Julius Epstein");
    programme.add_category("Drama");
    programme.add_category("Romance");
    programme
}

fn create_guide() -> Guide {
    let mut guide = Guide::new(DisplayConfig::default());
    guide.add_channel(abc());
    guide.add_channel(sbs());
    guide
}

fn short_text(guide: &mut Guide, programme: &ProgrammeRef, options: WriteOptions) -> String {
    guide
        .short_description(programme, options)
        .unwrap()
        .to_string()
}

/// Index that hands back a fixed list, duplicates and all.
struct FixedShowings(Vec<Showing>);

impl ShowingsIndex for FixedShowings {
    fn showings(&self, _index_title: &str) -> Vec<Showing> {
        self.0.clone()
    }
}

// ========== SHORT DESCRIPTION TESTS ==========

#[test]
fn test_short_description_contents() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();

    let text = short_text(&mut guide, &movie, WriteOptions::SHORT);
    assert_eq!(
        text,
        "Casablanca (1942) [PG] (Repeat)\n\
         Directed by: Michael Curtiz\n\
         Starring: Humphrey Bogart, Ingrid Bergman, Paul Henreid, ...\n\
         Categories: Drama, Romance\n\
         Stars: 4/4"
    );
}

#[test]
fn test_short_description_respects_options() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();

    let text = short_text(&mut guide, &movie, WriteOptions::DESCRIPTION);
    assert_eq!(
        text,
        "Casablanca [PG] (Repeat)\nA nightclub owner in Morocco shelters an old flame."
    );

    let text = short_text(&mut guide, &movie, WriteOptions::empty());
    assert_eq!(text, "Casablanca [PG] (Repeat)");
}

#[test]
fn test_episode_label() {
    let mut guide = create_guide();
    let mut programme = create_programme("abc.au", "Doctor Who", at(19, 0));
    programme.set_sub_title("The Doctor's Wife");
    programme.set_episode_number("5.3.");
    let programme = guide.insert(programme).unwrap();

    let text = short_text(&mut guide, &programme, WriteOptions::EPISODE_NAME);
    assert_eq!(text, "Doctor Who\n\"The Doctor's Wife\" - S6 E4");
}

#[test]
fn test_short_description_truncated() {
    let mut guide = Guide::new(DisplayConfig {
        short_length_limit: 24,
        ..DisplayConfig::default()
    });
    guide.add_channel(abc());
    let movie = guide.insert(create_movie()).unwrap();

    let text = short_text(&mut guide, &movie, WriteOptions::ALL);
    assert!(text.chars().count() <= 24);
    assert!(text.ends_with("..."));
    assert!(text.starts_with("Casablanca"));
}

// ========== CACHING TESTS ==========

#[test]
fn test_cached_description_is_stable() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();

    let first = short_text(&mut guide, &movie, WriteOptions::SHORT);
    let second = short_text(&mut guide, &movie, WriteOptions::SHORT);
    assert_eq!(first, second);

    // A different facet set is rendered afresh
    let other = short_text(&mut guide, &movie, WriteOptions::CATEGORY);
    assert_eq!(other, "Casablanca [PG] (Repeat)\nCategories: Drama, Romance");
}

#[test]
fn test_new_showing_on_other_channel_refreshes_description() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();

    let before = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(!before.contains("Other showings"));

    guide
        .insert(create_programme("sbs.au", "CASABLANCA", at(22, 0)))
        .unwrap();

    let after = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(after.ends_with("Other showings: Sat 12 Mar 22:00 (SBS)"));
}

#[test]
fn test_field_change_refreshes_description() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    let before = short_text(&mut guide, &movie, WriteOptions::STAR_RATING);
    assert!(before.contains("Stars: 4/4"));

    guide.modify(&movie, |programme| programme.set_star_rating("3/4"));
    let after = short_text(&mut guide, &movie, WriteOptions::STAR_RATING);
    assert!(after.contains("Stars: 3/4"));
}

#[test]
fn test_retitle_elsewhere_refreshes_description() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    let repeat = guide
        .insert(create_programme("sbs.au", "Casablanca", at(23, 0)))
        .unwrap();

    let before = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(before.contains("Sat 12 Mar 23:00 (SBS)"));

    guide.modify(&repeat, |programme| programme.set_title("Key Largo"));
    let after = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(!after.contains("Other showings"));

    guide.remove(&repeat);
    assert!(guide.other_showings(&movie).is_empty());
}

#[test]
fn test_display_change_refreshes_description() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    guide
        .insert(create_programme("sbs.au", "Casablanca", at(23, 0)))
        .unwrap();
    short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);

    guide.set_display(DisplayConfig {
        time_format: "%H:%M".to_string(),
        ..DisplayConfig::default()
    });
    let text = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(text.ends_with("Other showings: 23:00 (SBS)"));
}

#[test]
fn test_readding_channel_keeps_descriptions_fresh() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    guide
        .insert(create_programme("sbs.au", "Casablanca", at(12, 0)))
        .unwrap();
    let before = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(before.ends_with("Other showings: Sat 12 Mar 12:00 (SBS)"));

    // Same info again: nothing to refresh, insert still goes through the guide
    guide.add_channel(sbs());
    guide
        .insert(create_programme("sbs.au", "Casablanca", at(14, 0)))
        .unwrap();

    let after = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert_eq!(guide.other_showings(&movie).len(), 2);
    assert!(after.contains("14:00"));
}

#[test]
fn test_channel_rename_refreshes_other_channels() {
    let mut guide = create_guide();
    guide.add_channel(ChannelInfo::new(ChannelId::new("sbs.au"), "Old Name"));
    let movie = guide.insert(create_movie()).unwrap();
    guide
        .insert(create_programme("sbs.au", "Casablanca", at(12, 0)))
        .unwrap();
    let before = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(before.contains("(Old Name)"));

    guide.add_channel(ChannelInfo::new(ChannelId::new("sbs.au"), "New Name"));
    let after = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(after.ends_with("Other showings: Sat 12 Mar 12:00 (New Name)"));
}

#[test]
fn test_clear_channel_refreshes_other_channels() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    guide
        .insert(create_programme("sbs.au", "Casablanca", at(12, 0)))
        .unwrap();
    let before = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(before.contains("Other showings"));

    assert_eq!(guide.clear_channel(&ChannelId::new("sbs.au")), 1);
    let after = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(!after.contains("Other showings"));
}

// ========== OTHER SHOWINGS TESTS ==========

#[test]
fn test_other_showings_sorted_deduped_and_exclude_self() {
    let movie = create_movie();
    let index = FixedShowings(vec![
        Showing::new(&sbs(), at(22, 0)),
        Showing::new(&abc(), at(20, 30)),
        Showing::new(&sbs(), at(22, 0)),
        Showing::new(&abc(), at(18, 0)),
        Showing::new(&sbs(), at(18, 0)),
    ]);

    let showings = format_other_showings(&movie, &index);
    let listed: Vec<(&str, DateTime<Utc>)> = showings
        .iter()
        .map(|s| (s.channel_name.as_str(), s.start))
        .collect();
    assert_eq!(
        listed,
        vec![("ABC1", at(18, 0)), ("SBS", at(18, 0)), ("SBS", at(22, 0))]
    );
}

#[test]
fn test_render_showings_limit() {
    let showings = vec![
        Showing::new(&abc(), at(18, 0)),
        Showing::new(&sbs(), at(19, 0)),
        Showing::new(&sbs(), at(22, 0)),
    ];
    let config = DisplayConfig::default();

    assert_eq!(
        render_showings(&showings, &config, 1),
        "Sat 12 Mar 18:00 (ABC1), and 2 more"
    );
    assert_eq!(
        render_showings(&showings, &config, 0),
        "Sat 12 Mar 18:00 (ABC1), Sat 12 Mar 19:00 (SBS), Sat 12 Mar 22:00 (SBS)"
    );
}

#[test]
fn test_short_description_with_custom_index() {
    let mut timeline = ChannelTimeline::new(abc());
    let key = timeline.insert(create_movie()).unwrap();
    let index = FixedShowings(vec![
        Showing::new(&sbs(), at(22, 0)),
        Showing::new(&sbs(), at(22, 0)),
    ]);
    let config = DisplayConfig::default();
    let context = DescriptionContext {
        timeline: &timeline,
        index: &index,
        config: &config,
    };

    let programme = timeline.get(key).unwrap();
    let text = short_description(programme, &context, WriteOptions::OTHER_SHOWINGS);
    assert!(text.ends_with("Other showings: Sat 12 Mar 22:00 (SBS)"));
}

// ========== CONTINUATION TESTS ==========

#[test]
fn test_continuation_of_split_showing() {
    let mut guide = create_guide();
    let part_one = guide
        .insert(create_programme("abc.au", "Cricket", at(10, 0)))
        .unwrap();
    let part_two = guide
        .insert(create_programme("abc.au", "Cricket", at(11, 0)))
        .unwrap();
    // Gap before the evening session
    let evening = guide
        .insert(create_programme("abc.au", "Cricket", at(14, 0)))
        .unwrap();

    let timeline = guide.channel(&ChannelId::new("abc.au")).unwrap();
    assert!(!is_continuation(guide.get(&part_one).unwrap(), timeline));
    assert!(is_continuation(guide.get(&part_two).unwrap(), timeline));
    assert!(!is_continuation(guide.get(&evening).unwrap(), timeline));

    let text = short_text(&mut guide, &part_two, WriteOptions::CONTINUED);
    assert_eq!(text, "Cricket (continued)");
    let text = short_text(&mut guide, &part_one, WriteOptions::CONTINUED);
    assert_eq!(text, "Cricket");
}

#[test]
fn test_continuation_follows_removal_of_first_part() {
    let mut guide = create_guide();
    let part_one = guide
        .insert(create_programme("abc.au", "Cricket", at(10, 0)))
        .unwrap();
    let part_two = guide
        .insert(create_programme("abc.au", "Cricket", at(11, 0)))
        .unwrap();

    assert_eq!(
        short_text(&mut guide, &part_two, WriteOptions::CONTINUED),
        "Cricket (continued)"
    );
    guide.remove(&part_one);
    assert_eq!(
        short_text(&mut guide, &part_two, WriteOptions::CONTINUED),
        "Cricket"
    );
}

// ========== LONG DESCRIPTION TESTS ==========

#[test]
fn test_long_description_lists_everything() {
    let mut guide = Guide::new(DisplayConfig {
        max_other_showings: 1,
        ..DisplayConfig::default()
    });
    guide.add_channel(abc());
    guide.add_channel(sbs());
    let mut movie = create_movie();
    movie.set_country("USA");
    movie.set_movie(true);
    let movie = guide.insert(movie).unwrap();
    for hour in [21, 22, 23] {
        guide
            .insert(create_programme("sbs.au", "Casablanca", at(hour, 0)))
            .unwrap();
    }

    let short = short_text(&mut guide, &movie, WriteOptions::OTHER_SHOWINGS);
    assert!(short.ends_with("Other showings: Sat 12 Mar 21:00 (SBS), and 2 more"));

    let long = guide.long_description(&movie).unwrap().to_string();
    assert!(long.starts_with("Casablanca (1942) [PG] (Repeat)\n"));
    assert!(long.contains("\n\nA nightclub owner in Morocco shelters an old flame.\n\n"));
    assert!(long.contains(
        "Starring: Humphrey Bogart, Ingrid Bergman, Paul Henreid, Claude Rains"
    ));
    assert!(long.contains("Writer: Julius Epstein"));
    assert!(long.contains("Country: USA"));
    assert!(long.contains("\nMovie\n"));
    assert!(long.ends_with(
        "Other showings:\n  Sat 12 Mar 21:00 (SBS)\n  Sat 12 Mar 22:00 (SBS)\n  Sat 12 Mar 23:00 (SBS)"
    ));
}

#[test]
fn test_long_description_of_missing_programme() {
    let mut guide = create_guide();
    let movie = guide.insert(create_movie()).unwrap();
    guide.remove(&movie);

    assert!(guide.long_description(&movie).is_none());
    assert!(guide.short_description(&movie, WriteOptions::SHORT).is_none());
}
