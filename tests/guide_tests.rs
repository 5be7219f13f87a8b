//! Integration tests for guide loading and multi-channel operations.

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use tempfile::TempDir;
use tvguide::core::guide::{Guide, ShowingsIndex};
use tvguide::models::channel::{ChannelId, ChannelInfo};
use tvguide::models::config::DisplayConfig;
use tvguide::models::programme::Programme;
use tvguide::Error;

// ========== TEST FIXTURES ==========

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 3, 12, hour, minute, 0).unwrap()
}

const SNAPSHOT: &str = r#"{
  "channels": [
    {"id": "abc.au", "name": "ABC1", "numbers": ["2", "21"]},
    {"id": "sbs.au", "name": "SBS"}
  ],
  "programmes": [
    {"channel": "abc.au", "start": "2011-03-12T19:00:00Z", "stop": "2011-03-12T19:30:00Z",
     "title": "Evening News", "categories": ["News"]},
    {"channel": "abc.au", "start": "2011-03-12T18:00:00Z", "stop": "2011-03-12T19:00:00Z",
     "title": "Gardening Australia", "credits": {"presenter": ["Costa Georgiadis"]}},
    {"channel": "sbs.au", "start": "2011-03-12T20:30:00Z", "stop": "2011-03-12T20:00:00Z",
     "title": "Broken Record"},
    {"channel": "nine.au", "start": "2011-03-12T19:00:00Z", "stop": "2011-03-12T20:00:00Z",
     "title": "Evening News", "categories": ["news", "Current Affairs"]}
  ]
}"#;

fn write_snapshot(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("guide.json");
    fs::write(&path, content).unwrap();
    path
}

fn load_fixture() -> Guide {
    let temp_dir = TempDir::new().unwrap();
    let path = write_snapshot(&temp_dir, SNAPSHOT);
    Guide::load_snapshot_file(&path, DisplayConfig::default()).unwrap()
}

// ========== LOADING TESTS ==========

#[test]
fn test_load_snapshot_file() {
    let guide = load_fixture();

    // The reversed record is skipped
    assert_eq!(guide.len(), 3);

    let abc = guide.channel(&ChannelId::new("abc.au")).unwrap();
    assert_eq!(abc.info().numbers, vec!["2", "21"]);
    let titles: Vec<&str> = abc.iter().map(|(_, p)| p.title()).collect();
    assert_eq!(titles, vec!["Gardening Australia", "Evening News"]);

    let gardening = abc.get(abc.first().unwrap()).unwrap();
    assert_eq!(gardening.presenters(), ["Costa Georgiadis".to_string()]);

    assert!(guide.channel(&ChannelId::new("sbs.au")).unwrap().is_empty());
}

#[test]
fn test_undeclared_channel_is_added() {
    let guide = load_fixture();
    let nine = guide.channel(&ChannelId::new("nine.au")).unwrap();
    assert_eq!(nine.info().display_name(), "nine.au");
    assert_eq!(nine.len(), 1);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");
    let result = Guide::load_snapshot_file(&path, DisplayConfig::default());
    assert!(matches!(result, Err(Error::InvalidGuideFile(_))));
}

#[test]
fn test_load_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_snapshot(&temp_dir, "{\"programmes\": 3}");
    let result = Guide::load_snapshot_file(&path, DisplayConfig::default());
    assert!(matches!(result, Err(Error::Json(_))));
}

// ========== MULTI-CHANNEL TESTS ==========

#[test]
fn test_showings_across_channels() {
    let guide = load_fixture();
    let mut showings = guide.showings("evening news");
    showings.sort_by(|a, b| a.channel.cmp(&b.channel));

    let channels: Vec<&str> = showings.iter().map(|s| s.channel_name.as_str()).collect();
    assert_eq!(channels, vec!["ABC1", "nine.au"]);

    let news = guide.find(&ChannelId::new("abc.au"), at(19, 0)).unwrap();
    let others = guide.other_showings(&news);
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].channel, ChannelId::new("nine.au"));
}

#[test]
fn test_insert_on_unknown_channel_fails() {
    let mut guide = Guide::new(DisplayConfig::default());
    let programme = Programme::new(ChannelId::new("abc.au"), at(10, 0), at(11, 0)).unwrap();
    let result = guide.insert(programme);
    assert!(matches!(result, Err(Error::UnknownChannel(_))));
}

#[test]
fn test_add_channel_updates_info() {
    let mut guide = load_fixture();
    guide.add_channel(ChannelInfo::new(ChannelId::new("nine.au"), "Nine"));

    let nine = guide.channel(&ChannelId::new("nine.au")).unwrap();
    assert_eq!(nine.info().display_name(), "Nine");
    assert_eq!(nine.len(), 1);
}

#[test]
fn test_clear_channel() {
    let mut guide = load_fixture();
    assert_eq!(guide.clear_channel(&ChannelId::new("abc.au")), 2);
    assert_eq!(guide.len(), 1);
    assert!(guide.channel(&ChannelId::new("abc.au")).unwrap().is_empty());
    assert_eq!(guide.clear_channel(&ChannelId::new("missing.au")), 0);
}

#[test]
fn test_evict_before_across_channels() {
    let mut guide = load_fixture();
    let evicted = guide.evict_before(at(19, 0));
    assert_eq!(evicted, 1);
    assert_eq!(guide.len(), 2);
    assert!(guide.find(&ChannelId::new("abc.au"), at(18, 0)).is_none());
}

#[test]
fn test_filter_sets_are_distinct() {
    let guide = load_fixture();
    let categories: Vec<String> = guide.categories().into_iter().collect();
    // Case differs, so both spellings are kept
    assert_eq!(categories, vec!["Current Affairs", "News", "news"]);

    let credits: Vec<String> = guide.credits().into_iter().collect();
    assert_eq!(credits, vec!["Costa Georgiadis"]);
}
