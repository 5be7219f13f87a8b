//! Schedule command implementation.

use crate::generators::description::is_continuation;
use crate::models::channel::ChannelId;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::path::Path;

/// Print a channel's programmes in start order, flagging clashes.
pub fn print_schedule(
    guide_file: Option<&Path>,
    channel: &str,
    from: Option<DateTime<Utc>>,
) -> Result<()> {
    let guide = super::load_guide(guide_file)?;
    let channel = ChannelId::new(channel);
    let timeline = guide
        .channel(&channel)
        .with_context(|| format!("Unknown channel: {}", channel))?;

    println!(
        "{}",
        format!("{} ({} programmes)", timeline.info().display_name(), timeline.len())
            .bold()
            .cyan()
    );
    println!("{}", "-".repeat(80));

    for (_, programme) in timeline.iter() {
        if from.is_some_and(|from| programme.stop() <= from) {
            continue;
        }

        let mut notes = Vec::new();
        let clashes = programme
            .prev()
            .and_then(|key| timeline.get(key))
            .is_some_and(|prev| prev.overlaps_with(programme));
        if clashes {
            notes.push("overlaps previous".yellow().to_string());
        }
        if is_continuation(programme, timeline) {
            notes.push("continued".dimmed().to_string());
        }
        if programme.is_suppressed() {
            notes.push("hidden".dimmed().to_string());
        }

        println!(
            " {} {:>4} min  {}{}",
            programme.start().format("%a %H:%M"),
            programme.seconds_length() / 60,
            programme.title(),
            if notes.is_empty() {
                String::new()
            } else {
                format!("  [{}]", notes.join(", "))
            }
        );
    }

    Ok(())
}
