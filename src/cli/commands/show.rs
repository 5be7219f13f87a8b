//! Show command implementation.

use crate::generators::description::WriteOptions;
use crate::models::channel::ChannelId;
use crate::Error;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::path::Path;

/// Print the description of the programme starting at `start` on `channel`.
pub fn show_programme(
    guide_file: Option<&Path>,
    channel: &str,
    start: DateTime<Utc>,
    long: bool,
    facets: &str,
) -> Result<()> {
    let mut guide = super::load_guide(guide_file)?;
    let channel = ChannelId::new(channel);

    let programme = guide
        .find(&channel, start)
        .ok_or_else(|| Error::ProgrammeNotFound(format!("{} at {}", channel, start)))?;

    let text = if long {
        guide.long_description(&programme).map(str::to_string)
    } else {
        let options: WriteOptions = facets.parse()?;
        guide
            .short_description(&programme, options)
            .map(str::to_string)
    }
    .unwrap_or_default();

    if let Some(entry) = guide.get(&programme) {
        let duration = entry.seconds_length() / 60;
        println!(
            "{} {} ({} min)",
            entry.start().format("%a %d %b %H:%M").to_string().bold(),
            channel.to_string().cyan(),
            duration
        );
    }
    println!("{}", text);

    Ok(())
}
