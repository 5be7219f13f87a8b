//! Search command implementation.

use crate::core::guide::{Guide, ProgrammeRef};
use crate::core::search::SearchType;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute search command.
pub fn execute_search(
    guide_file: Option<&Path>,
    queries: &[String],
    search_type: SearchType,
    include_hidden: bool,
    format: &str,
) -> Result<()> {
    let guide = super::load_guide(guide_file)?;

    let results: Vec<ProgrammeRef> = guide
        .search(queries, search_type)
        .into_iter()
        .filter(|r| {
            include_hidden || guide.get(r).map(|p| !p.is_suppressed()).unwrap_or(false)
        })
        .collect();

    match format {
        "json" => print_json(&guide, &results)?,
        "simple" => print_simple(&guide, &results),
        _ => print_table(&guide, &results),
    }

    Ok(())
}

/// Print results as JSON.
fn print_json(guide: &Guide, results: &[ProgrammeRef]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct ProgrammeJson {
        channel: String,
        start: chrono::DateTime<chrono::Utc>,
        stop: chrono::DateTime<chrono::Utc>,
        title: String,
        sub_title: Option<String>,
        year: Option<u16>,
        season: Option<u32>,
        episode: Option<u32>,
        categories: Vec<String>,
    }

    let output: Vec<ProgrammeJson> = results
        .iter()
        .filter_map(|r| guide.get(r))
        .map(|p| ProgrammeJson {
            channel: p.channel().to_string(),
            start: p.start(),
            stop: p.stop(),
            title: p.title().to_string(),
            sub_title: p.sub_title().map(str::to_string),
            year: p.year(),
            season: p.season(),
            episode: p.episode(),
            categories: p.categories().to_vec(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results in simple format.
fn print_simple(guide: &Guide, results: &[ProgrammeRef]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for programme in results.iter().filter_map(|r| guide.get(r)) {
        println!(
            "[{}] {} {}{}",
            programme.channel(),
            programme.start().format("%Y-%m-%d %H:%M"),
            programme.title(),
            programme
                .sub_title()
                .map(|s| format!(" - {}", s))
                .unwrap_or_default()
        );
    }
}

/// Print results as table.
fn print_table(guide: &Guide, results: &[ProgrammeRef]) {
    if results.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} results:", results.len()).bold().cyan()
    );
    println!();
    println!(
        " {:>4} | {:<12} | {:<16} | {:<40} | {}",
        "#", "Channel", "Start", "Title", "Match"
    );
    println!("{}", "-".repeat(90));

    for (i, programme) in results.iter().filter_map(|r| guide.get(r)).enumerate() {
        let title = if programme.title().chars().count() > 38 {
            format!("{}...", programme.title().chars().take(35).collect::<String>())
        } else {
            programme.title().to_string()
        };

        let strength = programme.display_match();
        let match_col = if strength.is_match() {
            strength.to_string().green().to_string()
        } else {
            "-".to_string()
        };

        println!(
            " {:>4} | {:<12} | {:<16} | {:<40} | {}",
            i + 1,
            guide
                .channel(programme.channel())
                .map(|c| c.info().display_name().to_string())
                .unwrap_or_else(|| programme.channel().to_string()),
            programme.start().format("%a %d %b %H:%M"),
            title,
            match_col
        );
    }
    println!();
}
