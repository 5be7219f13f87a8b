//! Command line argument definitions.

use crate::core::search::SearchType;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// TV Guide - Search and describe programme guide data
#[derive(Parser, Debug)]
#[command(name = "tvguide")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Guide snapshot file (default: from config)
    #[arg(short, long, global = true, value_name = "GUIDE_FILE")]
    pub guide: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search programmes; a programme matches if any query matches
    Search {
        /// Query strings
        #[arg(value_name = "QUERY", required = true)]
        queries: Vec<String>,

        /// Fields to search
        #[arg(short = 'i', long = "in", value_enum, default_value = "all")]
        field: SearchField,

        /// Include programmes hidden by the user
        #[arg(long)]
        include_hidden: bool,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Describe one programme
    Show {
        /// Channel id
        #[arg(value_name = "CHANNEL")]
        channel: String,

        /// Start time (RFC 3339, e.g. 2011-03-12T20:30:00Z)
        #[arg(value_name = "START")]
        start: DateTime<Utc>,

        /// Print the long description
        #[arg(short, long)]
        long: bool,

        /// Facets for the short description, e.g. "actor,category,showings"
        #[arg(long, default_value = "short")]
        facets: String,
    },

    /// List a channel's programmes in order
    Schedule {
        /// Channel id
        #[arg(value_name = "CHANNEL")]
        channel: String,

        /// Skip programmes that finished before this time
        #[arg(long)]
        from: Option<DateTime<Utc>>,
    },

    /// List distinct categories (and credits) for filter menus
    Filters {
        /// Also list director, actor and presenter names
        #[arg(long)]
        credits: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SearchField {
    Title,
    Episode,
    Description,
    Credits,
    Categories,
    All,
}

impl From<SearchField> for SearchType {
    fn from(field: SearchField) -> Self {
        match field {
            SearchField::Title => SearchType::Title,
            SearchField::Episode => SearchType::EpisodeName,
            SearchField::Description => SearchType::Description,
            SearchField::Credits => SearchType::Credits,
            SearchField::Categories => SearchType::Categories,
            SearchField::All => SearchType::All,
        }
    }
}
