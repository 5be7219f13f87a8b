//! Free-text search over programme metadata.
//!
//! Matching is a case-insensitive substring test against each field of the
//! selected field-set, stopping at the first hit. An empty query matches
//! every programme; an empty list of alternative queries matches none.

use crate::core::guide::{Guide, ProgrammeRef};
use crate::models::programme::Programme;
use crate::utils::text::contains_lowered;
use serde::{Deserialize, Serialize};

/// Field-set a query is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Title,
    /// Sub-title and episode number.
    EpisodeName,
    Description,
    /// Directors, actors, presenters and other credits.
    Credits,
    Categories,
    All,
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchType::Title => write!(f, "title"),
            SearchType::EpisodeName => write!(f, "episode"),
            SearchType::Description => write!(f, "description"),
            SearchType::Credits => write!(f, "credits"),
            SearchType::Categories => write!(f, "categories"),
            SearchType::All => write!(f, "all"),
        }
    }
}

impl Programme {
    /// Whether `query` occurs in any field of the selected field-set.
    pub fn contains_search_string(&self, query: &str, search_type: SearchType) -> bool {
        self.matches_lowered(&query.to_lowercase(), search_type)
    }

    /// Whether any of the alternative queries matches.
    pub fn contains_any_search_string<S: AsRef<str>>(
        &self,
        queries: &[S],
        search_type: SearchType,
    ) -> bool {
        queries
            .iter()
            .any(|query| self.contains_search_string(query.as_ref(), search_type))
    }

    fn matches_lowered(&self, query: &str, search_type: SearchType) -> bool {
        if query.is_empty() {
            return true;
        }

        match search_type {
            SearchType::Title => self.index_title().contains(query),
            SearchType::EpisodeName => {
                self.sub_title().is_some_and(|s| contains_lowered(s, query))
                    || self
                        .episode_number()
                        .is_some_and(|s| contains_lowered(s, query))
            }
            SearchType::Description => self
                .description()
                .is_some_and(|s| contains_lowered(s, query)),
            SearchType::Credits => self
                .directors()
                .iter()
                .chain(self.actors())
                .chain(self.presenters())
                .chain(self.other_credits().values().flatten())
                .any(|name| contains_lowered(name, query)),
            SearchType::Categories => self
                .categories()
                .iter()
                .any(|category| contains_lowered(category, query)),
            SearchType::All => [
                SearchType::Title,
                SearchType::EpisodeName,
                SearchType::Description,
                SearchType::Credits,
                SearchType::Categories,
            ]
            .into_iter()
            .any(|field_set| self.matches_lowered(query, field_set)),
        }
    }
}

impl Guide {
    /// Programmes matching any of the queries, by channel then start time.
    pub fn search<S: AsRef<str>>(&self, queries: &[S], search_type: SearchType) -> Vec<ProgrammeRef> {
        let results: Vec<ProgrammeRef> = self
            .iter()
            .filter(|(_, programme)| programme.contains_any_search_string(queries, search_type))
            .map(|(programme_ref, _)| programme_ref)
            .collect();

        tracing::debug!(
            "Search {} for {} queries: {} matches",
            search_type,
            queries.len(),
            results.len()
        );
        results
    }
}
