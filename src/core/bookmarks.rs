//! Binding between programmes and the bookmark rules that match them.
//!
//! Rules live in an external rule engine reached through [`BookmarkClassifier`].
//! A programme stores at most one binding. It is replaced as a whole on every
//! refresh and cleared when the rule goes away or a matchable field changes.

use crate::core::guide::{Guide, ProgrammeRef};
use crate::core::timeline::ChannelTimeline;
use crate::models::bookmark::{BookmarkId, BookmarkMatch, Classification, Color, MatchStrength};
use crate::models::programme::Programme;

/// Capability of the bookmark rule engine.
pub trait BookmarkClassifier {
    /// Best rule for the programme, or `None` when no rule matches.
    fn classify(&self, programme: &Programme) -> Option<Classification>;
}

/// Rule engine with no rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBookmarks;

impl BookmarkClassifier for NoBookmarks {
    fn classify(&self, _programme: &Programme) -> Option<Classification> {
        None
    }
}

impl Programme {
    /// Re-run classification and replace the binding.
    pub fn refresh_bookmark(&mut self, classifier: &dyn BookmarkClassifier) -> MatchStrength {
        let binding = BookmarkMatch::from_classification(classifier.classify(self));
        if binding != *self.bookmark() {
            tracing::debug!(
                "Bookmark for '{}' at {}: {} -> {}",
                self.title(),
                self.start(),
                self.bookmark().strength(),
                binding.strength()
            );
        }
        self.set_bookmark(binding);
        binding.strength()
    }

    /// Stored match strength.
    pub fn match_strength(&self) -> MatchStrength {
        self.bookmark().strength()
    }

    /// Match strength to present to the user. Suppressed entries never match.
    pub fn display_match(&self) -> MatchStrength {
        if self.is_suppressed() {
            MatchStrength::None
        } else {
            self.match_strength()
        }
    }

    /// Highlight colour of the matched rule, when the match is displayed.
    pub fn color(&self) -> Option<Color> {
        if self.display_match().is_match() {
            self.bookmark().color()
        } else {
            None
        }
    }

    fn clear_bookmark_for(&mut self, rule: BookmarkId) -> bool {
        if self.bookmark().rule() == Some(rule) {
            self.set_bookmark(BookmarkMatch::Unmatched);
            true
        } else {
            false
        }
    }
}

impl ChannelTimeline {
    /// Re-classify every programme. Returns how many now match.
    pub fn refresh_bookmarks(&mut self, classifier: &dyn BookmarkClassifier) -> usize {
        let keys: Vec<_> = self.keys().collect();
        let mut matched = 0;
        for key in keys {
            if let Some(programme) = self.get_mut(key) {
                if programme.refresh_bookmark(classifier).is_match() {
                    matched += 1;
                }
            }
        }
        matched
    }

    /// Clear bindings to a deleted rule. Returns how many were cleared.
    pub fn bookmark_removed(&mut self, rule: BookmarkId) -> usize {
        let keys: Vec<_> = self.keys().collect();
        let mut cleared = 0;
        for key in keys {
            if let Some(programme) = self.get_mut(key) {
                if programme.clear_bookmark_for(rule) {
                    cleared += 1;
                }
            }
        }
        cleared
    }
}

impl Guide {
    /// Re-classify one programme.
    pub fn refresh_bookmark(
        &mut self,
        programme: &ProgrammeRef,
        classifier: &dyn BookmarkClassifier,
    ) -> Option<MatchStrength> {
        Some(self.get_mut(programme)?.refresh_bookmark(classifier))
    }

    /// Re-classify everything, e.g. after the rule set changed.
    pub fn refresh_bookmarks(&mut self, classifier: &dyn BookmarkClassifier) -> usize {
        let matched: usize = self
            .channels_mut()
            .map(|timeline| timeline.refresh_bookmarks(classifier))
            .sum();
        tracing::info!("Bookmark refresh: {} programmes matched", matched);
        matched
    }

    /// Clear bindings to a deleted rule across channels.
    pub fn bookmark_removed(&mut self, rule: BookmarkId) -> usize {
        let cleared: usize = self
            .channels_mut()
            .map(|timeline| timeline.bookmark_removed(rule))
            .sum();
        tracing::debug!("Bookmark {} removed: {} bindings cleared", rule, cleared);
        cleared
    }

    /// Hide or un-hide a programme.
    pub fn set_suppressed(&mut self, programme: &ProgrammeRef, suppressed: bool) -> bool {
        match self.get_mut(programme) {
            Some(entry) => {
                entry.set_suppressed(suppressed);
                true
            }
            None => false,
        }
    }
}
