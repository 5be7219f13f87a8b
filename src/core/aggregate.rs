//! Category and credit aggregation for building filter lists.

use crate::core::guide::Guide;
use crate::models::programme::Programme;
use std::collections::BTreeSet;

impl Programme {
    /// Add every category of this programme to `set`.
    pub fn update_category_set<S: Extend<String>>(&self, set: &mut S) {
        set.extend(self.categories().iter().cloned());
    }

    /// Add every director, actor and presenter of this programme to `set`.
    pub fn update_credit_set<S: Extend<String>>(&self, set: &mut S) {
        set.extend(
            self.directors()
                .iter()
                .chain(self.actors())
                .chain(self.presenters())
                .cloned(),
        );
    }
}

impl Guide {
    /// Distinct categories across the guide.
    pub fn categories(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        for (_, programme) in self.iter() {
            programme.update_category_set(&mut set);
        }
        set
    }

    /// Distinct director, actor and presenter names across the guide.
    pub fn credits(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        for (_, programme) in self.iter() {
            programme.update_credit_set(&mut set);
        }
        set
    }
}
