//! Selection model - the set of selected element ids

use crate::{ElementId, Template};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of selected element ids.
///
/// Owners keep it a subset of the edited template's ids; see
/// [`ElementSelection::retain_existing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementSelection(BTreeSet<ElementId>);

impl ElementSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection holding exactly one element
    pub fn single(id: ElementId) -> Self {
        Self(BTreeSet::from([id]))
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.0.contains(id)
    }

    /// Add an id; returns false if it was already selected
    pub fn insert(&mut self, id: ElementId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        self.0.remove(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.0.iter()
    }

    /// Selected ids as a vector (sorted)
    pub fn to_vec(&self) -> Vec<ElementId> {
        self.0.iter().cloned().collect()
    }

    /// Drop ids that no longer exist in `template`
    pub fn retain_existing(&mut self, template: &Template) {
        self.0.retain(|id| template.contains(id));
    }

    pub fn is_subset_of(&self, template: &Template) -> bool {
        self.0.iter().all(|id| template.contains(id))
    }
}

impl FromIterator<ElementId> for ElementSelection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    #[test]
    fn test_retain_existing() {
        let mut t = Template::new("t");
        let a = t.add(ElementKind::Text, None);
        let mut sel: ElementSelection = [a.clone(), ElementId::from("gone")].into_iter().collect();
        assert!(!sel.is_subset_of(&t));
        sel.retain_existing(&t);
        assert_eq!(sel, ElementSelection::single(a));
        assert!(sel.is_subset_of(&t));
    }
}
