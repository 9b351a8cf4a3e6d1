//! # Assignments
//!
//! Who shares what.
//!
//! - [`AssignmentSet`] is the editable pair set the assign screen mutates
//!   (tap to toggle, remove a participant, drop an item).
//! - [`AssignmentIndex`] is the read-only item→people view the engine
//!   builds once per computation so lookups never rescan the pair list.
//!
//! ```text
//!  pairs:  (1,p1) (1,p2) (2,p2) (1,p1)
//!                    │
//!                    ▼  AssignmentIndex::build
//!  item → people:    1 → [p1, p2]     2 → [p2]
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Assignment;

// =============================================================================
// Assignment Set
// =============================================================================

/// An ordered set of `(item, person)` pairs.
///
/// ## Invariants
/// - No duplicate pairs
/// - Pairs keep their insertion order (first occurrence wins)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet {
    pairs: Vec<Assignment>,
}

impl AssignmentSet {
    pub fn new() -> Self {
        AssignmentSet { pairs: Vec::new() }
    }

    /// Builds a set from raw pairs, collapsing duplicates.
    pub fn from_pairs<I, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Assignment>,
    {
        let mut set = AssignmentSet::new();
        for pair in pairs {
            let pair = pair.into();
            set.assign(pair.item_id, pair.person_id);
        }
        set
    }

    /// Adds a pair. Returns `false` when it was already present.
    pub fn assign(&mut self, item_id: impl Into<String>, person_id: impl Into<String>) -> bool {
        let (item_id, person_id) = (item_id.into(), person_id.into());
        if self.is_assigned(&item_id, &person_id) {
            return false;
        }
        self.pairs.push(Assignment { item_id, person_id });
        true
    }

    /// Removes a pair. Returns `false` when it was not present.
    pub fn unassign(&mut self, item_id: &str, person_id: &str) -> bool {
        let before = self.pairs.len();
        self.pairs
            .retain(|a| !(a.item_id == item_id && a.person_id == person_id));
        self.pairs.len() != before
    }

    /// Flips a pair and returns whether the person now shares the item.
    pub fn toggle(&mut self, item_id: &str, person_id: &str) -> bool {
        if self.unassign(item_id, person_id) {
            false
        } else {
            self.assign(item_id, person_id)
        }
    }

    /// Drops every pair naming the person. Returns how many were removed.
    pub fn remove_person(&mut self, person_id: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|a| a.person_id != person_id);
        before - self.pairs.len()
    }

    /// Drops every pair naming the item. Returns how many were removed.
    pub fn remove_item(&mut self, item_id: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|a| a.item_id != item_id);
        before - self.pairs.len()
    }

    pub fn is_assigned(&self, item_id: &str, person_id: &str) -> bool {
        self.pairs
            .iter()
            .any(|a| a.item_id == item_id && a.person_id == person_id)
    }

    /// People sharing the item, in assignment order.
    pub fn assignees(&self, item_id: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|a| a.item_id == item_id)
            .map(|a| a.person_id.as_str())
            .collect()
    }

    /// Items the person shares, in assignment order.
    pub fn items_for(&self, person_id: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|a| a.person_id == person_id)
            .map(|a| a.item_id.as_str())
            .collect()
    }

    pub fn pairs(&self) -> &[Assignment] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<Assignment> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<A: Into<Assignment>> FromIterator<A> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        AssignmentSet::from_pairs(iter)
    }
}

// =============================================================================
// Assignment Index
// =============================================================================

/// Item→people lookup over a borrowed pair slice.
///
/// Duplicate pairs in the slice are indexed once.
#[derive(Debug, Default)]
pub struct AssignmentIndex<'a> {
    by_item: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> AssignmentIndex<'a> {
    pub fn build(assignments: &'a [Assignment]) -> Self {
        let mut index = AssignmentIndex::default();

        for assignment in assignments {
            let people = index.by_item.entry(assignment.item_id.as_str()).or_default();
            if !people.contains(&assignment.person_id.as_str()) {
                people.push(assignment.person_id.as_str());
            }
        }

        index
    }

    /// Distinct people sharing the item, in first-appearance order.
    pub fn assignees(&self, item_id: &str) -> &[&'a str] {
        self.by_item.get(item_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_is_idempotent() {
        let mut set = AssignmentSet::new();
        assert!(set.assign("1", "p1"));
        assert!(!set.assign("1", "p1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut set = AssignmentSet::new();
        assert!(set.toggle("1", "p1"));
        assert!(set.is_assigned("1", "p1"));
        assert!(!set.toggle("1", "p1"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_person_cascades() {
        let mut set: AssignmentSet = [("1", "p1"), ("1", "p2"), ("2", "p1"), ("3", "p2")]
            .into_iter()
            .collect();

        assert_eq!(set.remove_person("p1"), 2);
        assert_eq!(set.assignees("1"), vec!["p2"]);
        assert!(set.items_for("p1").is_empty());
        assert_eq!(set.remove_person("p1"), 0);
    }

    #[test]
    fn test_remove_item() {
        let mut set = AssignmentSet::from_pairs([("1", "p1"), ("1", "p2"), ("2", "p1")]);
        assert_eq!(set.remove_item("1"), 2);
        assert_eq!(set.pairs(), &[Assignment::new("2", "p1")]);
    }

    #[test]
    fn test_from_pairs_collapses_duplicates_keeping_order() {
        let set = AssignmentSet::from_pairs([("1", "p2"), ("1", "p1"), ("1", "p2")]);
        assert_eq!(set.assignees("1"), vec!["p2", "p1"]);
    }

    #[test]
    fn test_serializes_as_plain_pair_list() {
        let set = AssignmentSet::from_pairs([("1", "p1")]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"itemId":"1","personId":"p1"}]"#);
    }

    #[test]
    fn test_index_dedupes_and_orders() {
        let pairs = vec![
            Assignment::new("1", "p2"),
            Assignment::new("1", "p1"),
            Assignment::new("2", "p2"),
            Assignment::new("1", "p2"),
        ];
        let index = AssignmentIndex::build(&pairs);

        assert_eq!(index.assignees("1"), &["p2", "p1"]);
        assert_eq!(index.assignees("2"), &["p2"]);
        assert!(index.assignees("missing").is_empty());
    }
}
