//! # Cost-Sharing Resolution
//!
//! Turns the assignment pairs into one monetary share per `(item, person)`.
//!
//! ## Equal Split
//! ```text
//! Item: Sate ×2 @ 30000 = 60000, shared by [p3, p1, p2]
//!      │
//!      ▼
//! 60000.split_even(3) = [20000, 20000, 20000]
//!      │
//!      ▼
//! p1 → 20000   p2 → 20000   p3 → 20000
//!
//! Item: Kopi = 100, shared by [p2, p1, p3]
//!      │
//!      ▼
//! 100.split_even(3) = [34, 33, 33]   (ordered by person id)
//!      │
//!      ▼
//! p1 → 34   p2 → 33   p3 → 33
//! ```
//!
//! The extra minor units of an indivisible line go to the lowest person
//! ids, so the result does not depend on the order of the people list or
//! of the assignment pairs.

use tracing::warn;

use crate::assignment::AssignmentIndex;
use crate::money::Money;
use crate::types::{Assignment, Item};

/// One person's share of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedShare<'a> {
    pub item_id: &'a str,
    pub person_id: &'a str,
    /// Number of distinct people sharing the item.
    pub shared_with: usize,
    pub share: Money,
}

/// Output of [`resolve_shares`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareResolution<'a> {
    /// Item order, then ascending person id within an item.
    pub shares: Vec<ResolvedShare<'a>>,
    /// Items with no assignee, in item order.
    pub unassigned_item_ids: Vec<String>,
}

/// Resolves every assignment into a share.
///
/// Items with no assignee produce no share and are reported in
/// `unassigned_item_ids`. Assignments naming an item that is not in
/// `items` are ignored. Duplicate pairs count once.
pub fn resolve_shares<'a>(items: &'a [Item], assignments: &'a [Assignment]) -> ShareResolution<'a> {
    let index = AssignmentIndex::build(assignments);
    let mut resolution = ShareResolution::default();

    for item in items {
        let assignees = index.assignees(&item.id);
        if assignees.is_empty() {
            warn!(item_id = %item.id, item_name = %item.name, "Item is not assigned to anyone");
            resolution.unassigned_item_ids.push(item.id.clone());
            continue;
        }

        let mut by_id = assignees.to_vec();
        by_id.sort_unstable();

        let pieces = item.line_total().split_even(by_id.len());
        resolution
            .shares
            .extend(by_id.into_iter().zip(pieces).map(|(person_id, share)| ResolvedShare {
                item_id: item.id.as_str(),
                person_id,
                shared_with: assignees.len(),
                share,
            }));
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, qty: i64) -> Item {
        Item::new(id, format!("Item {id}"), Money::from_minor(price), qty)
    }

    fn shares_of<'a>(resolution: &ShareResolution<'a>, item_id: &str) -> Vec<(&'a str, i64)> {
        resolution
            .shares
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| (s.person_id, s.share.minor()))
            .collect()
    }

    #[test]
    fn test_shared_by_three() {
        let items = [item("1", 30_000, 2)];
        let assignments = vec![
            Assignment::new("1", "p1"),
            Assignment::new("1", "p2"),
            Assignment::new("1", "p3"),
        ];
        let resolution = resolve_shares(&items, &assignments);

        assert_eq!(
            shares_of(&resolution, "1"),
            vec![("p1", 20_000), ("p2", 20_000), ("p3", 20_000)]
        );
        assert!(resolution.shares.iter().all(|s| s.shared_with == 3));
        assert!(resolution.unassigned_item_ids.is_empty());
    }

    #[test]
    fn test_remainder_goes_to_lowest_ids_regardless_of_order() {
        let items = [item("1", 100, 1)];
        let forward = vec![Assignment::new("1", "a"), Assignment::new("1", "b"), Assignment::new("1", "c")];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();

        let one = resolve_shares(&items, &forward);
        let two = resolve_shares(&items, &backward);

        assert_eq!(shares_of(&one, "1"), vec![("a", 34), ("b", 33), ("c", 33)]);
        assert_eq!(one, two);
    }

    #[test]
    fn test_unassigned_and_unknown_items() {
        let items = [item("1", 5000, 1), item("2", 7000, 1)];
        let assignments = vec![Assignment::new("2", "p1"), Assignment::new("ghost", "p1")];
        let resolution = resolve_shares(&items, &assignments);

        assert_eq!(resolution.unassigned_item_ids, vec!["1".to_string()]);
        assert_eq!(shares_of(&resolution, "2"), vec![("p1", 7000)]);
        assert_eq!(resolution.shares.len(), 1);
    }

    #[test]
    fn test_duplicate_pairs_count_once() {
        let items = [item("1", 9000, 1)];
        let assignments = vec![
            Assignment::new("1", "p1"),
            Assignment::new("1", "p1"),
            Assignment::new("1", "p2"),
        ];
        let resolution = resolve_shares(&items, &assignments);

        assert_eq!(shares_of(&resolution, "1"), vec![("p1", 4500), ("p2", 4500)]);
        assert!(resolution.shares.iter().all(|s| s.shared_with == 2));
    }

    #[test]
    fn test_shares_reconstruct_line_total() {
        let items = [item("1", 3333, 7)];
        let assignments: Vec<_> = ["p1", "p2", "p3", "p4", "p5", "p6"]
            .iter()
            .map(|p| Assignment::new("1", *p))
            .collect();
        let resolution = resolve_shares(&items, &assignments);

        let sum: Money = resolution.shares.iter().map(|s| s.share).sum();
        assert_eq!(sum, items[0].line_total());
    }
}
