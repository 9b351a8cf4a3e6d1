//! # Per-Person Aggregation
//!
//! Rolls resolved shares up into one summary per participant and hands out
//! tax and service in proportion to each person's share of the subtotal.
//!
//! ## Proportional Surcharges
//! ```text
//! subtotal 100000, tax 10000, service 5000
//!
//!   person   subtotal   proportion   tax     service   total
//!   ──────   ────────   ──────────   ─────   ───────   ──────
//!   Ayu        60000       0.6        6000     3000     69000
//!   Budi       40000       0.4        4000     2000     46000
//!                                                      ──────
//!                                                      115000 = grand total
//! ```
//!
//! Surcharges are split with [`Money::allocate`] over the person subtotals
//! plus one extra bucket for the part of the subtotal nobody shares. Each
//! person gets `floor(amount × proportion)` plus at most one minor unit, and
//! the buckets always add back up to the full tax and service amounts.
//! Tied remainders go to the lowest person id; the unshared bucket is last.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::shares::ResolvedShare;
use crate::types::{Item, Person};

/// One line in a person's breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemShare {
    pub item_id: String,
    pub item_name: String,
    pub item_unit_price: Money,
    pub quantity: i64,
    pub shared_with_count: usize,
    pub share: Money,
}

/// Everything one participant owes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub person_id: String,
    pub person_name: String,
    /// Shared items, in receipt order.
    pub items: Vec<ItemShare>,
    pub subtotal: Money,
    pub tax: Money,
    pub service: Money,
    pub total: Money,
    /// `subtotal / bill subtotal`, 0 when the bill subtotal is 0. Display only.
    pub proportion: f64,
}

/// Builds one summary per person, in the order of `people`.
///
/// Shares naming a person or item that is not in the lists are skipped;
/// their value ends up unattributed.
pub fn aggregate(
    people: &[Person],
    shares: &[ResolvedShare<'_>],
    items: &[Item],
    tax_amount: Money,
    service_amount: Money,
    subtotal: Money,
) -> Vec<PersonSummary> {
    let items_by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();

    let mut position: HashMap<&str, usize> = HashMap::with_capacity(people.len());
    for (index, person) in people.iter().enumerate() {
        position.entry(person.id.as_str()).or_insert(index);
    }

    let mut summaries: Vec<PersonSummary> = people
        .iter()
        .map(|p| PersonSummary {
            person_id: p.id.clone(),
            person_name: p.name.clone(),
            items: Vec::new(),
            subtotal: Money::zero(),
            tax: Money::zero(),
            service: Money::zero(),
            total: Money::zero(),
            proportion: 0.0,
        })
        .collect();

    for share in shares {
        let (Some(&index), Some(item)) = (position.get(share.person_id), items_by_id.get(share.item_id)) else {
            debug!(item_id = %share.item_id, person_id = %share.person_id, "Skipping share with no matching person or item");
            continue;
        };

        let summary = &mut summaries[index];
        summary.subtotal += share.share;
        summary.items.push(ItemShare {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            item_unit_price: item.unit_price,
            quantity: item.quantity,
            shared_with_count: share.shared_with,
            share: share.share,
        });
    }

    distribute_surcharges(&mut summaries, tax_amount, service_amount, subtotal);
    summaries
}

fn distribute_surcharges(summaries: &mut [PersonSummary], tax_amount: Money, service_amount: Money, subtotal: Money) {
    let mut order: Vec<usize> = (0..summaries.len()).collect();
    order.sort_by(|a, b| summaries[*a].person_id.cmp(&summaries[*b].person_id));

    let assigned: Money = summaries.iter().map(|s| s.subtotal).sum();
    let unshared = (subtotal - assigned).minor().max(0);

    let mut weights: Vec<i64> = order.iter().map(|i| summaries[*i].subtotal.minor()).collect();
    weights.push(unshared);

    let tax = tax_amount.allocate(&weights);
    let service = service_amount.allocate(&weights);

    for (slot, index) in order.into_iter().enumerate() {
        let summary = &mut summaries[index];
        summary.tax = tax[slot];
        summary.service = service[slot];
        summary.total = summary.subtotal + summary.tax + summary.service;
        summary.proportion = if subtotal.is_positive() {
            summary.subtotal.minor() as f64 / subtotal.minor() as f64
        } else {
            0.0
        };
    }
}
