//! # Split Engine
//!
//! The single entry point that chains the three stages.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      split_bill()                                       │
//! │                                                                         │
//! │  items, charges ───────► compute_totals() ──► BillTotals               │
//! │                                                  │                      │
//! │  items, assignments ───► resolve_shares() ──► shares + unassigned ids  │
//! │                                                  │                      │
//! │  people, shares, totals ► aggregate() ──────► PersonSummary[]          │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                            SplitOutcome                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stateless and deterministic: identical input always produces an
//! identical outcome, and nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::aggregate::{aggregate, PersonSummary};
use crate::config::SplitConfig;
use crate::error::CoreResult;
use crate::money::Money;
use crate::shares::resolve_shares;
use crate::totals::{compute_totals, BillTotals};
use crate::types::{Assignment, BillCharges, Item, Person, SplitRequest};
use crate::validation::validate_request;

// =============================================================================
// Outcome Types
// =============================================================================

/// The part of the bill that no participant carries.
///
/// All zero when every item has at least one assignee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UnattributedAmounts {
    pub subtotal: Money,
    pub tax: Money,
    pub service: Money,
    pub total: Money,
}

/// Result of one split computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitOutcome {
    pub totals: BillTotals,
    /// One summary per person, in input order.
    pub people: Vec<PersonSummary>,
    /// Items nobody shares. Callers must block finalizing until empty.
    pub unassigned_item_ids: Vec<String>,
    pub unattributed: UnattributedAmounts,
}

impl SplitOutcome {
    /// True when every item has at least one assignee.
    pub fn is_fully_assigned(&self) -> bool {
        self.unassigned_item_ids.is_empty()
    }

    /// Sum of all person totals.
    pub fn allocated_total(&self) -> Money {
        self.people.iter().map(|p| p.total).sum()
    }

    pub fn summary_for(&self, person_id: &str) -> Option<&PersonSummary> {
        self.people.iter().find(|p| p.person_id == person_id)
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Splits a bill among its participants.
///
/// Never fails. Input is assumed to have passed the validation boundary;
/// use [`split_checked`] when it has not.
///
/// ## Example
/// ```rust
/// use tally_core::engine::split_bill;
/// use tally_core::money::Money;
/// use tally_core::types::{Assignment, BillCharges, Item, Person};
///
/// let items = [Item::new("1", "Nasi Padang", Money::from_minor(100_000), 1)];
/// let people = [Person::new("p1", "Ayu"), Person::new("p2", "Budi")];
/// let assignments = [Assignment::new("1", "p1"), Assignment::new("1", "p2")];
/// let charges = BillCharges::from_percentages(10.0, 5.0).unwrap();
///
/// let outcome = split_bill(&items, &people, &assignments, charges);
///
/// assert_eq!(outcome.totals.grand_total.minor(), 115_000);
/// assert_eq!(outcome.people[0].total.minor(), 57_500);
/// assert_eq!(outcome.allocated_total(), outcome.totals.grand_total);
/// ```
pub fn split_bill(items: &[Item], people: &[Person], assignments: &[Assignment], charges: BillCharges) -> SplitOutcome {
    debug!(
        items = items.len(),
        people = people.len(),
        assignments = assignments.len(),
        tax_bps = charges.tax.bps(),
        service_bps = charges.service.bps(),
        "Splitting bill"
    );

    let totals = compute_totals(items, charges);
    let resolution = resolve_shares(items, assignments);
    let summaries = aggregate(
        people,
        &resolution.shares,
        items,
        totals.tax_amount,
        totals.service_amount,
        totals.subtotal,
    );

    let unattributed = unattributed_amounts(&totals, &summaries);
    if !unattributed.total.is_zero() {
        debug!(unattributed = %unattributed.total, "Part of the bill is not carried by anyone");
    }

    SplitOutcome {
        totals,
        people: summaries,
        unassigned_item_ids: resolution.unassigned_item_ids,
        unattributed,
    }
}

/// Validates the request, then splits it.
///
/// ## Errors
/// [`CoreError::Validation`](crate::error::CoreError::Validation) for any
/// input the boundary rejects. Unassigned items are not an error here.
pub fn split_checked(request: &SplitRequest, config: &SplitConfig) -> CoreResult<SplitOutcome> {
    validate_request(request, config)?;
    Ok(split_bill(
        &request.items,
        &request.people,
        &request.assignments,
        request.charges,
    ))
}

fn unattributed_amounts(totals: &BillTotals, summaries: &[PersonSummary]) -> UnattributedAmounts {
    let subtotal = totals.subtotal - summaries.iter().map(|s| s.subtotal).sum::<Money>();
    let tax = totals.tax_amount - summaries.iter().map(|s| s.tax).sum::<Money>();
    let service = totals.service_amount - summaries.iter().map(|s| s.service).sum::<Money>();

    UnattributedAmounts {
        subtotal,
        tax,
        service,
        total: subtotal + tax + service,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
