//! # Split Bill Record
//!
//! The immutable history entry saved once a split is finalized.
//!
//! ## Snapshot Pattern
//! The record freezes the *inputs* (items, people, assignments, tax and
//! service percentages) together with the bill subtotal and total.
//! Per-person results are never stored; [`SplitBill::summary`] re-derives
//! them, so a stored bill always renders with the same numbers it was
//! saved with.
//!
//! ```text
//! BillDraft ──► SplitBill::finalize() ──► SplitBill ──► to_json() ──► storage
//!                 │                                                     │
//!                 ├── validate_request()                                │
//!                 ├── split_bill()               SplitBill ◄── from_json()
//!                 └── unassigned gate                │           ├── validate_inputs()
//!                                                    │           └── stored totals check
//!                                                    ▼
//!                                           SplitBill::summary()
//! ```
//!
//! ## Stored Shape
//! ```text
//! { id, title, items, people, assignments,
//!   taxPercentage, servicePercentage, subtotal, total, createdAt }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::assignment::AssignmentSet;
use crate::config::SplitConfig;
use crate::engine::{split_bill, SplitOutcome};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::totals::compute_totals;
use crate::types::{as_percentage, Assignment, BillCharges, ChargeRate, Item, Person, SplitRequest};
use crate::validation::{validate_inputs, validate_name, validate_request};

// =============================================================================
// Draft
// =============================================================================

/// A split being edited, not yet saved.
#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    pub title: String,
    pub items: Vec<Item>,
    pub people: Vec<Person>,
    pub assignments: AssignmentSet,
    pub charges: BillCharges,
}

impl BillDraft {
    pub fn new(title: impl Into<String>) -> Self {
        BillDraft {
            title: title.into(),
            ..BillDraft::default()
        }
    }

    /// Removes a participant together with all of their assignments.
    pub fn remove_person(&mut self, person_id: &str) -> bool {
        let before = self.people.len();
        self.people.retain(|p| p.id != person_id);
        self.assignments.remove_person(person_id);
        self.people.len() != before
    }

    /// Removes a receipt line together with its assignments.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.assignments.remove_item(item_id);
        self.items.len() != before
    }

    /// Computes the live preview shown while assigning.
    pub fn preview(&self) -> SplitOutcome {
        split_bill(&self.items, &self.people, self.assignments.pairs(), self.charges)
    }
}

// =============================================================================
// Record
// =============================================================================

/// A finalized split bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitBill {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
    pub people: Vec<Person>,
    pub assignments: Vec<Assignment>,
    #[serde(rename = "taxPercentage", with = "as_percentage")]
    #[ts(as = "f64")]
    pub tax_rate: ChargeRate,
    #[serde(rename = "servicePercentage", with = "as_percentage")]
    #[ts(as = "f64")]
    pub service_rate: ChargeRate,
    pub subtotal: Money,
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SplitBill {
    /// Validates a draft and freezes it into a record.
    ///
    /// ## Errors
    /// - `Validation` for a missing title or any rejected input
    /// - `EmptyBill` when the draft has no items
    /// - `UnassignedItems` when some item is shared by nobody and
    ///   `config.allow_unassigned` is off
    pub fn finalize(draft: BillDraft, config: &SplitConfig) -> CoreResult<SplitBill> {
        validate_name("title", &draft.title)?;

        if draft.items.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        let request = SplitRequest {
            items: draft.items,
            people: draft.people,
            assignments: draft.assignments.into_pairs(),
            charges: draft.charges,
        };
        validate_request(&request, config)?;

        let outcome = split_bill(&request.items, &request.people, &request.assignments, request.charges);
        if !outcome.is_fully_assigned() {
            if !config.allow_unassigned {
                return Err(CoreError::UnassignedItems {
                    item_ids: outcome.unassigned_item_ids,
                });
            }
            warn!(
                unassigned = outcome.unassigned_item_ids.len(),
                "Finalizing split bill with unassigned items"
            );
        }

        let bill = SplitBill {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            items: request.items,
            people: request.people,
            assignments: request.assignments,
            tax_rate: request.charges.tax,
            service_rate: request.charges.service,
            subtotal: outcome.totals.subtotal,
            total: outcome.totals.grand_total,
            created_at: Utc::now(),
        };

        debug!(id = %bill.id, total = %bill.total, people = bill.people.len(), "Finalized split bill");
        Ok(bill)
    }

    /// Tax and service rates the bill was finalized with.
    pub fn charges(&self) -> BillCharges {
        BillCharges::new(self.tax_rate, self.service_rate)
    }

    /// Re-derives the per-person breakdown from the frozen inputs.
    pub fn summary(&self) -> SplitOutcome {
        split_bill(&self.items, &self.people, &self.assignments, self.charges())
    }

    /// Re-checks a record that came back from storage.
    ///
    /// Runs the title, empty-bill and input validation that finalize ran,
    /// then recomputes the totals and compares them with the stored ones.
    /// The unassigned gate is not reapplied: a record saved under
    /// `allow_unassigned` stays loadable.
    ///
    /// ## Errors
    /// - `Validation` / `EmptyBill` for inputs finalize would have rejected
    /// - `TotalsMismatch` when the stored subtotal or total disagrees with
    ///   the stored inputs
    pub fn verify(&self, config: &SplitConfig) -> CoreResult<()> {
        validate_name("title", &self.title)?;

        if self.items.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        validate_inputs(&self.items, &self.people, &self.assignments, self.charges(), config)?;

        let totals = compute_totals(&self.items, self.charges());
        if totals.subtotal != self.subtotal {
            return Err(CoreError::TotalsMismatch {
                field: "subtotal".to_string(),
                stored: self.subtotal,
                computed: totals.subtotal,
            });
        }
        if totals.grand_total != self.total {
            return Err(CoreError::TotalsMismatch {
                field: "total".to_string(),
                stored: self.total,
                computed: totals.grand_total,
            });
        }

        Ok(())
    }

    /// Encodes the record for the storage collaborator.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored record and [verifies](SplitBill::verify) it.
    ///
    /// ## Errors
    /// - `Serialization` for malformed JSON or a percentage outside 0..=100
    /// - anything [`SplitBill::verify`] reports
    pub fn from_json(json: &str, config: &SplitConfig) -> CoreResult<SplitBill> {
        let bill: SplitBill = serde_json::from_str(json)?;
        if let Err(err) = bill.verify(config) {
            warn!(id = %bill.id, error = %err, "Rejected stored split bill");
            return Err(err);
        }
        Ok(bill)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
