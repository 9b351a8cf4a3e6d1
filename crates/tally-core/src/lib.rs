//! # tally-core: Split-Bill Apportionment for Tally
//!
//! Divides a receipt among the people who shared it. Pure functions, zero
//! I/O: the mobile front end gathers items, people and assignments, this
//! crate computes who owes what, and the storage layer persists the
//! finished [`record::SplitBill`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Split Bill                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (React Native)                     │   │
//! │  │    Receipt scan ──► Item editor ──► Assign ──► Summary          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TypeScript bindings          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  totals   │  │  shares   │  │ aggregate │  │ validation│  │   │
//! │  │   │ subtotal  │  │ item →    │  │ person    │  │  boundary │  │   │
//! │  │   │ tax, svc  │  │  people   │  │ summaries │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO UI STATE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SplitBill::to_json()                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storage (out of scope)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and exact allocation
//! - [`types`] - Items, people, assignments, charge rates
//! - [`assignment`] - Editable assignment set and lookup index
//! - [`totals`] - Bill subtotal, tax, service, grand total
//! - [`shares`] - Equal split of each item among its assignees
//! - [`aggregate`] - Per-person roll-up with proportional surcharges
//! - [`engine`] - The entry point chaining the three stages
//! - [`record`] - Finalized split bill record
//! - [`validation`] - Input boundary rules
//! - [`config`] - Limits and finalize policy
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Integer Money**: all amounts in minor units, no floats
//! 3. **Exact Conservation**: person totals add up to the bill total
//! 4. **Explicit Errors**: typed errors at the boundary, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::engine::split_bill;
//! use tally_core::{Assignment, BillCharges, Item, Money, Person};
//!
//! let items = [
//!     Item::new("A", "Ayam Penyet", Money::from_minor(60_000), 1),
//!     Item::new("B", "Soto Betawi", Money::from_minor(40_000), 1),
//! ];
//! let people = [Person::new("p1", "Ayu"), Person::new("p2", "Budi")];
//! let assignments = [Assignment::new("A", "p1"), Assignment::new("B", "p2")];
//!
//! let outcome = split_bill(&items, &people, &assignments, BillCharges::none());
//!
//! assert_eq!(outcome.people[0].total.minor(), 60_000);
//! assert_eq!(outcome.people[1].total.minor(), 40_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod assignment;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod record;
pub mod shares;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{ItemShare, PersonSummary};
pub use assignment::AssignmentSet;
pub use config::SplitConfig;
pub use engine::{split_bill, split_checked, SplitOutcome, UnattributedAmounts};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use record::{BillDraft, SplitBill};
pub use totals::BillTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum receipt lines on a single bill.
///
/// Receipt scans occasionally produce hundreds of junk lines; this bounds
/// the work before the user notices.
pub const MAX_BILL_ITEMS: usize = 200;

/// Maximum quantity on a single receipt line.
///
/// Catches typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price in minor units (one trillion).
///
/// With the item and quantity limits this keeps every bill subtotal far
/// below [`validation::MAX_BILL_SUBTOTAL`].
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;
