//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - input rejected before the split runs               │
//! │  CoreError        - finalize gate, stored record checks, wrapped       │
//! │                     validation                                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller UI message                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The split computation itself never fails. An item nobody shares is a
//! warning carried in the outcome, and only becomes an error when a caller
//! asks to finalize the bill (see [`CoreError::UnassignedItems`]).

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised around the split computation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Finalize was requested while some items are shared by nobody.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Save split"
    ///      │
    ///      ▼
    /// outcome.unassigned_item_ids = ["3"]
    ///      │
    ///      ▼
    /// UnassignedItems { item_ids: ["3"] }
    ///      │
    ///      ▼
    /// UI highlights item 3 and keeps the assign screen open
    /// ```
    #[error("{} item(s) are not assigned to anyone: {}", .item_ids.len(), .item_ids.join(", "))]
    UnassignedItems { item_ids: Vec<String> },

    /// A bill cannot be finalized without any items.
    #[error("Split bill must contain at least one item")]
    EmptyBill,

    /// A stored record's subtotal or total disagrees with its own inputs.
    #[error("Stored {field} {stored} does not match the recomputed {computed}")]
    TotalsMismatch {
        field: String,
        stored: Money,
        computed: Money,
    },

    /// Record could not be encoded or decoded.
    #[error("Split bill record encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary, before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Receipt line with a negative price or a non-positive quantity.
    #[error("Item {item_id} is invalid: {reason}")]
    InvalidItem { item_id: String, reason: String },

    /// Tax or service percentage that is negative, above 100 or not finite.
    #[error("{field} percentage {value} is invalid: must be a finite number between 0 and 100")]
    InvalidPercentage { field: String, value: f64 },

    /// Items exist but nobody is there to pay for them.
    #[error("At least one person is required to split a bill with items")]
    EmptyPeopleList,

    /// Duplicate identifier.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Assignment points at an item or person that is not on the bill.
    #[error("Unknown {field} '{id}' referenced by an assignment")]
    UnknownReference { field: String, id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
