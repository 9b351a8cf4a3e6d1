//! # Validation Module
//!
//! The input boundary in front of the split engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Entry screens                                                 │
//! │  ├── Empty names, unparsable numbers                                    │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Negative prices, zero quantities, bad percentages                  │
//! │  ├── Price and subtotal limits (no i64 overflow downstream)            │
//! │  ├── Missing participants, duplicate ids                                │
//! │  └── Assignments pointing at unknown items or people                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── Assumes finite, non-negative input. Never re-validates.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An item that nobody shares is *not* a validation error. The engine
//! reports it as a warning in its outcome.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_charge_percentage, validate_name};
//!
//! validate_name("title", "Dinner at Sate Khas").unwrap();
//! validate_charge_percentage("tax", 11.0).unwrap();
//! assert!(validate_charge_percentage("service", f64::NAN).is_err());
//! ```

use std::collections::HashSet;

use crate::config::SplitConfig;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Assignment, BillCharges, Item, Person, SplitRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name for titles, items and people.
pub const MAX_NAME_LEN: usize = 200;

/// Largest bill subtotal the engine accepts, in minor units.
///
/// Both charges top out at 100%, so the grand total is at most three
/// times the subtotal and still fits in an i64.
pub const MAX_BILL_SUBTOTAL: i64 = i64::MAX / 3;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (bill title, item name, person name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax or service percentage.
///
/// ## Rules
/// - Must be finite (no NaN, no infinities)
/// - Must be between 0 and 100 inclusive
pub fn validate_charge_percentage(field: &str, pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::InvalidPercentage {
            field: field.to_string(),
            value: pct,
        });
    }

    Ok(())
}

/// Validates one receipt line.
///
/// ## Rules
/// - Id and name are required
/// - Unit price must be non-negative (free items are fine) and at most
///   `config.max_unit_price`
/// - Quantity must be between 1 and `config.max_item_quantity`
pub fn validate_item(item: &Item, config: &SplitConfig) -> ValidationResult<()> {
    validate_id("item id", &item.id)?;
    validate_name("item name", &item.name)?;

    if item.unit_price.is_negative() {
        return Err(ValidationError::InvalidItem {
            item_id: item.id.clone(),
            reason: "unit price must not be negative".to_string(),
        });
    }

    if item.quantity < 1 {
        return Err(ValidationError::InvalidItem {
            item_id: item.id.clone(),
            reason: "quantity must be at least 1".to_string(),
        });
    }

    if item.quantity > config.max_item_quantity {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: config.max_item_quantity,
        });
    }

    if item.unit_price.minor() > config.max_unit_price {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: config.max_unit_price,
        });
    }

    Ok(())
}

/// Validates that the bill subtotal can be computed without overflow.
///
/// Returns the subtotal. Limits set through [`SplitConfig`] can be raised
/// far enough that valid lines still add up past [`MAX_BILL_SUBTOTAL`];
/// this is the check that catches it.
pub fn validate_subtotal(items: &[Item]) -> ValidationResult<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |subtotal, item| {
            item.unit_price
                .checked_multiply_quantity(item.quantity)
                .and_then(|line| subtotal.checked_add(line))
        })
        .filter(|subtotal| subtotal.minor() <= MAX_BILL_SUBTOTAL)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "bill subtotal".to_string(),
            min: 0,
            max: MAX_BILL_SUBTOTAL,
        })
}

// =============================================================================
// Participant Validators
// =============================================================================

/// Validates a participant.
pub fn validate_person(person: &Person) -> ValidationResult<()> {
    validate_id("person id", &person.id)?;
    validate_name("person name", &person.name)
}

/// Validates the participant list.
///
/// ## Rules
/// - At least one person when the bill has items
/// - Every person valid, ids unique
pub fn validate_people(people: &[Person], has_items: bool) -> ValidationResult<()> {
    if has_items && people.is_empty() {
        return Err(ValidationError::EmptyPeopleList);
    }

    let mut seen = HashSet::with_capacity(people.len());
    for person in people {
        validate_person(person)?;
        if !seen.insert(person.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "person id".to_string(),
                value: person.id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates that every assignment names an item and a person on the bill.
pub fn validate_assignments(
    assignments: &[Assignment],
    items: &[Item],
    people: &[Person],
) -> ValidationResult<()> {
    let item_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
    let person_ids: HashSet<&str> = people.iter().map(|p| p.id.as_str()).collect();

    for assignment in assignments {
        if !item_ids.contains(assignment.item_id.as_str()) {
            return Err(ValidationError::UnknownReference {
                field: "item".to_string(),
                id: assignment.item_id.clone(),
            });
        }
        if !person_ids.contains(assignment.person_id.as_str()) {
            return Err(ValidationError::UnknownReference {
                field: "person".to_string(),
                id: assignment.person_id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a complete split request.
///
/// Runs every rule above plus the item-count limit, item id uniqueness and
/// the subtotal bound. Charges are already typed as basis points, so only
/// the 100% ceiling is rechecked here.
pub fn validate_request(request: &SplitRequest, config: &SplitConfig) -> ValidationResult<()> {
    validate_inputs(
        &request.items,
        &request.people,
        &request.assignments,
        request.charges,
        config,
    )
}

/// [`validate_request`] over borrowed parts, for callers that do not hold
/// a [`SplitRequest`] (a stored record, for one).
pub fn validate_inputs(
    items: &[Item],
    people: &[Person],
    assignments: &[Assignment],
    charges: BillCharges,
    config: &SplitConfig,
) -> ValidationResult<()> {
    if items.len() > config.max_bill_items {
        return Err(ValidationError::OutOfRange {
            field: "bill items".to_string(),
            min: 0,
            max: config.max_bill_items as i64,
        });
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_item(item, config)?;
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id.clone(),
            });
        }
    }
    validate_subtotal(items)?;

    validate_charge_percentage("tax", charges.tax.percentage())?;
    validate_charge_percentage("service", charges.service.percentage())?;

    validate_people(people, !items.is_empty())?;
    validate_assignments(assignments, items, people)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{BillCharges, ChargeRate};

    fn item(id: &str, price: i64, qty: i64) -> Item {
        Item::new(id, format!("Item {id}"), Money::from_minor(price), qty)
    }

    fn request() -> SplitRequest {
        SplitRequest {
            items: vec![item("1", 60_000, 1), item("2", 40_000, 1)],
            people: vec![Person::new("p1", "Ayu"), Person::new("p2", "Budi")],
            assignments: vec![Assignment::new("1", "p1"), Assignment::new("2", "p2")],
            charges: BillCharges::none(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("title", "Makan siang").is_ok());
        assert!(validate_name("title", "   ").is_err());
        assert!(validate_name("title", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_charge_percentage() {
        assert!(validate_charge_percentage("tax", 0.0).is_ok());
        assert!(validate_charge_percentage("tax", 100.0).is_ok());
        assert!(validate_charge_percentage("tax", -0.01).is_err());
        assert!(validate_charge_percentage("tax", 100.01).is_err());
        assert!(validate_charge_percentage("tax", f64::NAN).is_err());
        assert!(validate_charge_percentage("tax", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_item() {
        let config = SplitConfig::default();
        assert!(validate_item(&item("1", 0, 1), &config).is_ok());
        assert!(matches!(
            validate_item(&item("1", -1, 1), &config),
            Err(ValidationError::InvalidItem { .. })
        ));
        assert!(matches!(
            validate_item(&item("1", 100, 0), &config),
            Err(ValidationError::InvalidItem { .. })
        ));
        assert!(matches!(
            validate_item(&item("1", 100, config.max_item_quantity + 1), &config),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_item_unit_price_limit() {
        let config = SplitConfig {
            max_unit_price: 1_000,
            ..SplitConfig::default()
        };
        assert!(validate_item(&item("1", 1_000, 1), &config).is_ok());
        assert!(matches!(
            validate_item(&item("1", 1_001, 1), &config),
            Err(ValidationError::OutOfRange { ref field, max: 1_000, .. }) if field == "unit price"
        ));
    }

    #[test]
    fn test_overflowing_line_is_rejected_not_panicking() {
        let mut req = request();
        req.items = vec![item("1", 4_000_000_000_000_000_000, 3)];
        req.assignments = vec![Assignment::new("1", "p1")];

        assert!(matches!(
            validate_request(&req, &SplitConfig::default()),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "unit price"
        ));

        // Limits raised by configuration still stop at the subtotal bound.
        let permissive = SplitConfig {
            max_unit_price: i64::MAX,
            ..SplitConfig::default()
        };
        assert!(matches!(
            validate_request(&req, &permissive),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "bill subtotal"
        ));
    }

    #[test]
    fn test_validate_subtotal() {
        let items = [item("1", 30_000, 2), item("2", 5_000, 3)];
        assert_eq!(validate_subtotal(&items), Ok(Money::from_minor(75_000)));
        assert_eq!(validate_subtotal(&[]), Ok(Money::zero()));

        let at_limit = [item("1", MAX_BILL_SUBTOTAL, 1)];
        assert!(validate_subtotal(&at_limit).is_ok());

        let past_limit = [item("1", MAX_BILL_SUBTOTAL, 1), item("2", 1, 1)];
        assert!(validate_subtotal(&past_limit).is_err());

        let wraps = [item("1", i64::MAX, 1), item("2", i64::MAX, 1)];
        assert!(validate_subtotal(&wraps).is_err());
    }

    #[test]
    fn test_validate_people() {
        assert_eq!(validate_people(&[], true), Err(ValidationError::EmptyPeopleList));
        assert!(validate_people(&[], false).is_ok());

        let dupes = [Person::new("p1", "Ayu"), Person::new("p1", "Budi")];
        assert!(matches!(
            validate_people(&dupes, true),
            Err(ValidationError::Duplicate { .. })
        ));

        let unnamed = [Person::new("p1", " ")];
        assert!(matches!(
            validate_people(&unnamed, true),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_request_ok() {
        assert!(validate_request(&request(), &SplitConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_request_unknown_references() {
        let mut req = request();
        req.assignments.push(Assignment::new("9", "p1"));
        assert_eq!(
            validate_request(&req, &SplitConfig::default()),
            Err(ValidationError::UnknownReference {
                field: "item".to_string(),
                id: "9".to_string()
            })
        );

        let mut req = request();
        req.assignments.push(Assignment::new("1", "ghost"));
        assert!(matches!(
            validate_request(&req, &SplitConfig::default()),
            Err(ValidationError::UnknownReference { ref field, .. }) if field == "person"
        ));
    }

    #[test]
    fn test_validate_request_limits() {
        let config = SplitConfig {
            max_bill_items: 1,
            ..SplitConfig::default()
        };
        assert!(matches!(
            validate_request(&request(), &config),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut req = request();
        req.items[1].id = "1".to_string();
        assert!(matches!(
            validate_request(&req, &SplitConfig::default()),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut req = request();
        req.charges.service = ChargeRate::from_bps(10_001);
        assert!(matches!(
            validate_request(&req, &SplitConfig::default()),
            Err(ValidationError::InvalidPercentage { .. })
        ));
    }

    #[test]
    fn test_unassigned_item_is_not_a_validation_error() {
        let mut req = request();
        req.assignments.clear();
        assert!(validate_request(&req, &SplitConfig::default()).is_ok());
    }
}
