//! # Domain Types
//!
//! Input types consumed by the split engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Split Inputs                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │     Person      │   │   Assignment    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  item_id   ─────┼──► Item
//! │  │  name           │   │  name           │   │  person_id ─────┼──► Person
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  quantity       │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │   BillCharges   │   │   ChargeRate    │       │
//! │                        │  tax            │   │  bps (u32)      │       │
//! │                        │  service        │   │  1000 = 10%     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_charge_percentage, ValidationResult};

// =============================================================================
// Charge Rate
// =============================================================================

/// A surcharge rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10% and 550 bps = 5.5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChargeRate(u32);

impl ChargeRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        ChargeRate(bps)
    }

    /// Creates a rate from a user-entered percentage.
    ///
    /// Rejects NaN, infinities, negatives and anything above 100%.
    /// The value is rounded to the nearest basis point.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::ChargeRate;
    ///
    /// assert_eq!(ChargeRate::from_percentage(10.0).unwrap().bps(), 1000);
    /// assert_eq!(ChargeRate::from_percentage(5.5).unwrap().bps(), 550);
    /// assert!(ChargeRate::from_percentage(f64::NAN).is_err());
    /// assert!(ChargeRate::from_percentage(-1.0).is_err());
    /// ```
    pub fn from_percentage(pct: f64) -> ValidationResult<Self> {
        validate_charge_percentage("rate", pct)?;
        Ok(ChargeRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        ChargeRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ChargeRate {
    fn default() -> Self {
        ChargeRate::zero()
    }
}

/// Serde adapter that stores a [`ChargeRate`] as a plain percentage number
/// (`10.0` for 1000 bps).
///
/// Decoding goes through [`ChargeRate::from_percentage`], so a stored value
/// that is negative, above 100 or not a number fails to load.
///
/// ## Example
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use tally_core::types::ChargeRate;
///
/// #[derive(Serialize, Deserialize)]
/// struct Stored {
///     #[serde(with = "tally_core::types::as_percentage")]
///     tax: ChargeRate,
/// }
///
/// let json = serde_json::to_string(&Stored { tax: ChargeRate::from_bps(825) }).unwrap();
/// assert_eq!(json, r#"{"tax":8.25}"#);
/// assert!(serde_json::from_str::<Stored>(r#"{"tax":150}"#).is_err());
/// ```
pub mod as_percentage {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ChargeRate;

    pub fn serialize<S: Serializer>(rate: &ChargeRate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(rate.percentage())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChargeRate, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        ChargeRate::from_percentage(pct).map_err(D::Error::custom)
    }
}

// =============================================================================
// Bill Charges
// =============================================================================

/// Tax and service percentages, both applied to the item subtotal.
///
/// Service is never compounded on top of tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillCharges {
    pub tax: ChargeRate,
    pub service: ChargeRate,
}

impl BillCharges {
    pub const fn new(tax: ChargeRate, service: ChargeRate) -> Self {
        BillCharges { tax, service }
    }

    /// Builds charges from the two percentage fields of the entry form.
    ///
    /// Errors name the offending field (`tax` or `service`).
    pub fn from_percentages(tax_pct: f64, service_pct: f64) -> ValidationResult<Self> {
        validate_charge_percentage("tax", tax_pct)?;
        validate_charge_percentage("service", service_pct)?;

        Ok(BillCharges {
            tax: ChargeRate::from_percentage(tax_pct)?,
            service: ChargeRate::from_percentage(service_pct)?,
        })
    }

    /// No tax, no service.
    pub const fn none() -> Self {
        BillCharges {
            tax: ChargeRate::zero(),
            service: ChargeRate::zero(),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Price of a single unit in minor units.
    pub unit_price: Money,
    pub quantity: i64,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Person
// =============================================================================

/// A participant in the split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Person {
    pub id: String,
    pub name: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Person {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Assignment
// =============================================================================

/// "This person shares this item."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub item_id: String,
    pub person_id: String,
}

impl Assignment {
    pub fn new(item_id: impl Into<String>, person_id: impl Into<String>) -> Self {
        Assignment {
            item_id: item_id.into(),
            person_id: person_id.into(),
        }
    }
}

impl<I: Into<String>, P: Into<String>> From<(I, P)> for Assignment {
    fn from((item_id, person_id): (I, P)) -> Self {
        Assignment::new(item_id, person_id)
    }
}

// =============================================================================
// Split Request
// =============================================================================

/// Everything the engine needs for one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub items: Vec<Item>,
    pub people: Vec<Person>,
    pub assignments: Vec<Assignment>,
    pub charges: BillCharges,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_charge_rate_from_bps() {
        let rate = ChargeRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_charge_rate_from_percentage_rounds_to_bps() {
        assert_eq!(ChargeRate::from_percentage(8.25).unwrap().bps(), 825);
        assert_eq!(ChargeRate::from_percentage(0.005).unwrap().bps(), 1);
        assert_eq!(ChargeRate::from_percentage(100.0).unwrap().bps(), 10_000);
    }

    #[test]
    fn test_charge_rate_rejects_bad_input() {
        assert!(ChargeRate::from_percentage(f64::INFINITY).is_err());
        assert!(ChargeRate::from_percentage(100.5).is_err());
    }

    #[test]
    fn test_bill_charges_names_offending_field() {
        let err = BillCharges::from_percentages(10.0, -5.0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPercentage { ref field, .. } if field == "service"));
    }

    #[test]
    fn test_percentage_adapter_round_trips_bps() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Stored {
            #[serde(with = "as_percentage")]
            rate: ChargeRate,
        }

        for bps in [0, 1, 550, 825, 1000, 1150, 10_000] {
            let stored = Stored {
                rate: ChargeRate::from_bps(bps),
            };
            let json = serde_json::to_string(&stored).unwrap();
            assert_eq!(serde_json::from_str::<Stored>(&json).unwrap(), stored, "{json}");
        }

        assert_eq!(
            serde_json::from_str::<Stored>(r#"{"rate":10}"#).unwrap().rate.bps(),
            1000
        );
        assert!(serde_json::from_str::<Stored>(r#"{"rate":-1}"#).is_err());
        assert!(serde_json::from_str::<Stored>(r#"{"rate":100.5}"#).is_err());
    }

    #[test]
    fn test_item_line_total() {
        let item = Item::new("1", "Nasi Goreng", Money::from_minor(30_000), 2);
        assert_eq!(item.line_total().minor(), 60_000);
    }

    #[test]
    fn test_assignment_from_tuple() {
        let a: Assignment = ("item-1", "p1").into();
        assert_eq!(a, Assignment::new("item-1", "p1"));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new("1", "Es Teh", Money::from_minor(5000), 3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unitPrice"], 5000);
        assert_eq!(json["quantity"], 3);
    }
}
