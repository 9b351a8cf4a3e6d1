//! # Bill Totals
//!
//! Subtotal, tax, service and grand total for a receipt, independent of
//! who shares what.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BillCharges, Item};

/// Whole-bill amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub service_amount: Money,
    pub grand_total: Money,
}

/// Computes the bill totals.
///
/// Tax and service are both taken on the item subtotal, never compounded.
/// Every item counts toward the subtotal, assigned or not.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::totals::compute_totals;
/// use tally_core::types::{BillCharges, Item};
///
/// let items = [Item::new("1", "Bebek Goreng", Money::from_minor(100_000), 1)];
/// let charges = BillCharges::from_percentages(10.0, 5.0).unwrap();
///
/// let totals = compute_totals(&items, charges);
/// assert_eq!(totals.tax_amount.minor(), 10_000);
/// assert_eq!(totals.service_amount.minor(), 5_000);
/// assert_eq!(totals.grand_total.minor(), 115_000);
/// ```
pub fn compute_totals(items: &[Item], charges: BillCharges) -> BillTotals {
    let subtotal: Money = items.iter().map(Item::line_total).sum();
    let tax_amount = subtotal.apply_rate(charges.tax);
    let service_amount = subtotal.apply_rate(charges.service);

    BillTotals {
        subtotal,
        tax_amount,
        service_amount,
        grand_total: subtotal + tax_amount + service_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChargeRate;

    #[test]
    fn test_empty_bill_is_zero() {
        let totals = compute_totals(&[], BillCharges::from_percentages(10.0, 5.0).unwrap());
        assert_eq!(totals, BillTotals::default());
    }

    #[test]
    fn test_quantity_multiplies_line() {
        let items = [
            Item::new("1", "Sate", Money::from_minor(30_000), 2),
            Item::new("2", "Es Jeruk", Money::from_minor(8_000), 3),
        ];
        let totals = compute_totals(&items, BillCharges::none());
        assert_eq!(totals.subtotal.minor(), 84_000);
        assert_eq!(totals.grand_total.minor(), 84_000);
    }

    #[test]
    fn test_service_not_compounded_on_tax() {
        let items = [Item::new("1", "Steak", Money::from_minor(10_000), 1)];
        let charges = BillCharges::new(ChargeRate::from_bps(1000), ChargeRate::from_bps(1000));
        let totals = compute_totals(&items, charges);

        // compounded would give 1100 service
        assert_eq!(totals.service_amount.minor(), 1000);
        assert_eq!(totals.grand_total.minor(), 12_000);
    }
}
