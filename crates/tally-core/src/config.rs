//! # Split Configuration
//!
//! Limits and policy applied at the validation boundary and when a split
//! bill is finalized.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only once built; the engine only borrows it.

use serde::{Deserialize, Serialize};

use crate::{MAX_BILL_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Split-bill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfig {
    /// Maximum number of receipt lines on one bill.
    pub max_bill_items: usize,

    /// Maximum quantity on a single receipt line.
    pub max_item_quantity: i64,

    /// Maximum unit price on a single receipt line, in minor units.
    pub max_unit_price: i64,

    /// Allow finalizing a bill that still has items nobody shares.
    /// Default: false (the bill must be fully assigned).
    pub allow_unassigned: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            max_bill_items: MAX_BILL_ITEMS,
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_unit_price: MAX_UNIT_PRICE,
            allow_unassigned: false,
        }
    }
}

impl SplitConfig {
    /// Creates a SplitConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_MAX_BILL_ITEMS`: Override the item limit
    /// - `TALLY_MAX_ITEM_QUANTITY`: Override the per-line quantity limit
    /// - `TALLY_MAX_UNIT_PRICE`: Override the unit price limit (minor units)
    /// - `TALLY_ALLOW_UNASSIGNED`: `true`/`1` to allow partial bills
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SplitConfig::default();

        if let Some(max) = lookup("TALLY_MAX_BILL_ITEMS").and_then(|v| v.trim().parse().ok()) {
            config.max_bill_items = max;
        }

        if let Some(max) = lookup("TALLY_MAX_ITEM_QUANTITY").and_then(|v| v.trim().parse().ok()) {
            config.max_item_quantity = max;
        }

        if let Some(max) = lookup("TALLY_MAX_UNIT_PRICE").and_then(|v| v.trim().parse().ok()) {
            config.max_unit_price = max;
        }

        if let Some(flag) = lookup("TALLY_ALLOW_UNASSIGNED") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.allow_unassigned = true,
                "0" | "false" | "no" => config.allow_unassigned = false,
                _ => {}
            }
        }

        config
    }
}
