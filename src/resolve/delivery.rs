//! Delivery Resolution
//!
//! Substring, case-insensitive name match against the delivery table: the
//! storefront sends method names like "Regular Delivery (Air)" that must
//! still find the "Regular Delivery" row. `"Not Applicable"` price cells
//! were already coerced to zero at load time.

use rust_decimal::Decimal;

use crate::{
    resolve::{Category, ResolveError},
    tables::CategoryTable,
};

/// Resolve the per-unit price of a delivery method at an order quantity.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when no delivery row matches the
/// method name.
pub fn unit_price(
    table: &CategoryTable,
    method: &str,
    quantity: u32,
) -> Result<Decimal, ResolveError> {
    table
        .find_containing(method)
        .map(|row| row.prices.for_quantity(quantity))
        .ok_or_else(|| ResolveError::lookup(Category::Delivery, method))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tables::{CategoryFields, PriceRow, TierPrices};

    use super::*;

    fn delivery_row(name: &str, price144: Decimal) -> PriceRow {
        PriceRow {
            name: name.to_string(),
            prices: TierPrices {
                price144,
                ..TierPrices::default()
            },
            margin_percent: Decimal::from(30),
            fields: CategoryFields::Delivery {
                delivery_type: "Air".to_string(),
                delivery_days: "10-14".to_string(),
            },
        }
    }

    fn sample_table() -> CategoryTable {
        CategoryTable::new(vec![
            delivery_row("Regular Delivery", Decimal::new(280, 2)),
            delivery_row("Priority Delivery", Decimal::new(420, 2)),
        ])
    }

    #[test]
    fn substring_match_resolves() -> TestResult {
        let table = sample_table();

        assert_eq!(unit_price(&table, "regular", 288)?, Decimal::new(280, 2));
        assert_eq!(
            unit_price(&table, "Priority Delivery (Air Freight)", 288)?,
            Decimal::new(420, 2)
        );

        Ok(())
    }

    #[test]
    fn unmatched_method_is_fatal() {
        let table = sample_table();

        assert_eq!(
            unit_price(&table, "Teleport", 288),
            Err(ResolveError::lookup(Category::Delivery, "Teleport"))
        );
    }
}
