//! Closure Resolution
//!
//! Exact, case-insensitive name match against the closure table.

use rust_decimal::Decimal;

use crate::{
    resolve::{Category, ResolveError},
    tables::CategoryTable,
};

/// Resolve the per-unit price of a closure at an order quantity.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when no closure row matches the name.
pub fn unit_price(
    table: &CategoryTable,
    name: &str,
    quantity: u32,
) -> Result<Decimal, ResolveError> {
    table
        .get(name)
        .map(|row| row.prices.for_quantity(quantity))
        .ok_or_else(|| ResolveError::lookup(Category::Closure, name))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tables::{CategoryFields, PriceRow, TierPrices};

    use super::*;

    fn sample_table() -> CategoryTable {
        CategoryTable::new(vec![PriceRow {
            name: "Fitted".to_string(),
            prices: TierPrices {
                price144: Decimal::new(88, 2),
                ..TierPrices::default()
            },
            margin_percent: Decimal::from(50),
            fields: CategoryFields::Closure {
                closure_type: "Stretch".to_string(),
                comment: String::new(),
            },
        }])
    }

    #[test]
    fn exact_match_resolves() -> TestResult {
        let table = sample_table();

        assert_eq!(unit_price(&table, "fitted", 150)?, Decimal::new(88, 2));

        Ok(())
    }

    #[test]
    fn unmatched_closure_is_fatal() {
        let table = sample_table();

        assert_eq!(
            unit_price(&table, "Magnetic", 150),
            Err(ResolveError::lookup(Category::Closure, "Magnetic"))
        );
    }
}
