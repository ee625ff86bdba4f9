//! Accessory Resolution
//!
//! Exact, case-insensitive name match against the accessory table.

use rust_decimal::Decimal;

use crate::{
    resolve::{Category, ResolveError},
    tables::CategoryTable,
};

/// Resolve the per-unit price of an accessory at an order quantity.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when no accessory row matches the name.
pub fn unit_price(
    table: &CategoryTable,
    name: &str,
    quantity: u32,
) -> Result<Decimal, ResolveError> {
    table
        .get(name)
        .map(|row| row.prices.for_quantity(quantity))
        .ok_or_else(|| ResolveError::lookup(Category::Accessory, name))
}
