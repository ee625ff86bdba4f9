//! Fabric Resolution
//!
//! Fabric names resolve by exact, case-insensitive match. A name containing
//! `/` is a dual-fabric specification ("Polyester/Laser Cut"): each
//! component resolves independently and the unit prices are summed:
//! additive compound pricing, not a single lookup. A component marked
//! `Free` in the table must cost exactly zero regardless of what the table
//! stores for it.

use rust_decimal::Decimal;

use crate::{
    resolve::{Category, ResolveError},
    tables::{CategoryFields, CategoryTable, CostType},
};

/// Resolve the per-unit price of a fabric selection at an order quantity.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when a single-name fabric has no table
/// entry. A dual-fabric spec never fails outright: an unmatched component
/// is logged and skipped while the other component still contributes,
/// since one missing component is a data-quality gap, not a hard error.
pub fn unit_price(
    table: &CategoryTable,
    name: &str,
    quantity: u32,
) -> Result<Decimal, ResolveError> {
    if name.contains('/') {
        let mut total = Decimal::ZERO;

        for component in name.split('/') {
            let component = component.trim();

            if component.is_empty() {
                continue;
            }

            if let Some(price) = component_price(table, component, quantity) {
                total += price;
            } else {
                tracing::warn!(
                    fabric = %name,
                    component = %component,
                    "dual-fabric component not found; skipping"
                );
            }
        }

        return Ok(total);
    }

    component_price(table, name, quantity)
        .ok_or_else(|| ResolveError::lookup(Category::Fabric, name))
}

/// Price one fabric component, enforcing the free-fabric invariant.
fn component_price(table: &CategoryTable, name: &str, quantity: u32) -> Option<Decimal> {
    let row = table.get(name)?;
    let price = row.prices.for_quantity(quantity);

    if let CategoryFields::Fabric {
        cost_type: CostType::Free,
        ..
    } = &row.fields
    {
        if price != Decimal::ZERO {
            tracing::warn!(
                fabric = %row.name,
                stored = %price,
                "free fabric stored a non-zero price; coercing to zero"
            );
        }

        return Some(Decimal::ZERO);
    }

    Some(price)
}
