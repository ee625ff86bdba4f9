//! Logo Resolution
//!
//! A logo lookup matches on three fields at once: the name (substring,
//! case-insensitive), the size, and the application method. The resolved
//! row yields both the per-unit price at the quantity tier and a flat
//! one-time mold charge derived from the row's mold-charge descriptor.

use rust_decimal::Decimal;

use crate::{
    resolve::{Category, ResolveError},
    tables::{CategoryFields, CategoryTable, MoldClass},
};

/// Result of pricing one logo selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPrice {
    /// Per-unit price at the resolved quantity tier.
    pub unit_price: Decimal,

    /// Mold-charge class; [`MoldClass::None`] means no tooling fee.
    pub mold: MoldClass,
}

/// Resolve a logo selection at an order quantity.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when no row matches the
/// name/size/application triple.
pub fn resolve(
    table: &CategoryTable,
    name: &str,
    size: &str,
    application: &str,
    quantity: u32,
) -> Result<LogoPrice, ResolveError> {
    let row = table.find_logo(name, size, application).ok_or_else(|| {
        ResolveError::lookup(Category::Logo, format!("{name} ({size}, {application})"))
    })?;

    let mold = match &row.fields {
        CategoryFields::Logo { mold_charge, .. } => *mold_charge,
        _ => MoldClass::None,
    };

    Ok(LogoPrice {
        unit_price: row.prices.for_quantity(quantity),
        mold,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tables::{PriceRow, TierPrices};

    use super::*;

    fn logo_row(
        name: &str,
        size: &str,
        application: &str,
        price144: Decimal,
        mold_charge: MoldClass,
    ) -> PriceRow {
        PriceRow {
            name: name.to_string(),
            prices: TierPrices {
                price144,
                ..TierPrices::default()
            },
            margin_percent: Decimal::from(45),
            fields: CategoryFields::Logo {
                application: application.to_string(),
                size: size.to_string(),
                size_example: String::new(),
                mold_charge,
            },
        }
    }

    fn sample_table() -> CategoryTable {
        CategoryTable::new(vec![
            logo_row(
                "3D Embroidery",
                "Large",
                "Direct",
                Decimal::new(120, 2),
                MoldClass::Medium,
            ),
            logo_row(
                "3D Embroidery",
                "Small",
                "Direct",
                Decimal::new(80, 2),
                MoldClass::None,
            ),
            logo_row(
                "Leather Patch",
                "Medium",
                "Patch",
                Decimal::new(95, 2),
                MoldClass::Large,
            ),
        ])
    }

    #[test]
    fn resolves_on_all_three_fields() -> TestResult {
        let table = sample_table();

        let price = resolve(&table, "3D Embroidery", "Large", "Direct", 288)?;

        assert_eq!(price.unit_price, Decimal::new(120, 2));
        assert_eq!(price.mold, MoldClass::Medium);

        Ok(())
    }

    #[test]
    fn size_mismatch_is_a_lookup_failure() {
        let table = sample_table();

        assert!(matches!(
            resolve(&table, "3D Embroidery", "Large", "Patch", 288),
            Err(ResolveError::Lookup { category: Category::Logo, .. })
        ));
    }

    #[test]
    fn name_matches_by_substring() -> TestResult {
        let table = sample_table();

        // A fuller requested name still finds the row.
        let price = resolve(&table, "Large 3D Embroidery Logo", "Large", "Direct", 288)?;
        assert_eq!(price.unit_price, Decimal::new(120, 2));

        // And a partial name matches the row's fuller name.
        let partial = resolve(&table, "Leather", "Medium", "Patch", 288)?;
        assert_eq!(partial.mold, MoldClass::Large);

        Ok(())
    }

    #[test]
    fn sizes_select_distinct_mold_classes() -> TestResult {
        let table = sample_table();

        let small = resolve(&table, "3D Embroidery", "Small", "Direct", 288)?;

        assert_eq!(small.unit_price, Decimal::new(80, 2));
        assert_eq!(small.mold, MoldClass::None);

        Ok(())
    }
}
