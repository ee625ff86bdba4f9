//! Blank-Cap Resolution
//!
//! The blank-cap base price depends on which product tier the cap design
//! belongs to. When the order carries a free-text product description the
//! tier is inferred by the catalog classifier; otherwise Tier 1 applies.
//! The tier then selects one of the three blank-cap price tables.

use rust_decimal::Decimal;

use crate::{
    catalog::ProductTier,
    resolve::{Category, ResolveError},
    tables::{PriceBook, TableId},
};

/// Result of pricing the blank cap for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankCapPrice {
    /// The product tier the description classified into.
    pub tier: ProductTier,

    /// Per-unit base price at the resolved quantity tier.
    pub unit_price: Decimal,
}

/// Resolve the blank-cap base price for an order.
///
/// A description matching a row name in the tier's table uses that row;
/// otherwise the table's first row is the tier's base price.
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] when the tier's table is empty (for
/// example because its source failed to load).
pub fn resolve(
    book: &PriceBook,
    description: Option<&str>,
    quantity: u32,
) -> Result<BlankCapPrice, ResolveError> {
    let tier = description.map_or(ProductTier::default(), |description| {
        book.catalog().classify(description)
    });

    let table = book.table(TableId::BlankCap(tier));

    let row = description
        .and_then(|description| table.get(description))
        .or_else(|| table.rows().first())
        .ok_or_else(|| ResolveError::lookup(Category::BlankCap, format!("{tier} blank cap")))?;

    Ok(BlankCapPrice {
        tier,
        unit_price: row.prices.for_quantity(quantity),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::tables::TableSources;

    use super::*;

    const HEADER: &str =
        "Name,price48,price144,price576,price1152,price2880,price10000,price20000,margin";

    fn write_sources(dir: &std::path::Path) -> TestResult {
        fs::write(
            dir.join("blank_caps_tier1.csv"),
            format!("{HEADER}\n6-Panel Heritage 6C,3.60,3.20,2.90,2.70,2.50,2.30,2.20,40\n"),
        )?;
        fs::write(
            dir.join("blank_caps_tier2.csv"),
            format!("{HEADER}\n5-Panel Trucker Classic,4.20,3.80,3.50,3.20,3.00,2.80,2.70,40\n"),
        )?;
        fs::write(
            dir.join("blank_caps_tier3.csv"),
            format!("{HEADER}\n7-Panel Apex,5.40,5.00,4.60,4.30,4.00,3.80,3.60,40\n"),
        )?;
        fs::write(
            dir.join("products.csv"),
            "Name,Profile,billOrVisorShape,panelCount,priceTier,structureType,nickNames\n\
             6-Panel Heritage 6C,High,Curved,6,Tier 1,Structured,heritage\n\
             5-Panel Trucker Classic,Mid,Flat,5,Tier 2,Structured,trucker\n\
             7-Panel Apex,High,Flat,7,Tier 3,Structured,apex\n",
        )?;

        Ok(())
    }

    #[test]
    fn classifies_description_into_tier_table() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_sources(dir.path())?;
        let book = PriceBook::new(TableSources::under(dir.path()));

        let price = resolve(&book, Some("6-Panel Heritage 6C with curved bill"), 288)?;

        assert_eq!(price.tier, ProductTier::Tier1);
        assert_eq!(price.unit_price, Decimal::new(320, 2));

        Ok(())
    }

    #[test]
    fn no_description_defaults_to_tier_1() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_sources(dir.path())?;
        let book = PriceBook::new(TableSources::under(dir.path()));

        let price = resolve(&book, None, 100)?;

        assert_eq!(price.tier, ProductTier::Tier1);
        assert_eq!(price.unit_price, Decimal::new(360, 2));

        Ok(())
    }

    #[test]
    fn seven_panel_description_prices_from_tier_3() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_sources(dir.path())?;
        let book = PriceBook::new(TableSources::under(dir.path()));

        let price = resolve(&book, Some("7 panel performance cap"), 600)?;

        assert_eq!(price.tier, ProductTier::Tier3);
        assert_eq!(price.unit_price, Decimal::new(460, 2));

        Ok(())
    }

    #[test]
    fn empty_tier_table_is_a_lookup_failure() -> TestResult {
        let dir = tempfile::tempdir()?;
        // Only the catalog exists; every blank-cap table is missing.
        fs::write(
            dir.path().join("products.csv"),
            "Name,Profile,billOrVisorShape,panelCount,priceTier,structureType,nickNames\n",
        )?;
        let book = PriceBook::new(TableSources::under(dir.path()));

        assert!(matches!(
            resolve(&book, None, 100),
            Err(ResolveError::Lookup { category: Category::BlankCap, .. })
        ));

        Ok(())
    }
}
